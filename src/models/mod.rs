pub mod auth;
pub mod risk;
pub mod upload;
pub mod notification;
pub mod csv_preview;

pub use auth::{Credentials, ErrorBody, TokenResponse};
pub use risk::{Hotspot, HotspotsResponse, Prediction, PredictionsResponse, RiskPoint};
pub use upload::{FileMeta, TransferProgress, UploadFile, UploadResponse, UploadStatus, UploadTask};
pub use notification::{Notification, NotificationKind};
pub use csv_preview::{CsvPreview, CsvRow};
