pub mod transport;
pub mod browser_transport;
pub mod api_client;
pub mod upload_progress;
pub mod csv_preview;

pub use api_client::ApiClient;
pub use browser_transport::BrowserTransport;
pub use csv_preview::parse_preview;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, UploadRequest};
pub use upload_progress::{percent, ProgressTracker};
