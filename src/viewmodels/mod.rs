pub mod notification_center;
pub mod csv_intake;
pub mod upload_coordinator;
pub mod dashboard_viewmodel;
pub mod auth_viewmodel;

pub use notification_center::NotificationCenter;
pub use csv_intake::{CsvIntake, IntakeState};
pub use upload_coordinator::{UploadCoordinator, UploadOutcome};
pub use dashboard_viewmodel::DashboardViewModel;
pub use auth_viewmodel::AuthViewModel;
