/// Endpoints of the prediction service, relative to `AppConfig::api_base_url`.
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const PREDICT_PATH: &str = "/predict";
pub const HOTSPOTS_PATH: &str = "/hotspots";
pub const UPLOAD_PATH: &str = "/upload";

/// Multipart field the service reads the CSV from.
pub const UPLOAD_FIELD_NAME: &str = "file";

pub const CSV_MIME_TYPE: &str = "text/csv";
