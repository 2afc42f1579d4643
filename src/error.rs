// ============================================================================
// ERRORS - Error taxonomy of the dashboard client
// ============================================================================

use thiserror::Error;

/// Failure of a call to the remote prediction service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// 401 on a protected call: the session is expired or invalid.
    #[error("session expired or invalid")]
    Unauthorized,

    /// Login or registration was rejected.
    #[error("{0}")]
    Auth(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// The request never produced an HTTP response.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Network(err.0)
    }
}

/// Rejected file selection. `Display` is the inline message of the upload widget.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntakeError {
    #[error("Please select a .csv file.")]
    NoFile,

    #[error("Only one file can be uploaded at a time.")]
    MultipleFiles(usize),

    #[error("Only .csv files are accepted.")]
    NotCsv(String),

    #[error("File is too large (max {}MB).", .limit / (1024 * 1024))]
    TooLarge { size: u64, limit: u64 },

    #[error("An upload is already in progress.")]
    UploadInProgress,
}
