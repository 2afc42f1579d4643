use serde::{Deserialize, Serialize};

/// A file picked by the analyst, already read into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn meta(&self) -> FileMeta {
        FileMeta::new(self.name.clone(), self.mime_type.clone(), self.size())
    }
}

/// What the browser reports about a file before its contents are read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }

    pub fn has_csv_extension(&self) -> bool {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false)
    }
}

// Bytes are left out on purpose: files can be several MB.
impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// `POST /upload`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
}

/// Raw byte counters reported by the transport while the body is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferProgress {
    pub loaded: u64,
    pub total: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl UploadStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadStatus::Succeeded | UploadStatus::Failed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct UploadTask {
    pub file_name: Option<String>,
    pub progress_percent: u8,
    pub status: UploadStatus,
}
