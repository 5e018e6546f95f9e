use thiserror::Error;

use crate::core::models::MAX_UPLOAD_MB;

#[derive(Error, Debug)]
pub enum RefscanError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Unsupported file type: {0}. Allowed: .pdf, .jpg, .jpeg, .png, .txt, .docx, .doc")]
    UnsupportedFileType(String),

    #[error("File size exceeds {MAX_UPLOAD_MB}MB limit")]
    FileTooLarge,

    #[error("History is unreadable: {0}")]
    HistoryUnreadable(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("RefscanError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for RefscanError {
    fn from(error: std::io::Error) -> Self {
        RefscanError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for RefscanError {
    fn from(error: reqwest::Error) -> Self {
        RefscanError::Reqwest(Box::new(error))
    }
}
