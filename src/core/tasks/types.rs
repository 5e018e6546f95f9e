use crate::core::{
    models::SupportedFormats,
    ExtractionResult,
};

#[derive(Debug, Clone)]
pub enum TaskResult {
    BackendConnection(bool),
    SupportedFormats(SupportedFormats),
    UploadProgress(u8),
    UploadFinished(Result<ExtractionResult, String>),
}
