pub mod errors;
pub mod models;
pub mod tasks;
pub mod utils;

pub use errors::RefscanError;
pub use models::{
    ExtractionResult,
    SelectedFile,
    SourceFileType,
};
