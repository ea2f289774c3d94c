pub mod types;
pub mod sanitize;

pub use types::*;
pub use sanitize::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image is empty")]
    EmptyImage,

    #[error("Image is {size} bytes, limit is {max}")]
    ImageTooLarge { size: usize, max: usize },

    #[error("No text recognized in image")]
    NoTextRecognized,

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),
}
