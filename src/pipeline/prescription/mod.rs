pub mod types;
pub mod lines;
pub mod patterns;
pub mod classify;
pub mod assembler;
pub mod doctor;
pub mod medical_correction;
pub mod normalize;
pub mod orchestrator;

pub use types::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The caller passed the OCR collaborator's failure marker instead of text.
    #[error("OCR reported no recognizable text")]
    NoTextRecognized,
}
