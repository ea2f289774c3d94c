use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// Text recognized from one prescription image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrText {
    pub text: String,
    /// Engine-reported confidence in `0.0..=1.0`, when the engine has one.
    pub confidence: Option<f32>,
}

impl OcrText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }
}

/// OCR engine abstraction (allows mocking for tests).
///
/// Implementations block until recognition completes; cancellation and
/// timeouts belong to the caller.
pub trait OcrEngine {
    fn recognize(&self, image_bytes: &[u8]) -> Result<OcrText, ExtractionError>;
}
