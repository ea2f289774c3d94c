//! Prescription scanning orchestrator.
//!
//! Single entry point that drives image → OCR → sanitize → parse.
//! The OCR engine is injected as a trait object so the whole flow is
//! testable with a mock engine.

use std::path::Path;

use serde::Serialize;
use uuid::Uuid;

use crate::pipeline::extraction::{sanitize_ocr_text, ExtractionError, OcrEngine};
use crate::pipeline::prescription::{ParseError, ParsedPrescription, PrescriptionParser, SoftFailure};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Parsing failed: {0}")]
    Parse(#[from] ParseError),
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Everything a review screen needs for one scanned prescription.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    /// Correlation id for logs; not derived from content.
    pub scan_id: Uuid,
    pub ocr_confidence: Option<f32>,
    pub prescription: ParsedPrescription,
    pub soft_failures: Vec<SoftFailure>,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct PrescriptionProcessor {
    ocr: Box<dyn OcrEngine + Send + Sync>,
    parser: PrescriptionParser,
}

impl PrescriptionProcessor {
    pub fn new(ocr: Box<dyn OcrEngine + Send + Sync>, parser: PrescriptionParser) -> Self {
        Self { ocr, parser }
    }

    /// Read an image from disk and process it.
    pub fn process_file(&self, path: &Path) -> Result<ScanOutcome, ProcessingError> {
        let bytes = std::fs::read(path).map_err(ExtractionError::from)?;
        self.process_image(&bytes)
    }

    /// 1. Check the image against the size limit
    /// 2. Run OCR
    /// 3. Sanitize; empty or sentinel text is `NoTextRecognized`
    /// 4. Parse
    pub fn process_image(&self, image_bytes: &[u8]) -> Result<ScanOutcome, ProcessingError> {
        let scan_id = Uuid::new_v4();
        let _span = tracing::info_span!("scan_prescription", %scan_id).entered();

        let max = self.parser.config().max_image_bytes;
        if image_bytes.is_empty() {
            return Err(ExtractionError::EmptyImage.into());
        }
        if image_bytes.len() > max {
            tracing::warn!(size = image_bytes.len(), max, "Image rejected: too large");
            return Err(ExtractionError::ImageTooLarge {
                size: image_bytes.len(),
                max,
            }
            .into());
        }

        tracing::info!(size = image_bytes.len(), "Processing: starting OCR");
        let ocr = self.ocr.recognize(image_bytes)?;

        let text = sanitize_ocr_text(&ocr.text);
        if text.trim().is_empty() || self.parser.config().is_ocr_failure_sentinel(&text) {
            tracing::warn!("OCR returned no usable text");
            return Err(ExtractionError::NoTextRecognized.into());
        }

        tracing::info!(
            confidence = ?ocr.confidence,
            text_length = text.len(),
            "Processing: starting parse"
        );
        let prescription = self.parser.parse(&text)?;
        let soft_failures = prescription.soft_failures();

        if !prescription.has_structure() {
            tracing::warn!("No medications recovered, raw text fallback required");
        } else {
            tracing::info!(
                medications = prescription.medications.len(),
                partial = soft_failures.len(),
                "Processing: complete"
            );
        }

        Ok(ScanOutcome {
            scan_id,
            ocr_confidence: ocr.confidence,
            prescription,
            soft_failures,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
