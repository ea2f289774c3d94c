use std::fmt::Write;

use chrono::{Local, NaiveDate};

use super::assembler::MedicationAssembler;
use super::classify::classify_lines;
use super::doctor::extract_doctor;
use super::lines::normalize;
use super::normalize::{normalize_doctor, normalize_medication, NormalizeOptions};
use super::types::{ParsedPrescription, DEFAULT_DOCTOR_NAME};
use super::ParseError;
use crate::config::ParserConfig;

/// Used when the configured date format cannot be rendered.
const FALLBACK_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Turns OCR text into a `ParsedPrescription`.
///
/// Holds only configuration; every call to [`parse`](Self::parse) is
/// independent, so one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct PrescriptionParser {
    config: ParserConfig,
    /// Pinned "today" for the date default; `None` reads the local clock.
    today: Option<NaiveDate>,
}

impl PrescriptionParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config, today: None }
    }

    /// Pin the date used when the text carries none.
    pub fn with_fixed_date(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one OCR result.
    ///
    /// Extraction problems never produce an error: fields fall back to
    /// sentinels and an unstructured text yields an empty medication list.
    /// The only error is an OCR-failure sentinel passed in place of text.
    pub fn parse(&self, raw_text: &str) -> Result<ParsedPrescription, ParseError> {
        if self.config.is_ocr_failure_sentinel(raw_text) {
            return Err(ParseError::NoTextRecognized);
        }

        let lines = normalize(raw_text);
        let classified = classify_lines(lines.iter().copied());

        let mut assembler = MedicationAssembler::new();
        for line in &classified {
            assembler.push(line);
        }
        let orphaned = assembler.orphaned_lines();

        let options = NormalizeOptions {
            correct_drug_names: self.config.correct_drug_names,
        };
        let medications: Vec<_> = assembler
            .finish()
            .into_iter()
            .map(|med| normalize_medication(med, options))
            .collect();

        let doctor = normalize_doctor(extract_doctor(raw_text, &self.date_fallback()));

        tracing::debug!(
            lines = lines.len(),
            medications = medications.len(),
            orphaned_lines = orphaned,
            doctor_found = doctor.name != DEFAULT_DOCTOR_NAME,
            license_found = doctor.license.is_some(),
            "Parsed prescription text"
        );

        Ok(ParsedPrescription {
            doctor,
            medications,
            raw_text: raw_text.to_string(),
        })
    }

    fn date_fallback(&self) -> String {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());

        let mut out = String::new();
        if write!(out, "{}", today.format(&self.config.date_format)).is_err() {
            tracing::warn!(
                format = %self.config.date_format,
                "Unrenderable date format, using default"
            );
            return today.format(FALLBACK_DATE_FORMAT).to_string();
        }
        out
    }
}

/// Parse with default configuration and the local date.
pub fn parse_prescription(raw_text: &str) -> Result<ParsedPrescription, ParseError> {
    PrescriptionParser::default().parse(raw_text)
}
