use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel for a dosage or frequency that could not be extracted.
pub const DEFAULT_DIRECTIONS: &str = "As directed";
/// Sentinel for a duration that could not be extracted.
pub const DEFAULT_DURATION: &str = "As prescribed";
/// Sentinel for a prescriber name that could not be extracted.
pub const DEFAULT_DOCTOR_NAME: &str = "Dr. Unknown";
/// Sentinel for a medication start line that carried no name.
pub const DEFAULT_MEDICATION_NAME: &str = "Unnamed medication";

/// Label assigned to each normalized line before assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Header, footer or boilerplate; also lines too short to carry content.
    Noise,
    /// Prescriber name line (handled by the doctor extractor).
    DoctorInfo,
    /// "Date: ..." line (handled by the doctor extractor).
    DateInfo,
    MedicationStart,
    Continuation,
}

impl LineKind {
    /// Metadata and noise lines never touch the medication accumulator.
    pub fn is_inert(self) -> bool {
        matches!(self, LineKind::Noise | LineKind::DoctorInfo | LineKind::DateInfo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub content: String,
    pub kind: LineKind,
}

/// One prescribed drug. Every field is non-empty once normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub instructions: String,
}

impl Medication {
    pub fn has_default_frequency(&self) -> bool {
        self.frequency == DEFAULT_DIRECTIONS
    }

    pub fn has_default_duration(&self) -> bool {
        self.duration == DEFAULT_DURATION
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorDetails {
    pub name: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl DoctorDetails {
    /// Parse the prescription date. Day-first is tried before month-first,
    /// and two-digit years are read as 20xx.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_prescription_date(&self.date)
    }
}

/// Parse a `D/M/Y` or `D-M-Y` date string (also `M/D/Y` when day-first is
/// impossible). Returns `None` for anything else.
pub fn parse_prescription_date(date_str: &str) -> Option<NaiveDate> {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = trimmed.replace('-', "/");
    let parts: Vec<&str> = normalized.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let first: u32 = parts[0].parse().ok()?;
    let second: u32 = parts[1].parse().ok()?;
    let year: i32 = match parts[2].len() {
        2 => 2000 + parts[2].parse::<i32>().ok()?,
        4 => parts[2].parse().ok()?,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, second, first)
        .or_else(|| NaiveDate::from_ymd_opt(year, first, second))
}

/// Structured result of parsing one OCR text blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPrescription {
    pub doctor: DoctorDetails,
    pub medications: Vec<Medication>,
    /// Always retained so the caller can show it verbatim when
    /// `medications` is empty.
    pub raw_text: String,
}

impl ParsedPrescription {
    pub fn has_structure(&self) -> bool {
        !self.medications.is_empty()
    }

    /// Degraded-but-valid states the caller should surface to the reviewer.
    pub fn soft_failures(&self) -> Vec<SoftFailure> {
        if self.medications.is_empty() {
            return vec![SoftFailure::UnrecoverableStructure];
        }

        self.medications
            .iter()
            .enumerate()
            .filter_map(|(medication_index, med)| {
                let mut missing = Vec::new();
                if med.has_default_frequency() {
                    missing.push(MissingField::Frequency);
                }
                if med.has_default_duration() {
                    missing.push(MissingField::Duration);
                }
                (!missing.is_empty()).then_some(SoftFailure::PartialExtraction {
                    medication_index,
                    missing,
                })
            })
            .collect()
    }
}

/// Soft failures are result states, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SoftFailure {
    /// No medication block was recovered; show the raw text instead.
    UnrecoverableStructure,
    /// A medication was recognized but some fields fell back to sentinels.
    PartialExtraction {
        medication_index: usize,
        missing: Vec<MissingField>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    Frequency,
    Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(frequency: &str, duration: &str) -> Medication {
        Medication {
            name: "Amoxicillin".into(),
            dosage: "500mg".into(),
            frequency: frequency.into(),
            duration: duration.into(),
            instructions: "Amoxicillin 500mg".into(),
        }
    }

    fn doctor(date: &str) -> DoctorDetails {
        DoctorDetails {
            name: DEFAULT_DOCTOR_NAME.into(),
            date: date.into(),
            license: None,
        }
    }

    #[test]
    fn day_first_date() {
        assert_eq!(
            doctor("15/03/2024").parsed_date(),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn month_first_when_day_first_impossible() {
        assert_eq!(
            doctor("03/15/2024").parsed_date(),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn two_digit_year_and_dashes() {
        assert_eq!(
            doctor("1-2-24").parsed_date(),
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
    }

    #[test]
    fn garbage_date_is_none() {
        assert_eq!(doctor("yesterday").parsed_date(), None);
        assert_eq!(doctor("").parsed_date(), None);
        assert_eq!(doctor("40/40/2024").parsed_date(), None);
    }

    #[test]
    fn empty_medications_is_unrecoverable() {
        let parsed = ParsedPrescription {
            doctor: doctor("1/1/2024"),
            medications: vec![],
            raw_text: "Thank you".into(),
        };
        assert!(!parsed.has_structure());
        assert_eq!(parsed.soft_failures(), vec![SoftFailure::UnrecoverableStructure]);
    }

    #[test]
    fn partial_extraction_lists_missing_fields() {
        let parsed = ParsedPrescription {
            doctor: doctor("1/1/2024"),
            medications: vec![
                med("twice daily", "for 7 days"),
                med(DEFAULT_DIRECTIONS, DEFAULT_DURATION),
            ],
            raw_text: String::new(),
        };
        assert_eq!(
            parsed.soft_failures(),
            vec![SoftFailure::PartialExtraction {
                medication_index: 1,
                missing: vec![MissingField::Frequency, MissingField::Duration],
            }]
        );
    }

    #[test]
    fn json_shape_uses_raw_text_and_omits_missing_license() {
        let parsed = ParsedPrescription {
            doctor: doctor("1/1/2024"),
            medications: vec![med("bd", "for 5 days")],
            raw_text: "raw".into(),
        };
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["rawText"], "raw");
        assert!(json["doctor"].get("license").is_none());
        assert_eq!(json["medications"][0]["dosage"], "500mg");
    }

    #[test]
    fn json_includes_license_when_present() {
        let mut details = doctor("1/1/2024");
        details.license = Some("MD12345".into());
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["license"], "MD12345");
    }

    #[test]
    fn inert_kinds() {
        assert!(LineKind::Noise.is_inert());
        assert!(LineKind::DoctorInfo.is_inert());
        assert!(LineKind::DateInfo.is_inert());
        assert!(!LineKind::MedicationStart.is_inert());
        assert!(!LineKind::Continuation.is_inert());
    }
}
