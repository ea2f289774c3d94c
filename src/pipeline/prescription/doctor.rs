use super::patterns::{canonical_doctor_name, find_date, find_doctor_name, find_license};
use super::types::{DoctorDetails, DEFAULT_DOCTOR_NAME};

/// Scan the whole text for prescriber details. These fields may sit on any
/// line (including the first), so this does not use line classification.
///
/// `date_fallback` is used verbatim when no date is found.
pub fn extract_doctor(full_text: &str, date_fallback: &str) -> DoctorDetails {
    let name = find_doctor_name(full_text)
        .map(canonical_doctor_name)
        .unwrap_or_else(|| DEFAULT_DOCTOR_NAME.to_string());

    let date = find_date(full_text)
        .map(str::to_string)
        .unwrap_or_else(|| date_fallback.to_string());

    DoctorDetails {
        name,
        date,
        license: find_license(full_text).map(str::to_string),
    }
}
