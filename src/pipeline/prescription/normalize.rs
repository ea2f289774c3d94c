use super::medical_correction::correct_drug_name;
use super::types::{
    DoctorDetails, Medication, DEFAULT_DIRECTIONS, DEFAULT_DOCTOR_NAME, DEFAULT_DURATION,
    DEFAULT_MEDICATION_NAME,
};

/// Options for the final clean-up pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub correct_drug_names: bool,
}

/// Apply sentinels to empty fields and tidy whitespace.
pub fn normalize_medication(med: Medication, options: NormalizeOptions) -> Medication {
    let mut name = or_default(collapse_whitespace(&med.name), DEFAULT_MEDICATION_NAME);
    if options.correct_drug_names && name != DEFAULT_MEDICATION_NAME {
        name = correct_drug_name(&name);
    }

    Medication {
        name,
        dosage: or_default(collapse_whitespace(&med.dosage), DEFAULT_DIRECTIONS),
        frequency: or_default(collapse_whitespace(&med.frequency), DEFAULT_DIRECTIONS),
        duration: or_default(collapse_whitespace(&med.duration), DEFAULT_DURATION),
        instructions: normalize_instructions(&med.instructions),
    }
}

pub fn normalize_doctor(doctor: DoctorDetails) -> DoctorDetails {
    DoctorDetails {
        name: or_default(collapse_whitespace(&doctor.name), DEFAULT_DOCTOR_NAME),
        date: doctor.date.trim().to_string(),
        license: doctor
            .license
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()),
    }
}

/// Collapse runs of spaces/tabs inside each line; keep one line per entry.
pub fn normalize_instructions(instructions: &str) -> String {
    instructions
        .lines()
        .map(collapse_whitespace)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
