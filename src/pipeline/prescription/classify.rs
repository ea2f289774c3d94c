use super::patterns::{is_doctor_line, is_medication_start};
use super::types::{ClassifiedLine, LineKind};

/// Lines shorter than this (in characters) carry no usable content.
const MIN_CONTENT_CHARS: usize = 6;

/// Boilerplate found on printed prescription pads.
const NOISE_MARKERS: &[&str] = &["rx:", "prescription", "follow up", "follow-up"];

/// Classify one normalized line. First matching rule wins:
/// metadata and boilerplate, then medication start, then content length.
pub fn classify(line: &str) -> LineKind {
    let lower = line.to_lowercase();

    if lower.starts_with("dr.") || is_doctor_line(line) {
        return LineKind::DoctorInfo;
    }
    if lower.contains("date:") {
        return LineKind::DateInfo;
    }
    if NOISE_MARKERS.iter().any(|m| lower.contains(m)) || is_license_footer(&lower) {
        return LineKind::Noise;
    }

    if is_medication_start(line) {
        return LineKind::MedicationStart;
    }

    if line.chars().count() >= MIN_CONTENT_CHARS {
        LineKind::Continuation
    } else {
        LineKind::Noise
    }
}

fn is_license_footer(lower: &str) -> bool {
    lower.starts_with("license") || lower.starts_with("licence")
}

pub fn classify_lines<'a, I>(lines: I) -> Vec<ClassifiedLine>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(|line| ClassifiedLine {
            content: line.to_string(),
            kind: classify(line),
        })
        .collect()
}
