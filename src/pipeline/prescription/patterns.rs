//! Recognizers for the fields of a prescription.
//!
//! Every recognizer is a compiled-once regex wrapped in a function that
//! returns `None` on no match. They share no state and can be tested in
//! isolation.

use std::sync::LazyLock;

use regex::Regex;

// The leading guard keeps "2.5mg" from matching as "5mg"; the dosage
// itself is capture group 1.
static DOSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\w.])(\d+(?:\.\d+)?\s*(?:mcg|mg|ml|g|units?))\b").unwrap()
});

static FREQUENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:",
        r"(?:once|twice|thrice|\d+\s+times)\s+(?:daily|a\s+day|per\s+day)",
        r"|every\s+\d+(?:\s*-\s*\d+)?\s+hours?",
        r"|bd|tds|qid|od",
        r")\b",
    ))
    .unwrap()
});

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:",
        r"continue\s+(?:for\s+)?\d+\s+(?:days?|weeks?)",
        r"|for\s+\d+\s+(?:days?|weeks?|months?)",
        r")\b",
    ))
    .unwrap()
});

// No backreferences in `regex`, so each separator gets its own branch.
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{1,2}/\d{1,2}/(?:\d{4}|\d{2})|\d{1,2}-\d{1,2}-(?:\d{4}|\d{2}))\b").unwrap()
});

static LICENSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\blicen[cs]e\b[ \t]*(?:#|no\.?|number)?[ \t]*:?[ \t]*([A-Z0-9]+)").unwrap()
});

static DOCTOR_TITLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(?i:dr)(?:\.[ \t]*|[ \t]+)",
        r"[A-Z][A-Za-z'.-]*(?:[ \t]+[A-Z][A-Za-z'.-]*)*",
        r"(?:,[ \t]*(?:MD|MBBS|DO)\b)?",
    ))
    .unwrap()
});

// The degree must close the line or be followed by a comma, so label text
// such as "Shake Gently DO not freeze" is not a name.
static DOCTOR_DEGREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\b([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)+,?[ \t]+(?:MD|MBBS|DO))[ \t\r]*(?:,|$)")
        .unwrap()
});

static TITLE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^dr\b\.?\s*").unwrap());

static ORDINAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\.").unwrap());

static NAMED_DOSAGE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Za-z0-9-]*(?:[ \t]+[A-Z][A-Za-z0-9-]*)*[ \t]*\d+(?:\.\d+)?[ \t]*(?i:mcg|mg|ml|g|units?)\b")
        .unwrap()
});

/// Verbs that open a directions line. "Take 10 ml every 6 hours" is an
/// instruction, not a medication named "Take".
const INSTRUCTION_VERBS: &[&str] = &[
    "apply", "chew", "dissolve", "give", "inhale", "inject", "insert", "instil", "mix",
    "place", "shake", "spray", "swallow", "take", "use",
];

/// A dosage such as "500mg", "20 mg" or "2.5ml".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DosageMatch<'a> {
    pub text: &'a str,
    /// Byte offset of the match within the searched line.
    pub start: usize,
}

pub fn find_dosage(text: &str) -> Option<DosageMatch<'_>> {
    let dosage = DOSAGE.captures(text)?.get(1)?;
    Some(DosageMatch {
        text: dosage.as_str(),
        start: dosage.start(),
    })
}

pub fn find_frequency(text: &str) -> Option<&str> {
    FREQUENCY.find(text).map(|m| m.as_str())
}

/// A duration phrase such as "for 7 days" or "Continue for 14 days".
pub fn find_duration(text: &str) -> Option<&str> {
    DURATION.find(text).map(|m| m.as_str())
}

pub fn find_date(text: &str) -> Option<&str> {
    DATE.find(text).map(|m| m.as_str())
}

/// The license code following a "License" token.
pub fn find_license(text: &str) -> Option<&str> {
    LICENSE.captures(text)?.get(1).map(|m| m.as_str())
}

/// First prescriber name in the text: a "Dr." form wins over a bare
/// degree-suffixed name.
pub fn find_doctor_name(text: &str) -> Option<&str> {
    DOCTOR_TITLED
        .find(text)
        .or_else(|| DOCTOR_DEGREE.captures(text)?.get(1))
        .map(|m| m.as_str().trim())
}

/// Whether a single line names a prescriber at its start.
pub fn is_doctor_line(line: &str) -> bool {
    DOCTOR_TITLED.find(line).is_some_and(|m| m.start() == 0)
        || DOCTOR_DEGREE.find(line).is_some_and(|m| m.start() == 0)
}

/// Rewrite a leading "dr"/"DR."/"Dr" to the canonical "Dr. ".
pub fn canonical_doctor_name(name: &str) -> String {
    let trimmed = name.trim();
    match TITLE_PREFIX.find(trimmed) {
        Some(m) => format!("Dr. {}", &trimmed[m.end()..]),
        None => trimmed.to_string(),
    }
}

/// Length of a leading "<digits>." list marker, if the line has one.
/// "2.5ml" is a decimal amount, not a marker.
fn ordinal_len(line: &str) -> Option<usize> {
    let m = ORDINAL.find(line)?;
    let next = line[m.end()..].chars().next();
    match next {
        Some(c) if c.is_ascii_digit() => None,
        _ => Some(m.end()),
    }
}

pub fn has_ordinal_marker(line: &str) -> bool {
    ordinal_len(line).is_some()
}

/// Drop a leading "<digits>." marker and the whitespace after it.
pub fn strip_ordinal(line: &str) -> &str {
    match ordinal_len(line) {
        Some(len) => line[len..].trim_start(),
        None => line,
    }
}

/// A numbered entry, or a capitalized name immediately followed by a dosage.
pub fn is_medication_start(line: &str) -> bool {
    has_ordinal_marker(line)
        || (NAMED_DOSAGE_START.is_match(line) && !starts_with_instruction_verb(line))
}

fn starts_with_instruction_verb(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|word| INSTRUCTION_VERBS.iter().any(|v| word.eq_ignore_ascii_case(v)))
}
