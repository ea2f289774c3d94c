/// Clean OCR output before parsing.
/// Strips control and zero-width characters and unifies line endings to
/// `\n`. Line structure and medical punctuation are kept; trimming and
/// blank-line removal are left to the line normalizer.
pub fn sanitize_ocr_text(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|c| matches!(c, '\n' | '\t') || !(c.is_control() || is_invisible(*c)))
        .collect()
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}' // zero-width space/joiners, direction marks
            | '\u{202A}'..='\u{202E}' // bidi embedding and overrides
            | '\u{2060}'..='\u{2064}' // word joiner, invisible operators
            | '\u{FEFF}' // BOM
    )
}
