/// Split OCR text into trimmed, non-empty lines in document order.
/// Accepts `\n`, `\r\n` and bare `\r` line endings.
pub fn normalize(raw: &str) -> Vec<&str> {
    raw.split(['\n', '\r'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}
