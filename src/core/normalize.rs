use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block, the accents NFD splits off Latin letters
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Map text to the form used for comparison.
///
/// Lower-cases, decomposes (NFD), drops combining diacritical marks and trims
/// surrounding whitespace. Idempotent; whitespace-only input maps to "".
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect();

    let trimmed = stripped.trim();
    if trimmed.len() == stripped.len() {
        stripped
    } else {
        trimmed.to_string()
    }
}
