/// Positional character-match ratio of two normalized strings, in [0, 1].
///
/// Counts the positions where both strings carry the same character, up to
/// the length of the shorter one, and divides by the length of the longer
/// one. Lengths are in Unicode scalar values.
///
/// This is not an edit distance: shared prefixes and equal lengths score
/// well, while transposed or shifted text ("de aceite filtro" against
/// "filtro de aceite") scores close to zero. Results must stay reproducible,
/// so do not swap in a smarter string metric here.
///
/// Two empty strings score 0.0.
#[inline]
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }

    let same = a
        .chars()
        .zip(b.chars())
        .filter(|(x, y)| x == y)
        .count();

    same as f64 / longest as f64
}
