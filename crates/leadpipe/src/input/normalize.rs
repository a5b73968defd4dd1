//! Header text canonicalization.

/// Canonicalize a raw header for comparison: lowercase, strip everything
/// outside `[a-z0-9 ]`, collapse internal whitespace to single spaces.
///
/// Idempotent: `normalize_header(normalize_header(x)) == normalize_header(x)`.
pub fn normalize_header(raw: &str) -> String {
    let kept: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
