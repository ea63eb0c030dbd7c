//! Colon segmentation of the input line
//!
//! Queries chain selectors with `:`. The last colon-delimited piece is the one
//! the user is still typing (the active segment); everything before it is
//! committed.

/// Split `input` on `:` into committed segments and the active segment.
///
/// Never fails: an empty line yields no committed segments and an empty
/// active segment.
pub fn segment(input: &str) -> (Vec<&str>, &str) {
    let mut segments: Vec<&str> = input.split(':').collect();
    let active = segments.pop().unwrap_or_default();
    (segments, active)
}

/// Join committed segments back into the line prefix they came from
pub fn committed_prefix(segments: &[&str]) -> String {
    segments.join(":")
}
