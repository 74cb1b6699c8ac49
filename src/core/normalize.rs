//! Line normalization
//!
//! Every stylesheet line goes through here before any pattern is tried:
//! the `%` comment suffix is dropped and surrounding whitespace trimmed.
//! An escaped `\%` is a literal percent sign and is kept.

/// Remove a trailing `%` comment from a single line.
///
/// A `%` only starts a comment when the character right before it is not a
/// backslash.
pub fn strip_comment(line: &str) -> &str {
    let mut prev = None;
    for (i, c) in line.char_indices() {
        if c == '%' && prev != Some('\\') {
            return &line[..i];
        }
        prev = Some(c);
    }
    line
}

/// Strip the comment and trim whitespace on both sides.
pub fn normalize_line(line: &str) -> &str {
    strip_comment(line).trim()
}

/// Split source text into `(line_number, normalized_line)` pairs.
///
/// Line numbers are 1-indexed. A trailing `\r` from CRLF input is removed
/// along with the rest of the whitespace.
pub fn normalized_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .split('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, normalize_line(line)))
}
