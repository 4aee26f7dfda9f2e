//! Line-ending and escaping helpers.

/// Strip a trailing `\n` (and a `\r` before it) from a raw line.
#[inline]
#[must_use]
pub fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Replace real newlines with the two characters `\n`, keeping a message on one line.
#[must_use]
pub fn escape_newlines(text: &str) -> String {
    text.replace('\n', "\\n")
}

/// Inverse of [`escape_newlines`].
#[must_use]
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}
