//! Configuration Parser
//!
//! Streams `key=value` directives out of the raw configuration buffer.
//!
//! - One directive per line, `\n` or `\r\n` terminated.
//! - Key and value are split on the first `=` and trimmed.
//! - Blank lines and `#` comments are skipped silently.
//! - Lines without `=`, with an empty key, or that are not valid UTF-8
//!   are logged as malformed and skipped; the scan never aborts.
//!
//! The parser borrows the buffer and only advances a cursor, so parsing the
//! same buffer again always yields the same entries.

use crate::log_warn;

/// One `key=value` directive, borrowed from the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigEntry<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> ConfigEntry<'a> {
    pub const fn new(key: &'a str, value: &'a str) -> Self {
        Self { key, value }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigParser<'a> {
    buffer: &'a [u8],
    cursor: usize,
    line: usize,
    malformed: usize,
}

/// Start a fresh scan over `buffer`.
pub fn parse(buffer: &[u8]) -> ConfigParser<'_> {
    ConfigParser::new(buffer)
}

impl<'a> ConfigParser<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            line: 0,
            malformed: 0,
        }
    }

    /// Lines skipped as malformed so far.
    pub fn malformed_lines(&self) -> usize {
        self.malformed
    }

    /// 1-based number of the last line consumed.
    pub fn line_number(&self) -> usize {
        self.line
    }

    fn next_line(&mut self) -> Option<&'a [u8]> {
        if self.cursor >= self.buffer.len() {
            return None;
        }

        let rest = &self.buffer[self.cursor..];
        let (line, consumed) = match rest.iter().position(|&b| b == b'\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.cursor += consumed;
        self.line += 1;

        Some(line.strip_suffix(b"\r").unwrap_or(line))
    }

    fn skip_malformed(&mut self, reason: &'static str) {
        self.malformed += 1;
        log_warn!("config line {}: {}, skipped", self.line, reason);
    }
}

impl<'a> Iterator for ConfigParser<'a> {
    type Item = ConfigEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.next_line()?;

            let text = match core::str::from_utf8(raw) {
                Ok(text) => text.trim(),
                Err(_) => {
                    self.skip_malformed("not valid UTF-8");
                    continue;
                }
            };

            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let Some((key, value)) = text.split_once('=') else {
                self.skip_malformed("no '=' delimiter");
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                self.skip_malformed("empty key");
                continue;
            }

            return Some(ConfigEntry::new(key, value.trim()));
        }
    }
}

impl core::iter::FusedIterator for ConfigParser<'_> {}
