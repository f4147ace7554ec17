use crate::error::XmlError;
use crate::io::traits::ISource;

/// In-memory character source.
///
/// Construction performs the whole transcoding pipeline once: encoding
/// detection (BOM first, then a `<?xml` probe with a byte-swap fallback for
/// BOM-less UTF-16), decoding to Unicode scalars, and CRLF / lone-CR to LF
/// normalization. The parser afterwards works purely on characters.
pub struct Buffer {
    buffer: Vec<char>,
    position: usize,
}

impl Buffer {
    /// Build a source from text already decoded by the caller.
    pub fn new(to_parse: &str) -> Result<Self, XmlError> {
        if to_parse.is_empty() {
            return Err(XmlError::EmptySource);
        }
        Ok(Self {
            buffer: normalize_newlines(to_parse.chars()),
            position: 0,
        })
    }

    /// Build a source from raw bytes, detecting UTF-8 or UTF-16 encodings.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, XmlError> {
        let decoded = decode(bytes)?;
        if decoded.is_empty() {
            return Err(XmlError::EmptySource);
        }
        Ok(Self {
            buffer: normalize_newlines(decoded.chars()),
            position: 0,
        })
    }

    /// Rewind to the start of the buffer.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

/// Decode raw bytes to text. A byte order mark wins; without one the first
/// bytes are probed for `<?xml` in UTF-8 or either UTF-16 byte order.
fn decode(bytes: &[u8]) -> Result<String, XmlError> {
    if bytes.is_empty() {
        return Err(XmlError::EmptySource);
    }
    if bytes.starts_with(&[0xef, 0xbb, 0xbf]) {
        return utf8(&bytes[3..]);
    }
    if bytes.starts_with(&[0xfe, 0xff]) {
        return utf16(&bytes[2..], true);
    }
    if bytes.starts_with(&[0xff, 0xfe]) {
        return utf16(&bytes[2..], false);
    }
    // No BOM: probe for the declaration in each candidate encoding
    if bytes.starts_with(b"<?xml") {
        return utf8(bytes);
    }
    if bytes.starts_with(&[0x00, b'<']) {
        return utf16(bytes, true);
    }
    if bytes.starts_with(&[b'<', 0x00]) {
        return utf16(bytes, false);
    }
    utf8(bytes)
}

fn utf8(bytes: &[u8]) -> Result<String, XmlError> {
    core::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| XmlError::UnsupportedEncoding)
}

fn utf16(bytes: &[u8], big_endian: bool) -> Result<String, XmlError> {
    if bytes.len() % 2 != 0 {
        return Err(XmlError::UnsupportedEncoding);
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16(&units).map_err(|_| XmlError::UnsupportedEncoding)
}

/// CRLF and lone CR both become LF before the parser sees the stream.
fn normalize_newlines(characters: impl Iterator<Item = char>) -> Vec<char> {
    let mut normalized = Vec::new();
    let mut previous_cr = false;
    for character in characters {
        match character {
            '\r' => {
                normalized.push('\n');
                previous_cr = true;
            }
            '\n' if previous_cr => {
                previous_cr = false;
            }
            _ => {
                normalized.push(character);
                previous_cr = false;
            }
        }
    }
    normalized
}

impl ISource for Buffer {
    fn current(&self) -> Option<char> {
        self.buffer.get(self.position).copied()
    }

    fn next(&mut self) -> Result<(), XmlError> {
        if !self.more() {
            return Err(XmlError::BufferExhausted {
                position: self.error_position(),
            });
        }
        self.position += 1;
        Ok(())
    }

    fn more(&self) -> bool {
        self.position < self.buffer.len()
    }

    fn backup(&mut self, length: usize) {
        self.position = self.position.saturating_sub(length);
    }

    fn position(&self) -> usize {
        self.position
    }

    fn get_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.buffer.len());
        let start = start.min(end);
        self.buffer[start..end].iter().collect()
    }

    // Line and column are recomputed from the consumed prefix so that
    // backup() cannot leave them stale.
    fn line(&self) -> usize {
        1 + self.buffer[..self.position]
            .iter()
            .filter(|&&character| character == '\n')
            .count()
    }

    fn column(&self) -> usize {
        let consumed = &self.buffer[..self.position];
        match consumed.iter().rposition(|&character| character == '\n') {
            Some(index) => self.position - index,
            None => self.position + 1,
        }
    }
}
