use crate::error::JsonError;
use crate::io::traits::ISource;

/// In-memory byte source over an owned copy of the input.
pub struct Buffer {
    buffer: Vec<u8>,
    position: usize,
}

impl Buffer {
    pub fn new(to_parse: &[u8]) -> Self {
        Self {
            buffer: to_parse.to_vec(),
            position: 0,
        }
    }

    pub fn to_string(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }

    /// Rewind to the start of the buffer.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl ISource for Buffer {
    fn current(&self) -> Option<u8> {
        self.buffer.get(self.position).copied()
    }

    fn next(&mut self) -> Result<(), JsonError> {
        if !self.more() {
            return Err(JsonError::BufferExhausted {
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

    fn get_range(&self, start: usize, end: usize) -> Vec<u8> {
        let end = end.min(self.buffer.len());
        let start = start.min(end);
        self.buffer[start..end].to_vec()
    }

    // Line and column are recomputed from the consumed prefix so that
    // backup() cannot leave them stale.
    fn line(&self) -> usize {
        1 + self.buffer[..self.position]
            .iter()
            .filter(|&&byte| byte == b'\n')
            .count()
    }

    fn column(&self) -> usize {
        let consumed = &self.buffer[..self.position];
        match consumed.iter().rposition(|&byte| byte == b'\n') {
            Some(index) => self.position - index,
            None => self.position + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_and_advance_work() {
        let mut source = Buffer::new(b"{}");
        assert_eq!(source.current(), Some(b'{'));
        source.next().unwrap();
        assert_eq!(source.current(), Some(b'}'));
        source.next().unwrap();
        assert_eq!(source.current(), None);
        assert!(matches!(
            source.next(),
            Err(JsonError::BufferExhausted { .. })
        ));
    }

    #[test]
    fn ignore_whitespace_skips_all_kinds() {
        let mut source = Buffer::new(b" \t\r\n true");
        source.ignore_whitespace();
        assert_eq!(source.current(), Some(b't'));
    }

    #[test]
    fn match_bytes_is_atomic() {
        let mut source = Buffer::new(b"truthy");
        assert!(!source.match_bytes(b"true"));
        assert_eq!(source.position(), 0);
        assert!(source.match_bytes(b"trut"));
        assert_eq!(source.position(), 4);
    }

    #[test]
    fn line_and_column_follow_newlines() {
        let mut source = Buffer::new(b"[\n1\n]");
        for _ in 0..2 {
            source.next().unwrap();
        }
        assert_eq!((source.line(), source.column()), (2, 1));
    }
}
