use crate::error::BencodeError;
use crate::io::traits::ISource;

/// In-memory byte source over an owned copy of the input.
pub struct Buffer {
    buffer: Vec<u8>,
    position: usize,
}

impl Buffer {
    pub fn new(to_decode: &[u8]) -> Self {
        Self {
            buffer: to_decode.to_vec(),
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

    fn next(&mut self) -> Result<(), BencodeError> {
        if !self.more() {
            return Err(BencodeError::BufferExhausted {
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
