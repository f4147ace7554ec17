use crate::error::BencodeError;
use crate::io::traits::IDestination;

/// In-memory byte destination.
pub struct Buffer {
    pub buffer: Vec<u8>,
}

impl Buffer {
    pub fn new() -> Self {
        Self { buffer: vec![] }
    }

    pub fn to_string(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn last(&self) -> Option<u8> {
        self.buffer.last().copied()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl IDestination for Buffer {
    fn add_byte(&mut self, byte: u8) -> Result<(), BencodeError> {
        self.buffer.push(byte);
        Ok(())
    }

    fn add_bytes(&mut self, bytes: &[u8]) -> Result<(), BencodeError> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}
