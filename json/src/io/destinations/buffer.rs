use crate::error::JsonError;
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
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl IDestination for Buffer {
    fn add_byte(&mut self, byte: u8) -> Result<(), JsonError> {
        self.buffer.push(byte);
        Ok(())
    }

    fn add_bytes(&mut self, bytes: &str) -> Result<(), JsonError> {
        self.buffer.extend_from_slice(bytes.as_bytes());
        Ok(())
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}
