use crate::error::XmlError;
use crate::io::traits::IDestination;

/// In-memory destination accumulating UTF-8 bytes.
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
    fn add_bytes(&mut self, bytes: &str) -> Result<(), XmlError> {
        self.buffer.extend_from_slice(bytes.as_bytes());
        Ok(())
    }

    fn add_char(&mut self, character: char) -> Result<(), XmlError> {
        let mut encoded = [0u8; 4];
        self.buffer
            .extend_from_slice(character.encode_utf8(&mut encoded).as_bytes());
        Ok(())
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_bytes_and_char_work() {
        let mut destination = Buffer::new();
        destination.add_bytes("<r>").unwrap();
        destination.add_char('é').unwrap();
        destination.add_bytes("</r>").unwrap();
        assert_eq!(destination.to_string(), "<r>é</r>");
    }

    #[test]
    fn clear_destination_works() {
        let mut destination = Buffer::new();
        destination.add_bytes("<r/>").unwrap();
        destination.clear();
        assert_eq!(destination.to_string(), "");
    }
}
