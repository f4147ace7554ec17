use crate::error::XmlError;
use crate::io::traits::IDestination;
use std::fs::File as StdFile;
use std::io::Write;

/// File-backed destination. The handle is closed when the destination is
/// dropped, on both success and error paths.
pub struct File {
    file: StdFile,
    path: String,
    file_length: usize,
}

impl File {
    pub fn new(path: &str) -> Result<Self, XmlError> {
        Ok(Self {
            file: StdFile::create(path)?,
            path: path.to_string(),
            file_length: 0,
        })
    }

    pub fn file_length(&self) -> usize {
        self.file_length
    }
}

impl IDestination for File {
    fn add_bytes(&mut self, bytes: &str) -> Result<(), XmlError> {
        self.file.write_all(bytes.as_bytes())?;
        self.file_length += bytes.len();
        Ok(())
    }

    fn add_char(&mut self, character: char) -> Result<(), XmlError> {
        let mut encoded = [0u8; 4];
        let utf8 = character.encode_utf8(&mut encoded);
        self.file.write_all(utf8.as_bytes())?;
        self.file_length += utf8.len();
        Ok(())
    }

    fn clear(&mut self) {
        // Truncate by recreating; keep the old handle if that fails
        if let Ok(file) = StdFile::create(&self.path) {
            self.file = file;
            self.file_length = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn write_and_clear_work() {
        let path = "xml_destination.xml";
        let mut file = File::new(path).unwrap();
        file.add_bytes("<r>").unwrap();
        file.add_char('x').unwrap();
        file.add_bytes("</r>").unwrap();
        assert_eq!(file.file_length(), 8);
        assert_eq!(fs::read_to_string(path).unwrap(), "<r>x</r>");
        file.clear();
        assert_eq!(file.file_length(), 0);
        fs::remove_file(path).unwrap();
    }
}
