use crate::error::JsonError;
use crate::io::traits::IDestination;
use std::fs::File as StdFile;
use std::io::Write;

/// File-backed byte destination. The handle is closed when the destination
/// is dropped, on both success and error paths.
pub struct File {
    file: StdFile,
    path: String,
    file_length: usize,
}

impl File {
    pub fn new(path: &str) -> Result<Self, JsonError> {
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
    fn add_byte(&mut self, byte: u8) -> Result<(), JsonError> {
        self.file.write_all(&[byte])?;
        self.file_length += 1;
        Ok(())
    }

    fn add_bytes(&mut self, bytes: &str) -> Result<(), JsonError> {
        self.file.write_all(bytes.as_bytes())?;
        self.file_length += bytes.len();
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
