use crate::error::BencodeError;
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
    pub fn new(path: &str) -> Result<Self, BencodeError> {
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
    fn add_byte(&mut self, byte: u8) -> Result<(), BencodeError> {
        self.file.write_all(&[byte])?;
        self.file_length += 1;
        Ok(())
    }

    fn add_bytes(&mut self, bytes: &[u8]) -> Result<(), BencodeError> {
        self.file.write_all(bytes)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;

    fn read_back(path: &str) -> String {
        let mut content = String::new();
        StdFile::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn create_file_destination_works() {
        let path = "bencode_destination_create.bencode";
        let _file = File::new(path).unwrap();
        assert!(fs::metadata(path).is_ok());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn add_byte_works() {
        let path = "bencode_destination_byte.bencode";
        let mut file = File::new(path).unwrap();
        file.add_byte(b'l').unwrap();
        file.add_byte(b'e').unwrap();
        assert_eq!(read_back(path), "le");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn add_bytes_works() {
        let path = "bencode_destination_bytes.bencode";
        let mut file = File::new(path).unwrap();
        file.add_bytes(b"4:test").unwrap();
        assert_eq!(read_back(path), "4:test");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn clear_and_file_length_work() {
        let path = "bencode_destination_clear.bencode";
        let mut file = File::new(path).unwrap();
        file.add_bytes(b"i32e").unwrap();
        assert_eq!(file.file_length(), 4);
        file.clear();
        assert_eq!(file.file_length(), 0);
        assert_eq!(read_back(path), "");
        fs::remove_file(path).unwrap();
    }
}
