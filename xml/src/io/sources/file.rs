use crate::error::XmlError;
use crate::io::sources::buffer::Buffer;
use crate::io::traits::ISource;
use std::fs;
use std::path::Path;

/// File-backed character source. The file is read as raw bytes once at
/// construction so UTF-16 documents transcode correctly, and the handle is
/// released before any parsing starts.
pub struct File {
    buffer: Buffer,
}

impl File {
    pub fn new(path: &str) -> Result<Self, XmlError> {
        let contents = fs::read(Path::new(path))?;
        Ok(Self {
            buffer: Buffer::from_bytes(&contents)?,
        })
    }
}

impl ISource for File {
    fn current(&self) -> Option<char> {
        self.buffer.current()
    }

    fn next(&mut self) -> Result<(), XmlError> {
        self.buffer.next()
    }

    fn more(&self) -> bool {
        self.buffer.more()
    }

    fn backup(&mut self, length: usize) {
        self.buffer.backup(length);
    }

    fn position(&self) -> usize {
        self.buffer.position()
    }

    fn get_range(&self, start: usize, end: usize) -> String {
        self.buffer.get_range(start, end)
    }

    fn line(&self) -> usize {
        self.buffer.line()
    }

    fn column(&self) -> usize {
        self.buffer.column()
    }
}
