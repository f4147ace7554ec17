use crate::error::BencodeError;
use crate::io::sources::buffer::Buffer;
use crate::io::traits::ISource;
use std::fs;
use std::path::Path;

/// File-backed byte source. The file is read once at construction and the
/// handle released before any parsing starts.
pub struct File {
    buffer: Buffer,
}

impl File {
    pub fn new(path: &str) -> Result<Self, BencodeError> {
        let contents = fs::read(Path::new(path))?;
        Ok(Self {
            buffer: Buffer::new(&contents),
        })
    }
}

impl ISource for File {
    fn current(&self) -> Option<u8> {
        self.buffer.current()
    }

    fn next(&mut self) -> Result<(), BencodeError> {
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

    fn get_range(&self, start: usize, end: usize) -> Vec<u8> {
        self.buffer.get_range(start, end)
    }

    fn line(&self) -> usize {
        self.buffer.line()
    }

    fn column(&self) -> usize {
        self.buffer.column()
    }
}
