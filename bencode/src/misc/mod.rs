use crate::error::BencodeError;
use std::fs;
use std::path::Path;

/// Returns the current version of the package as specified in Cargo.toml.
/// Uses CARGO_PKG_VERSION environment variable that is set during compilation
/// from the version field in Cargo.toml.
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Reads bencode data from a file. The data is raw bytes; bencode strings
/// need not be valid UTF-8.
pub fn read_bencode_file(path: &str) -> Result<Vec<u8>, BencodeError> {
    Ok(fs::read(Path::new(path))?)
}

/// Writes bencode data to a file.
pub fn write_bencode_file(path: &str, content: &[u8]) -> Result<(), BencodeError> {
    Ok(fs::write(Path::new(path), content)?)
}
