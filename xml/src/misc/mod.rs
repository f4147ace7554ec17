use crate::error::XmlError;
use std::fs;
use std::path::Path;

/// Returns the current version of the package as specified in Cargo.toml.
/// Uses CARGO_PKG_VERSION environment variable that is set during compilation
/// from the version field in Cargo.toml.
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Reads an XML document from a file as raw bytes, so UTF-16 documents can
/// be transcoded by the source.
pub fn read_xml_file(path: &str) -> Result<Vec<u8>, XmlError> {
    Ok(fs::read(Path::new(path))?)
}

/// Writes XML text to a file.
pub fn write_xml_file(path: &str, content: &str) -> Result<(), XmlError> {
    Ok(fs::write(Path::new(path), content)?)
}
