use crate::error::JsonError;
use std::fs;
use std::path::Path;

/// Returns the current version of the package as specified in Cargo.toml.
/// Uses CARGO_PKG_VERSION environment variable that is set during compilation
/// from the version field in Cargo.toml.
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Reads JSON text from a file.
pub fn read_json_file(path: &str) -> Result<String, JsonError> {
    Ok(fs::read_to_string(Path::new(path))?)
}

/// Writes JSON text to a file.
pub fn write_json_file(path: &str, content: &str) -> Result<(), JsonError> {
    Ok(fs::write(Path::new(path), content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_write_then_read_json_file() {
        let test_file = "json_misc_roundtrip.json";
        write_json_file(test_file, "{\"a\":1}").unwrap();
        let content = read_json_file(test_file);
        fs::remove_file(test_file).expect("Failed to cleanup test file");
        assert_eq!(content.unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_read_json_file_error() {
        assert!(matches!(
            read_json_file("nonexistent.json"),
            Err(JsonError::Io { .. })
        ));
    }
}
