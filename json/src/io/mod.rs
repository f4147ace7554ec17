/// Source and destination trait definitions
pub mod traits;

/// Byte sources the parser can pull from
pub mod sources;

/// Byte sinks the stringifier can append to
pub mod destinations;
