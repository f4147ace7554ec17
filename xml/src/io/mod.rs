/// Source and destination trait definitions
pub mod traits;

/// Character sources the parser can pull from
pub mod sources;

/// Sinks the stringifier can append to
pub mod destinations;
