//! Configuration options for XML parsing and validation

/// Configuration for the XML parser
#[derive(Debug, Clone, Copy)]
pub struct ParserConfig {
    /// Fetch and parse the external DTD subset named by a SYSTEM identifier
    /// (default: true). Disable when documents reference identifiers that
    /// are not resolvable as local paths.
    pub load_external_dtd: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserConfig {
    /// Create a new parser configuration with default settings
    pub const fn new() -> Self {
        Self {
            load_external_dtd: true,
        }
    }

    /// Set whether the external DTD subset is fetched and parsed
    pub const fn with_load_external_dtd(mut self, load: bool) -> Self {
        self.load_external_dtd = load;
        self
    }
}

/// Configuration for the DTD validator
#[derive(Debug, Clone, Copy)]
pub struct ValidatorConfig {
    /// Stop at the first validity failure instead of accumulating all of
    /// them (default: false)
    pub fail_fast: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidatorConfig {
    /// Create a new validator configuration with default settings
    pub const fn new() -> Self {
        Self { fail_fast: false }
    }

    /// Set whether validation stops at the first failure
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}
