//! Parse options

/// Options controlling how mapping sections are parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Stop at the first invalid entry.
    /// When disabled, every entry is checked, valid entries are still
    /// written, and all failures are returned together.
    /// Default: true
    pub fail_fast: bool,

    /// Log a warning when an entry replaces a value already in the table
    /// Default: false
    pub warn_on_override: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            fail_fast: true,
            warn_on_override: false,
        }
    }
}

impl ParseOptions {
    /// Abort on the first invalid entry (the default)
    pub fn strict() -> Self {
        Self::default()
    }

    /// Report every invalid entry and every override
    pub fn exhaustive() -> Self {
        Self {
            fail_fast: false,
            warn_on_override: true,
        }
    }
}
