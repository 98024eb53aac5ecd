//! Validator configuration.

use crate::version::FileFormatVersion;

/// Error cap used when none is configured, matching the Open XML SDK default.
pub const DEFAULT_MAX_ERRORS: usize = 1000;

/// Options for [`OpenXmlValidator`](super::OpenXmlValidator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Compatibility version whose markup is considered valid
    pub version: FileFormatVersion,

    /// Stop after this many findings; `0` means unlimited
    pub max_errors: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            version: FileFormatVersion::newest(),
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }
}

impl ValidatorOptions {
    /// Create options for a version with the default error cap.
    pub fn new(version: FileFormatVersion) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    /// Set the compatibility version.
    pub fn with_version(mut self, version: FileFormatVersion) -> Self {
        self.version = version;
        self
    }

    /// Set the error cap.
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}
