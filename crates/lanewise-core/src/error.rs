//! Error types for lanewise-core.
//!
//! Only configuration can fail. Comparisons, masks and the sort engine have
//! no recoverable error path.

use thiserror::Error;

/// Lanewise error types.
#[derive(Error, Debug)]
pub enum Error {
    /// A disable list named a target that does not exist.
    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    /// The portable scalar target is the last resort and cannot be excluded.
    #[error("The scalar target cannot be disabled")]
    ScalarNotDisableable,

    /// Runtime configuration arrived after the capability probe already ran.
    #[error("Target registry already probed; configure dispatch before the first call")]
    RegistryFrozen,

    /// No compiled kernel exists for a routine on any supported target.
    #[error("No compiled variant of `{0}` on any supported target")]
    NoVariant(&'static str),

    /// Configuration loading or extraction failed.
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Configuration could not be rendered as TOML.
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Result type alias for lanewise operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownTarget("avx1024".to_string());
        assert_eq!(err.to_string(), "Unknown target: avx1024");

        let err = Error::NoVariant("sort_i32_desc");
        assert_eq!(
            err.to_string(),
            "No compiled variant of `sort_i32_desc` on any supported target"
        );
    }

    #[test]
    fn test_error_from_figment() {
        let figment_err = figment::Error::from("missing field".to_string());
        let err: Error = figment_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
