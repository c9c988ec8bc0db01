//! Error types for permtree.
//!
//! Only two kinds of failure exist in the tree algorithms themselves:
//! invalid arguments (an empty lookup path, an empty path segment) and
//! unsupported naming-scheme values. Everything else here serves the
//! definition-file loader.
//!
//! "Not found" is deliberately absent: lookups return `Option`.

use std::path::{Path, PathBuf};

/// Errors that can occur in permtree operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A caller passed an argument the operation cannot accept.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument
        message: String,
    },

    /// A naming scheme contained a value that is neither a string nor an object.
    #[error("Type '{kind}' of '{property}' property not supported")]
    UnsupportedScheme {
        /// Property holding the offending value
        property: String,
        /// Kind of the offending value (e.g. "number")
        kind: String,
    },

    /// Configuration / definition file error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error while touching a file
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File the error relates to
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience `Result` type alias for permtree operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new invalid-argument error.
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a new unsupported-scheme error.
    pub fn unsupported_scheme<P, K>(property: P, kind: K) -> Self
    where
        P: Into<String>,
        K: Into<String>,
    {
        Error::UnsupportedScheme {
            property: property.into(),
            kind: kind.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred at.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns `true` if this error was caused by bad caller input
    /// rather than by the environment.
    pub fn is_caller_error(&self) -> bool {
        match self {
            Error::InvalidArgument { .. } => true,
            Error::UnsupportedScheme { .. } => true,
            Error::Config { .. } => true,
            Error::Toml(_) => true,
            Error::Serialization(_) => true,
            Error::Io { .. } => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = Error::invalid_argument("Path should contain at least 1 fragment");
        assert_eq!(
            err.to_string(),
            "Invalid argument: Path should contain at least 1 fragment"
        );
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_unsupported_scheme_display() {
        let err = Error::unsupported_scheme("retries", "number");
        assert_eq!(
            err.to_string(),
            "Type 'number' of 'retries' property not supported"
        );
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("unknown field `grant`");
        assert_eq!(err.to_string(), "Configuration error: unknown field `grant`");
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_io_with_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io_with_path(io, "/tmp/permtree.toml");
        assert!(err.to_string().contains("/tmp/permtree.toml"));
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: Error = serde_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
