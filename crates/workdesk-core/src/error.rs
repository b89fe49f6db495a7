//! Error types and handling for workdesk-core operations.
//!
//! Errors are categorized for easier handling and carry a recoverability hint
//! so callers can decide whether surfacing a "try again later" message makes sense.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: File system operations, disk access
//! - **Network Errors**: HTTP transport failures talking to the notes service
//! - **API Errors**: Non-success responses returned by the notes service
//! - **Storage Errors**: Document cache operations
//! - **Configuration Errors**: Invalid settings, config files or missing tokens
//!
//! Cache read problems never show up here: a missing, malformed or expired
//! cache entry is reported as a miss, not as an error.
//!
//! ```rust
//! use workdesk_core::Error;
//!
//! let err = Error::Api { status: 503, message: "service unavailable".to_string() };
//! assert!(err.is_recoverable());
//! assert_eq!(err.category(), "api");
//! ```

use thiserror::Error;

/// The main error type for workdesk-core operations.
///
/// All fallible public functions in workdesk-core return `Result<T, Error>`.
/// The error chain is preserved through `source()` for the wrapped I/O and
/// transport errors.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers file system operations like reading config files or creating
    /// directories. The underlying `std::io::Error` is preserved.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Connection, TLS and timeout failures while talking to the notes service.
    /// Connection and timeout errors are typically recoverable.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The notes service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// Response content did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Document cache operation failed.
    ///
    /// ## Common Causes
    ///
    /// - Cache directory cannot be created or is not writable
    /// - Disk space exhaustion while committing an entry
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in the config file
    /// - Malformed notes service URL
    /// - Integration token environment variable not set
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A cache key cannot be mapped to a file name.
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might go away if the operation is attempted again later.
    ///
    /// Returns `true` for transport timeouts and connection failures, interrupted
    /// I/O, rate limiting (429) and server-side (5xx) API responses.
    ///
    /// ```rust
    /// use workdesk_core::Error;
    /// use std::io;
    ///
    /// assert!(Error::Io(io::Error::new(io::ErrorKind::Interrupted, "interrupted")).is_recoverable());
    /// assert!(Error::Api { status: 429, message: "slow down".into() }.is_recoverable());
    /// assert!(!Error::Api { status: 401, message: "unauthorized".into() }.is_recoverable());
    /// assert!(!Error::Config("missing token".into()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful as a structured logging field:
    ///
    /// ```rust
    /// use workdesk_core::Error;
    ///
    /// let err = Error::NotFound("page abc".to_string());
    /// tracing::warn!(category = err.category(), "{err}");
    /// ```
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Api { .. } => "api",
            Self::Parse(_) => "parse",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidKey(_) => "invalid_key",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
