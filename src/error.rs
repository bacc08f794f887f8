//! Error types for the hub core.
//!
//! [`HubError`] is the error surfaced to callers of the network helpers and
//! the binary. [`StorageError`] describes failures of a
//! [`crate::persistence::KeyValueStore`] backend; it never escapes
//! [`crate::persistence::TokenStore`], which degrades every failure to a
//! `bool` or `None` result.

/// Failure of a durable key/value backend.
///
/// # Error Codes
///
/// | Code | Variant       |
/// |------|---------------|
/// | 3001 | `Unavailable` |
/// | 3002 | `QuotaExceeded` |
/// | 3003 | `Io`          |
/// | 3004 | `Poisoned`    |
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled or not reachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the backend's quota.
    #[error("storage quota exceeded: {needed} bytes needed, {limit} bytes allowed")]
    QuotaExceeded {
        /// Total bytes the store would hold after the write.
        needed: usize,
        /// Configured byte limit.
        limit: usize,
    },

    /// Underlying filesystem failure.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding the backend was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Unavailable(_) => 3001,
            Self::QuotaExceeded { .. } => 3002,
            Self::Io(_) => 3003,
            Self::Poisoned => 3004,
        }
    }
}

/// Errors returned by the hub's fallible public operations.
///
/// # Error Code Ranges
///
/// | Range     | Category      |
/// |-----------|---------------|
/// | 1000–1999 | Configuration |
/// | 2000–2999 | Network       |
/// | 3000–3999 | Storage       |
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// The server answered with a status outside the 2xx range.
    #[error("HTTP {status}")]
    Http {
        /// HTTP status code of the response.
        status: u16,
    },

    /// The response body was not valid JSON for the requested type.
    #[error("invalid JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request could not be sent or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The resolved endpoint is not a valid URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// A storage backend failed where the caller asked for the raw error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl HubError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Config(_) => 1001,
            Self::InvalidUrl(_) => 1002,
            Self::Http { .. } => 2001,
            Self::Parse(_) => 2002,
            Self::Transport(_) => 2003,
            Self::Storage(e) => e.error_code(),
        }
    }

    /// Returns the HTTP status carried by an [`HubError::Http`] failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}
