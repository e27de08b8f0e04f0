//! Error types for pool construction and acquisition
use thiserror::Error;

/// Boxed error produced by a fallible factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for pool operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by pools and the domain registry.
///
/// Exhaustion is never an error: an empty pool allocates instead. Releasing a
/// foreign or already-released lease is not an error either; it is reported
/// as [`Release::Ignored`](crate::Release::Ignored).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Pool configuration is invalid
    #[error("Configuration error: {message}")]
    Configuration {
        /// The error message
        message: String,
    },

    /// The entry factory failed while warming up or serving an acquire
    #[error("Factory failed for pool '{pool}': {source}")]
    Factory {
        /// Name of the pool whose factory failed
        pool: String,
        /// The error returned by the factory
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wrap a factory failure for the named pool
    pub fn factory<S: Into<String>>(pool: S, source: BoxError) -> Self {
        Self::Factory {
            pool: pool.into(),
            source,
        }
    }

    /// Name of the pool this error belongs to (if any)
    #[must_use]
    pub fn pool(&self) -> Option<&str> {
        match self {
            Self::Configuration { .. } => None,
            Self::Factory { pool, .. } => Some(pool),
        }
    }
}
