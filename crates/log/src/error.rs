//! Logger setup errors

/// Result type for logger setup
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while building or installing the subscriber
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The level directive could not be parsed
    #[error("invalid filter '{filter}': {reason}")]
    Filter {
        /// Directive as given
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already installed
    #[error("failed to install logger: {0}")]
    Init(String),
}

impl LogError {
    /// Create a filter error
    pub fn filter(filter: impl Into<String>, reason: impl ToString) -> Self {
        Self::Filter {
            filter: filter.into(),
            reason: reason.to_string(),
        }
    }
}
