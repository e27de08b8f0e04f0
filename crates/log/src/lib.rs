//! # tradepool-log
//!
//! Subscriber setup for tradepool binaries. Libraries only emit `tracing`
//! events; this crate decides where they go.
//!
//! ```rust,no_run
//! let _guard = tradepool_log::init()?;
//! tracing::info!(pools = 6, "registry ready");
//! # Ok::<(), tradepool_log::LogError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, FORMAT_ENV, Format, LEVEL_ENV};
pub use error::{LogError, LogResult};

/// Initialize from the environment (see [`Config::from_env`])
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::from_env())
}

/// Initialize with custom configuration
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
