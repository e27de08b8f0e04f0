//! Logger builder implementation

use tracing::Dispatch;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Handle for an installed logger.
///
/// The subscriber stays installed for the rest of the process; the guard
/// records what was installed.
#[derive(Debug)]
#[must_use = "dropping the guard immediately hides which logger was installed"]
pub struct LoggerGuard {
    config: Config,
}

impl LoggerGuard {
    /// Configuration the logger was built from
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build the subscriber without installing it.
    ///
    /// Events are written to stderr so stdout stays free for program output.
    pub fn dispatch(&self) -> LogResult<Dispatch> {
        let filter = EnvFilter::try_new(&self.config.level)
            .map_err(|e| LogError::filter(&self.config.level, e))?;
        let registry = Registry::default().with(filter);

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(self.config.ansi)
            .with_target(self.config.target);

        let dispatch = match self.config.format {
            Format::Pretty => Dispatch::new(registry.with(layer.pretty())),
            Format::Compact => Dispatch::new(registry.with(layer.compact())),
            Format::Json => Dispatch::new(
                registry.with(layer.json().with_current_span(true).flatten_event(true)),
            ),
        };
        Ok(dispatch)
    }

    /// Build and install the logger as the global default
    pub fn build(self) -> LogResult<LoggerGuard> {
        let dispatch = self.dispatch()?;
        tracing::dispatcher::set_global_default(dispatch)
            .map_err(|e| LogError::Init(e.to_string()))?;

        tracing::debug!(level = %self.config.level, format = ?self.config.format, "logger installed");
        Ok(LoggerGuard {
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Format::Pretty)]
    #[case(Format::Compact)]
    #[case(Format::Json)]
    fn every_format_builds(#[case] format: Format) {
        let builder = LoggerBuilder::from_config(Config {
            format,
            ..Config::default()
        });
        let dispatch = builder.dispatch().unwrap();
        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!(pool = "orders", "event through {format:?}");
        });
    }

    #[test]
    fn bad_directive_is_filter_error() {
        let builder = LoggerBuilder::from_config(Config {
            level: "tradepool=notalevel".to_string(),
            ..Config::default()
        });
        assert!(matches!(
            builder.dispatch(),
            Err(LogError::Filter { ref filter, .. }) if filter == "tradepool=notalevel"
        ));
    }

    #[test]
    fn second_install_is_init_error() {
        let first = LoggerBuilder::from_config(Config::default()).build();
        assert!(first.is_ok());
        assert_eq!(first.unwrap().config(), &Config::default());

        let second = LoggerBuilder::from_config(Config::default()).build();
        assert!(matches!(second, Err(LogError::Init(_))));
    }
}
