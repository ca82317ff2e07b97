//! Module for telemetry functionality such as logging

use std::str::FromStr;

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}', expected pretty or json")),
        }
    }
}

/// Sets up logging. The log level is taken from the `RUST_LOG` env variable (default is `info`).
pub fn setup_logging(format: LogFormat) -> Result<()> {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr), // so that we don't interfere with the std output
            )
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr), // so that we don't interfere with the std output
            )
            .try_init()?,
    }
    debug!(?format, "Debug mode is enabled. Record contents might be visible.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("pretty", LogFormat::Pretty)]
    #[case("JSON", LogFormat::Json)]
    #[case(" json ", LogFormat::Json)]
    fn known_formats(#[case] input: &str, #[case] expected: LogFormat) {
        assert_eq!(input.parse::<LogFormat>(), Ok(expected));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
