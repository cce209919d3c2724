//! Logging and error reporting for the board server.
//!
//! Store failures and unreadable assets are the only server errors the board
//! produces; they reach Sentry through [`crate::error::AppError`] and as
//! `ERROR` events from the tracing layer installed here. Everything else is
//! local log output in the format picked by `BOARD_LOG_FORMAT`.

use sentry::integrations::tracing::{self as sentry_tracing, EventFilter};
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{BoardConfig, LogFormat};

/// Log directives used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "message_board_web=info,tower_http=debug";

/// Start the Sentry client when `SENTRY_DSN` is configured.
///
/// The guard flushes pending events on drop, so `main` holds it until the
/// server has stopped. Returns `None` when error reporting is off.
#[must_use]
pub fn init_sentry(config: &BoardConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;

    let options = sentry::ClientOptions {
        release: sentry::release_name!(),
        environment: config
            .sentry_environment
            .clone()
            .map(std::borrow::Cow::Owned),
        sample_rate: config.sentry_sample_rate,
        traces_sample_rate: config.sentry_traces_sample_rate,
        attach_stacktrace: true,
        ..Default::default()
    };

    Some(sentry::init((dsn, options)))
}

/// How a tracing event at `level` is forwarded to Sentry.
///
/// Warnings and errors (failed reads, failed inserts, missing asset) become
/// events; info and debug lines ride along as breadcrumbs.
#[must_use]
pub fn sentry_filter_for(level: &Level) -> EventFilter {
    match *level {
        Level::ERROR | Level::WARN => EventFilter::Event,
        Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
        _ => EventFilter::Ignore,
    }
}

/// Install the global subscriber: `RUST_LOG` filter, pretty or JSON output,
/// and the Sentry bridge.
pub fn init_tracing(config: &BoardConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let (pretty, json) = match config.log_format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty)
        .with(json)
        .with(
            sentry_tracing::layer().event_filter(|metadata| sentry_filter_for(metadata.level())),
        )
        .init();
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn memory_config(extra: &[(&str, &str)]) -> BoardConfig {
        BoardConfig::from_lookup(|key| {
            if key == "BOARD_STORE" {
                return Some("memory".to_string());
            }
            extra
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        })
        .unwrap()
    }

    #[test]
    fn test_sentry_disabled_without_dsn() {
        assert!(init_sentry(&memory_config(&[])).is_none());
        assert!(init_sentry(&memory_config(&[("SENTRY_DSN", "")])).is_none());
    }

    #[test]
    fn test_errors_and_warnings_become_sentry_events() {
        assert!(format!("{:?}", sentry_filter_for(&Level::ERROR)).contains("Event"));
        assert!(format!("{:?}", sentry_filter_for(&Level::WARN)).contains("Event"));
    }

    #[test]
    fn test_info_and_debug_become_breadcrumbs() {
        assert!(format!("{:?}", sentry_filter_for(&Level::INFO)).contains("Breadcrumb"));
        assert!(format!("{:?}", sentry_filter_for(&Level::DEBUG)).contains("Breadcrumb"));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(DEFAULT_LOG_FILTER.parse::<EnvFilter>().is_ok());
    }
}
