// Logging
// Tracing setup and structured reporting of rendered errors

use std::sync::Once;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::StructuredError;

static TEST_INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` (default "info"). Set
/// `json_output` for one JSON object per event.
pub fn init_tracing(log_level: Option<&str>, json_output: Option<bool>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.unwrap_or("info")))?;

    let subscriber = Registry::default().with(env_filter);

    if json_output.unwrap_or(false) {
        let json_layer = fmt::layer().json().with_target(true).with_level(true);
        tracing::subscriber::set_global_default(subscriber.with(json_layer))?;
    } else {
        let fmt_layer = fmt::layer().with_target(true).with_level(true);
        tracing::subscriber::set_global_default(subscriber.with(fmt_layer))?;
    }

    Ok(())
}

/// Initialize test logging at debug level (once per test binary)
pub fn init_test_logging() {
    TEST_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = Registry::default()
            .with(env_filter)
            .with(fmt::layer().with_test_writer());
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

impl StructuredError {
    /// Log the full rendering as one error event, with the code and kind as
    /// fields.
    pub fn report(&self) {
        tracing::error!(
            code = self.code().unwrap_or_default(),
            kind = %self.kind(),
            "{}",
            self.render()
        );
    }

    /// [`Self::report`] with a leading message, e.g. what was being attempted.
    pub fn report_with(&self, message: impl std::fmt::Display) {
        tracing::error!(
            code = self.code().unwrap_or_default(),
            kind = %self.kind(),
            "{}: {}",
            message,
            self.render()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_init_test_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_report_does_not_panic() {
        init_test_logging();
        ErrorKind::ObjectDisposed
            .error()
            .with_object("Connection")
            .report();
        ErrorKind::Argument
            .error()
            .with_param("port")
            .report_with("Parsing listener config");
    }
}
