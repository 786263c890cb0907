//! Config read from the environment
//!
//! Kept in its own test binary: the environment is process-wide and
//! `config::current` reads it only once.

use std::env;

use xcp_error::config::{self, Config, ConfigError, TraceCapture, TRACE_CAPTURE_ENV};
use xcp_error::StructuredError;

#[test]
fn test_from_env_and_fallback_without_install() {
    env::remove_var(TRACE_CAPTURE_ENV);
    assert_eq!(Config::from_env().unwrap(), Config::default());

    env::set_var(TRACE_CAPTURE_ENV, "sometimes");
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::InvalidValue { key, .. }) if key == TRACE_CAPTURE_ENV
    ));

    env::set_var(TRACE_CAPTURE_ENV, "env");
    assert_eq!(Config::from_env().unwrap().trace_capture, TraceCapture::Environment);

    env::set_var(TRACE_CAPTURE_ENV, " OFF ");
    assert_eq!(Config::from_env().unwrap().trace_capture, TraceCapture::Never);

    // Nothing installed, so the environment decides.
    assert_eq!(config::current().trace_capture, TraceCapture::Never);

    let raised = StructuredError::new("not traced").raise();
    assert!(raised.trace().is_none());
    assert!(!raised.has_trace());
}
