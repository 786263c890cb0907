// Call-stack capture
// Snapshots attached at the moment an error is raised

use std::backtrace::{Backtrace, BacktraceStatus};

use crate::config::{self, TraceCapture};
use crate::StructuredError;

/// Capture the current call stack as text, if `policy` allows it and the
/// platform supports it.
pub fn capture(policy: TraceCapture) -> Option<String> {
    let backtrace = match policy {
        TraceCapture::Never => return None,
        TraceCapture::Environment => Backtrace::capture(),
        TraceCapture::Always => Backtrace::force_capture(),
    };
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    }
}

impl StructuredError {
    /// Mark the error as raised.
    ///
    /// The first raise attaches a call-stack snapshot according to the
    /// installed [`config`]; later raises keep the original snapshot.
    pub fn raise(self) -> Self {
        self.raise_with(config::current().trace_capture)
    }

    /// [`Self::raise`] with an explicit capture policy.
    pub fn raise_with(mut self, policy: TraceCapture) -> Self {
        if self.trace().is_none() {
            if let Some(trace) = capture(policy) {
                self.set_trace(trace);
            }
        }
        tracing::debug!(
            code = self.code().unwrap_or_default(),
            kind = %self.kind(),
            traced = self.trace().is_some(),
            "raised: {}",
            self.message()
        );
        self
    }

    /// Whether a call-stack snapshot is attached. A raise under
    /// [`TraceCapture::Never`] attaches none; [`Self::with_trace`] attaches
    /// one without raising.
    pub fn has_trace(&self) -> bool {
        self.trace().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_never_policy_leaves_trace_absent() {
        let err = ErrorKind::Argument.error().raise_with(TraceCapture::Never);
        assert!(err.trace().is_none());
        assert!(!err.has_trace());
        assert!(!err.render().contains("--ArgumentError"));
    }

    #[test]
    fn test_always_policy_attaches_trace() {
        let err = ErrorKind::Argument.error().raise_with(TraceCapture::Always);
        // Platforms without backtrace support report Unsupported.
        if capture(TraceCapture::Always).is_some() {
            assert!(err.has_trace());
            assert!(err.render().contains("\n--ArgumentError\n"));
        }
    }

    #[test]
    fn test_second_raise_keeps_first_trace() {
        let err = StructuredError::new("msg")
            .with_trace("first")
            .raise_with(TraceCapture::Always);
        assert_eq!(err.trace(), Some("first"));
    }

    #[test]
    fn test_attached_trace_counts_without_raise() {
        let err = StructuredError::new("msg");
        assert!(!err.has_trace());
        assert!(err.with_trace("at elsewhere()").has_trace());
    }
}
