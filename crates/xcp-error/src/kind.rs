// Error kinds
// The built-in fault categories and the defaults each one presets

use std::fmt;

use crate::cause::Cause;
use crate::StructuredError;

/// Built-in error codes
pub mod codes {
    // Variant defaults
    pub const ARG_ERROR: &str = "ARG_ERROR";
    pub const ARG_NULL: &str = "ARG_NULL";
    pub const ARG_OUT_OF_RANGE: &str = "ARG_OUT_OF_RANGE";
    pub const INVALID_OPERATION: &str = "INVALID_OPERATION";
    pub const OBJ_DISPOSED: &str = "OBJ_DISPOSED";

    // Used when lifting foreign errors
    pub const EXTERNAL_IO: &str = "EXTERNAL_IO";
    pub const EXTERNAL_SERDE: &str = "EXTERNAL_SERDE";
    pub const EXTERNAL_OTHER: &str = "EXTERNAL_OTHER";
}

/// The category a [`StructuredError`] was constructed as.
///
/// Kinds only preset a default code and message. Every kind shares the same
/// storage and rendering, so a chain can freely mix them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Generic error; the caller supplies the message and any code.
    Detailed,
    /// An argument had an invalid value.
    Argument,
    /// An argument was null or missing.
    ArgumentNull,
    /// An argument fell outside its valid range.
    ArgumentOutOfRange,
    /// The operation is not valid for the current state.
    InvalidOperation,
    /// An object was used after being disposed.
    ObjectDisposed,
}

impl ErrorKind {
    /// All kinds, in declaration order.
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::Detailed,
        ErrorKind::Argument,
        ErrorKind::ArgumentNull,
        ErrorKind::ArgumentOutOfRange,
        ErrorKind::InvalidOperation,
        ErrorKind::ObjectDisposed,
    ];

    /// Code preset by the constructors, if the kind has one.
    pub fn default_code(&self) -> Option<&'static str> {
        match self {
            ErrorKind::Detailed => None,
            ErrorKind::Argument => Some(codes::ARG_ERROR),
            ErrorKind::ArgumentNull => Some(codes::ARG_NULL),
            ErrorKind::ArgumentOutOfRange => Some(codes::ARG_OUT_OF_RANGE),
            ErrorKind::InvalidOperation => Some(codes::INVALID_OPERATION),
            ErrorKind::ObjectDisposed => Some(codes::OBJ_DISPOSED),
        }
    }

    /// Message used by the constructors that take none.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::Detailed => "Unspecified error",
            ErrorKind::Argument => "Invalid argument value",
            ErrorKind::ArgumentNull => "Value cannot be null",
            ErrorKind::ArgumentOutOfRange => {
                "Specified argument was out of the range of valid values"
            }
            ErrorKind::InvalidOperation => {
                "Operation is not valid due to the current state of the object."
            }
            ErrorKind::ObjectDisposed => "The object has been disposed and cannot be used.",
        }
    }

    /// Fully-qualified name shown in rendered headers.
    pub fn type_name(&self) -> &'static str {
        match self {
            ErrorKind::Detailed => concat!(env!("CARGO_CRATE_NAME"), "::DetailedError"),
            ErrorKind::Argument => concat!(env!("CARGO_CRATE_NAME"), "::ArgumentError"),
            ErrorKind::ArgumentNull => concat!(env!("CARGO_CRATE_NAME"), "::ArgumentNullError"),
            ErrorKind::ArgumentOutOfRange => {
                concat!(env!("CARGO_CRATE_NAME"), "::ArgumentOutOfRangeError")
            }
            ErrorKind::InvalidOperation => {
                concat!(env!("CARGO_CRATE_NAME"), "::InvalidOperationError")
            }
            ErrorKind::ObjectDisposed => concat!(env!("CARGO_CRATE_NAME"), "::ObjectDisposedError"),
        }
    }

    /// Unqualified name, used for stack-trace separators.
    pub fn short_name(&self) -> &'static str {
        let full = self.type_name();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Construct with the default message and no cause.
    pub fn error(self) -> StructuredError {
        StructuredError::from_parts(self, self.default_message(), None)
    }

    /// Construct with a caller-supplied message and no cause.
    pub fn with_message(self, message: impl Into<String>) -> StructuredError {
        StructuredError::from_parts(self, message, None)
    }

    /// Construct with the default message, wrapping `cause`.
    pub fn caused_by(self, cause: impl Into<Cause>) -> StructuredError {
        StructuredError::from_parts(self, self.default_message(), Some(cause.into()))
    }

    /// Construct with a caller-supplied message, wrapping `cause`.
    pub fn with_message_and_cause(
        self,
        message: impl Into<String>,
        cause: impl Into<Cause>,
    ) -> StructuredError {
        StructuredError::from_parts(self, message, Some(cause.into()))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
