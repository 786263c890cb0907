// Error conversion utilities
// Lifting foreign errors and results into structured errors

use crate::cause::Cause;
use crate::kind::{codes, ErrorKind};
use crate::{Result, StructuredError};

/// Trait for converting an error into a [`StructuredError`]
pub trait IntoStructured {
    /// Convert the error, keeping it as the cause where it is foreign
    fn into_structured(self) -> StructuredError;
}

impl IntoStructured for StructuredError {
    fn into_structured(self) -> StructuredError {
        self
    }
}

impl IntoStructured for std::io::Error {
    fn into_structured(self) -> StructuredError {
        StructuredError::with_cause("IO error", self).with_code(codes::EXTERNAL_IO)
    }
}

impl IntoStructured for serde_json::Error {
    fn into_structured(self) -> StructuredError {
        StructuredError::with_cause("Serialization error", self).with_code(codes::EXTERNAL_SERDE)
    }
}

impl IntoStructured for anyhow::Error {
    fn into_structured(self) -> StructuredError {
        match self.downcast::<StructuredError>() {
            Ok(structured) => structured,
            Err(other) => StructuredError::with_cause("External error", Cause::from_anyhow(other))
                .with_code(codes::EXTERNAL_OTHER),
        }
    }
}

impl IntoStructured for String {
    fn into_structured(self) -> StructuredError {
        StructuredError::new(self).with_code(codes::EXTERNAL_OTHER)
    }
}

impl IntoStructured for &str {
    fn into_structured(self) -> StructuredError {
        StructuredError::new(self).with_code(codes::EXTERNAL_OTHER)
    }
}

/// Helper function to convert any supported error to a StructuredError
pub fn to_structured<E: IntoStructured>(err: E) -> StructuredError {
    err.into_structured()
}

/// Helper function to convert a Result with any supported error type
pub fn map_error<T, E: IntoStructured>(result: std::result::Result<T, E>) -> Result<T> {
    result.map_err(IntoStructured::into_structured)
}

/// Wrap the error of a result as the cause of a new structured error
pub trait ResultExt<T> {
    /// Wrap using the kind's default message
    fn wrap_err(self, kind: ErrorKind) -> Result<T>;

    /// Wrap using a caller-built error; the closure receives the cause
    fn wrap_err_with<F>(self, f: F) -> Result<T>
    where
        F: FnOnce(Cause) -> StructuredError;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Cause>,
{
    fn wrap_err(self, kind: ErrorKind) -> Result<T> {
        self.map_err(|err| kind.caused_by(err))
    }

    fn wrap_err_with<F>(self, f: F) -> Result<T>
    where
        F: FnOnce(Cause) -> StructuredError,
    {
        self.map_err(|err| f(err.into()))
    }
}
