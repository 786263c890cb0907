// Causal link
// A shared handle to the error that caused another one

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::StructuredError;

/// Type name used when only a trait object is known.
pub(crate) const DYN_ERROR_NAME: &str = "dyn std::error::Error";

/// The inner error of a [`StructuredError`].
///
/// A cause is fixed when the outer error is built and always refers to an
/// error that already exists, so a chain can never loop back on itself.
/// Cloning a cause shares the underlying error.
#[derive(Clone)]
pub struct Cause {
    type_name: &'static str,
    error: Arc<dyn StdError + Send + Sync + 'static>,
}

impl Cause {
    /// Share one structured error between several wrappers.
    pub fn shared(error: Arc<StructuredError>) -> Self {
        Self {
            type_name: error.kind().type_name(),
            error,
        }
    }

    /// Wrap an already boxed error.
    pub fn from_boxed(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self {
            type_name: DYN_ERROR_NAME,
            error: Arc::from(error),
        }
    }

    /// Wrap an `anyhow::Error`, unwrapping a structured error it carries.
    pub fn from_anyhow(error: anyhow::Error) -> Self {
        match error.downcast::<StructuredError>() {
            Ok(structured) => Self::from(structured),
            Err(other) => {
                let boxed: Box<dyn StdError + Send + Sync + 'static> = other.into();
                Self {
                    type_name: "anyhow::Error",
                    error: Arc::from(boxed),
                }
            }
        }
    }

    /// Most specific type name known for the wrapped error.
    pub fn type_name(&self) -> &'static str {
        match self.as_structured() {
            Some(structured) => structured.kind().type_name(),
            None => self.type_name,
        }
    }

    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.error
    }

    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.error.downcast_ref::<T>()
    }

    /// The structured error behind this cause, also through an `Arc` or `Box`.
    pub fn as_structured(&self) -> Option<&StructuredError> {
        find_structured(&*self.error)
    }

    /// Whether both causes point at the same error instance.
    pub fn ptr_eq(&self, other: &Cause) -> bool {
        Arc::ptr_eq(&self.error, &other.error)
    }
}

/// Recover a structured error from a trait object. `Arc<StructuredError>`
/// and `Box<StructuredError>` are errors in their own right, so both are
/// looked through.
pub(crate) fn find_structured<'a>(
    error: &'a (dyn StdError + 'static),
) -> Option<&'a StructuredError> {
    if let Some(structured) = error.downcast_ref::<StructuredError>() {
        return Some(structured);
    }
    if let Some(shared) = error.downcast_ref::<Arc<StructuredError>>() {
        return Some(&**shared);
    }
    error
        .downcast_ref::<Box<StructuredError>>()
        .map(|boxed| &**boxed)
}

impl<E> From<E> for Cause
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self {
            type_name: std::any::type_name::<E>(),
            error: Arc::new(error),
        }
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cause")
            .field("type_name", &self.type_name())
            .field("error", &self.error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_foreign_cause_keeps_concrete_type_name() {
        let cause = Cause::from(std::io::Error::other("disk"));
        assert!(cause.type_name().starts_with("std::io::"));
        assert!(cause.downcast_ref::<std::io::Error>().is_some());
        assert!(cause.as_structured().is_none());
    }

    #[test]
    fn test_structured_cause_reports_kind_name() {
        let cause = Cause::from(ErrorKind::InvalidOperation.error());
        assert_eq!(cause.type_name(), "xcp_error::InvalidOperationError");
        assert!(cause.as_structured().is_some());
    }

    #[test]
    fn test_shared_cause_points_at_same_instance() {
        let inner = Arc::new(ErrorKind::ObjectDisposed.error());
        let a = Cause::shared(inner.clone());
        let b = Cause::shared(inner);
        assert!(a.ptr_eq(&b));

        let other = Cause::from(ErrorKind::ObjectDisposed.error());
        assert!(!a.ptr_eq(&other));
    }

    #[test]
    fn test_anyhow_cause_recovers_structured_error() {
        let err = anyhow::Error::new(ErrorKind::Argument.with_message("bad"));
        let cause = Cause::from_anyhow(err);
        assert_eq!(cause.as_structured().map(|e| e.message()), Some("bad"));

        let plain = Cause::from_anyhow(anyhow::anyhow!("plain failure"));
        assert_eq!(plain.type_name(), "anyhow::Error");
        assert_eq!(plain.as_error().to_string(), "plain failure");
    }

    #[test]
    fn test_arc_and_box_wrapped_causes_stay_structured() {
        let inner = Arc::new(ErrorKind::ObjectDisposed.error().with_object("Pool"));
        let shared = Cause::from(inner.clone());
        assert_eq!(shared.type_name(), "xcp_error::ObjectDisposedError");
        assert!(std::ptr::eq(shared.as_structured().unwrap(), &*inner));

        let boxed = Cause::from(Box::new(StructuredError::new("inner").with_code("X")));
        assert_eq!(boxed.type_name(), "xcp_error::DetailedError");
        assert_eq!(boxed.as_structured().and_then(|e| e.code()), Some("X"));
    }

    #[test]
    fn test_boxed_cause_uses_trait_object_name() {
        let boxed: Box<dyn StdError + Send + Sync> = "boxed".into();
        let cause = Cause::from_boxed(boxed);
        assert_eq!(cause.type_name(), DYN_ERROR_NAME);
    }
}
