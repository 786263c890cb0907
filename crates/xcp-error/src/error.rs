// Structured error
// The single concrete error type behind every kind

use std::error::Error as StdError;
use std::fmt;

use serde_json::Value;

use crate::cause::Cause;
use crate::data::{keys, ExtraData};
use crate::kind::ErrorKind;
use crate::render::{self, Chain, Link};

/// Generates get/set/with accessors over a reserved extra-data key.
macro_rules! reserved_field {
    ($(#[$doc:meta])* $get:ident, $set:ident, $with:ident => $key:expr) => {
        $(#[$doc])*
        ///
        /// Only string values are returned. A non-string value stored under
        /// this key through [`Self::set_data`] still renders, and is read back
        /// with [`Self::get_data`].
        pub fn $get(&self) -> Option<&str> {
            self.data.get_str($key)
        }

        #[doc = concat!("Store under the `", stringify!($key), "` key.")]
        pub fn $set(&mut self, value: impl Into<String>) {
            self.data.insert($key, Value::String(value.into()));
        }

        #[doc = concat!("Builder form of [`Self::", stringify!($set), "`].")]
        pub fn $with(mut self, value: impl Into<String>) -> Self {
            self.$set(value);
            self
        }
    };
}

/// An error with a code, contextual data and an optional cause.
///
/// Message and cause are fixed at construction. Everything else lives in an
/// insertion-ordered [`ExtraData`] map, including the reserved fields exposed
/// through typed accessors, so the rendered order is the order fields were
/// first set.
///
/// `Display` renders the whole chain; use [`StructuredError::message`] for
/// the bare message.
#[derive(Debug, Clone)]
pub struct StructuredError {
    kind: ErrorKind,
    message: String,
    cause: Option<Cause>,
    data: ExtraData,
    trace: Option<String>,
}

impl StructuredError {
    /// Create a generic error with no code.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_parts(ErrorKind::Detailed, message, None)
    }

    /// Create a generic error wrapping `cause`.
    pub fn with_cause(message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self::from_parts(ErrorKind::Detailed, message, Some(cause.into()))
    }

    pub(crate) fn from_parts(
        kind: ErrorKind,
        message: impl Into<String>,
        cause: Option<Cause>,
    ) -> Self {
        let mut data = ExtraData::new();
        if let Some(code) = kind.default_code() {
            data.insert(keys::CODE, code);
        }
        Self {
            kind,
            message: message.into(),
            cause,
            data,
            trace: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Structured cause, if the cause is one.
    pub fn structured_cause(&self) -> Option<&StructuredError> {
        self.cause.as_ref().and_then(Cause::as_structured)
    }

    reserved_field!(
        /// Machine-readable category.
        code, set_code, with_code => keys::CODE
    );
    reserved_field!(
        /// Logical context the error was raised in.
        context, set_context, with_context => keys::CONTEXT
    );
    reserved_field!(
        /// Member (function, method) that raised the error.
        member, set_member, with_member => keys::MEMBER
    );
    reserved_field!(
        /// Source line that raised the error.
        line, set_line, with_line => keys::LINE
    );
    reserved_field!(
        /// Name of the offending argument.
        param, set_param, with_param => keys::PARAM
    );
    reserved_field!(
        /// Value of an out-of-range argument.
        actual_value, set_actual_value, with_actual_value => keys::ACTUAL_VALUE
    );
    reserved_field!(
        /// Name of the disposed object.
        object, set_object, with_object => keys::OBJECT
    );

    pub fn data(&self) -> &ExtraData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ExtraData {
        &mut self.data
    }

    pub fn get_data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Store any value under `key`. `Value::Null` and `""` are kept but never rendered.
    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key, value);
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_data(key, value);
        self
    }

    pub fn remove_data(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Call-stack snapshot attached when the error was raised.
    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }

    /// Attach a snapshot captured elsewhere, replacing any existing one.
    pub fn set_trace(&mut self, trace: impl Into<String>) {
        self.trace = Some(trace.into());
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.set_trace(trace);
        self
    }

    /// This error followed by its causes, outermost first.
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(Link::Structured(self))
    }

    /// Render this error and its whole cause chain.
    pub fn render(&self) -> String {
        render::render(self)
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl StdError for StructuredError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_error() as &(dyn StdError + 'static))
    }
}
