// Xcp Structured Errors
// Error values with codes, contextual data, cause chains and a readable rendering

// Re-export for the logging macros
pub use tracing;
// Extra data value type
pub use serde_json::Value;

// Module structure
mod macros;
mod error;
mod trace;

pub mod cause;
pub mod config;
pub mod conversion;
pub mod data;
pub mod kind;
pub mod logging;
pub mod render;

// Public exports
pub use cause::Cause;
pub use config::{Config, ConfigError, TraceCapture};
pub use conversion::{map_error, to_structured, IntoStructured, ResultExt};
pub use data::{keys, ExtraData};
pub use error::StructuredError;
pub use kind::{codes, ErrorKind};
pub use render::{render, render_error, Chain, Link};
pub use trace::capture as capture_trace;

/// Standard Result type using StructuredError
pub type Result<T> = std::result::Result<T, StructuredError>;
