// Chain rendering
// Multi-line text form of an error and everything that caused it

use std::borrow::Cow;
use std::error::Error as StdError;

use crate::cause::{find_structured, Cause, DYN_ERROR_NAME};
use crate::data::ExtraData;
use crate::StructuredError;

const CAUSE_MARKER: &str = "---> ";
const TRACE_SEPARATOR: &str = "--";

/// One error in a cause chain.
///
/// Structured errors carry data and traces; anything else only has a type
/// name and a message.
#[derive(Clone, Copy)]
pub enum Link<'a> {
    Structured(&'a StructuredError),
    Foreign {
        type_name: &'static str,
        error: &'a (dyn StdError + 'static),
    },
}

impl<'a> Link<'a> {
    fn from_cause(cause: &'a Cause) -> Self {
        match cause.as_structured() {
            Some(structured) => Link::Structured(structured),
            None => Link::Foreign {
                type_name: cause.type_name(),
                error: cause.as_error(),
            },
        }
    }

    /// Classify an error reached through a trait object.
    pub fn from_dyn(error: &'a (dyn StdError + 'static)) -> Self {
        match find_structured(error) {
            Some(structured) => Link::Structured(structured),
            None => Link::Foreign {
                type_name: DYN_ERROR_NAME,
                error,
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        match *self {
            Link::Structured(e) => e.kind().type_name(),
            Link::Foreign { type_name, .. } => type_name,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match *self {
            Link::Structured(e) => e.kind().short_name(),
            Link::Foreign { type_name, .. } => {
                type_name.rsplit("::").next().unwrap_or(type_name)
            }
        }
    }

    pub fn message(&self) -> Cow<'a, str> {
        match *self {
            Link::Structured(e) => Cow::Borrowed(e.message()),
            Link::Foreign { error, .. } => Cow::Owned(error.to_string()),
        }
    }

    pub fn data(&self) -> Option<&'a ExtraData> {
        match *self {
            Link::Structured(e) => Some(e.data()),
            Link::Foreign { .. } => None,
        }
    }

    pub fn trace(&self) -> Option<&'a str> {
        match *self {
            Link::Structured(e) => e.trace(),
            Link::Foreign { .. } => None,
        }
    }

    /// The error that caused this one.
    pub fn next(&self) -> Option<Link<'a>> {
        match *self {
            Link::Structured(e) => e.cause().map(Link::from_cause),
            Link::Foreign { error, .. } => error.source().map(Link::from_dyn),
        }
    }
}

/// Iterator over a cause chain, outermost first.
pub struct Chain<'a> {
    next: Option<Link<'a>>,
}

impl<'a> Chain<'a> {
    pub fn new(head: Link<'a>) -> Self {
        Self { next: Some(head) }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = Link<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.next();
        Some(current)
    }
}

/// Render a structured error and its cause chain.
pub fn render(error: &StructuredError) -> String {
    render_link(Link::Structured(error))
}

/// Render any error chain. Structured errors anywhere in the chain keep
/// their data and traces.
pub fn render_error(error: &(dyn StdError + 'static)) -> String {
    render_link(Link::from_dyn(error))
}

fn render_link(head: Link<'_>) -> String {
    let mut out = String::new();
    write_link(&mut out, head, 0);
    out
}

fn write_link(out: &mut String, link: Link<'_>, depth: usize) {
    out.push_str(link.type_name());
    out.push_str(": ");
    out.push_str(&link.message());
    out.push('\n');

    if let Some(data) = link.data() {
        write_additional_info(out, data);
    }

    if let Some(next) = link.next() {
        out.push_str(CAUSE_MARKER);
        write_link(out, next, depth + 1);
    }

    // Traces for the whole chain are appended once, after the last cause.
    if depth == 0 {
        write_stack_traces(out, link);
    }
}

fn write_additional_info(out: &mut String, data: &ExtraData) {
    let entries = data.displayable_entries();
    if entries.is_empty() {
        return;
    }
    out.push('[');
    out.push_str(&entries.join(", "));
    out.push(']');
    out.push('\n');
}

fn write_stack_traces(out: &mut String, head: Link<'_>) {
    let mut has_traces = false;

    for link in Chain::new(head) {
        let Some(trace) = link.trace() else {
            continue;
        };
        has_traces = true;
        out.push_str(TRACE_SEPARATOR);
        out.push_str(link.short_name());
        out.push('\n');
        for line in trace.split('\n') {
            let trimmed = line.trim_end();
            if !trimmed.is_empty() {
                out.push_str(trimmed);
                out.push('\n');
            }
        }
    }

    if has_traces && out.ends_with('\n') {
        out.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_bare_error_renders_header_only() {
        let err = StructuredError::new("Test error message");
        assert_eq!(render(&err), "xcp_error::DetailedError: Test error message\n");
    }

    #[test]
    fn test_info_block_uses_insertion_order() {
        let err = StructuredError::new("msg")
            .with_data("Z", "last-key-first")
            .with_code("C");
        assert_eq!(
            render(&err),
            "xcp_error::DetailedError: msg\n[Z: \"last-key-first\", Code: \"C\"]\n"
        );
    }

    #[test]
    fn test_chain_marker_precedes_each_cause() {
        let inner = ErrorKind::InvalidOperation.error();
        let outer = ErrorKind::Argument.caused_by(inner);
        assert_eq!(
            render(&outer),
            "xcp_error::ArgumentError: Invalid argument value\n\
             [Code: \"ARG_ERROR\"]\n\
             ---> xcp_error::InvalidOperationError: Operation is not valid due to the current state of the object.\n\
             [Code: \"INVALID_OPERATION\"]\n"
        );
    }

    #[test]
    fn test_trace_lines_are_trimmed_and_last_newline_dropped() {
        let err = StructuredError::new("msg").with_trace("  at a()   \r\n\n   \n  at b()\n");
        assert_eq!(
            render(&err),
            "xcp_error::DetailedError: msg\n--DetailedError\n  at a()\n  at b()"
        );
    }

    #[test]
    fn test_empty_trace_still_emits_separator() {
        let err = StructuredError::new("msg").with_trace("   \n");
        assert_eq!(render(&err), "xcp_error::DetailedError: msg\n--DetailedError");
    }

    #[test]
    fn test_chain_iterator_walks_outer_to_inner() {
        let c = StructuredError::new("C");
        let b = StructuredError::with_cause("B", c);
        let a = StructuredError::with_cause("A", b);
        let messages: Vec<_> = a.chain().map(|link| link.message().into_owned()).collect();
        assert_eq!(messages, vec!["A", "B", "C"]);
    }
}
