// Extra data
// Insertion-ordered key/value storage shared by reserved and custom fields

use indexmap::IndexMap;
use serde_json::Value;

/// Reserved keys backing the typed accessors on `StructuredError`
pub mod keys {
    pub const CODE: &str = "Code";
    pub const CONTEXT: &str = "Context";
    pub const MEMBER: &str = "Member";
    pub const LINE: &str = "Line";
    pub const PARAM: &str = "Param";
    pub const ACTUAL_VALUE: &str = "ActualValue";
    pub const OBJECT: &str = "Object";
}

/// Open-ended data attached to an error.
///
/// Keys are case-sensitive and unique. Iteration follows first insertion;
/// overwriting a key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraData {
    entries: IndexMap<String, Value>,
}

impl ExtraData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Value under `key` if it holds a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Insert or overwrite, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries that have something to show, formatted as `key: "value"`.
    ///
    /// Null values and values whose text is empty are skipped. Whitespace
    /// is kept as-is.
    pub fn displayable_entries(&self) -> Vec<String> {
        self.iter()
            .filter_map(|(key, value)| {
                let text = value_text(value)?;
                if text.is_empty() {
                    None
                } else {
                    Some(format!("{}: \"{}\"", key, text))
                }
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ExtraData {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Text form of a data value; `None` for null.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
