//! The navigable wrapper around one node of a document.
//!
//! Reads never fail: an absent key, an out-of-range index or a type mismatch
//! yields a Null child (or a zero value) and a `Warn` diagnostic. See
//! [`crate::mutate`] for the write side and [`crate::iter`] for enumeration.

use crate::diagnostic::{DiagnosticSink, Policy, Severity};
use crate::error::{DynaError, Result};
use crate::path::Seg;
use crate::value::Value;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// One node of a document plus the flags it hands down to its children.
///
/// Cloning an `Element` is cheap and shares the underlying container, like
/// cloning a [`Value`].
#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) value: Value,
    pub(crate) policy: Policy,
}

impl Element {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Wrap a pre-built value as a root element (depth 0, writable, no sink).
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            policy: Policy::default(),
        }
    }

    /// A root wrapping a fresh, empty object.
    pub fn new_object() -> Self {
        Self::new(Value::new_object())
    }

    /// A root wrapping a fresh, empty array.
    pub fn new_array() -> Self {
        Self::new(Value::new_array())
    }

    /// Parse JSON bytes into a root element.
    ///
    /// # Errors
    ///
    /// Returns [`DynaError::Parse`] if the bytes are not valid JSON.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_slice(bytes)?;
        Ok(Self::new(json))
    }

    /// Parse JSON text into a root element. Same as [`Element::parse`].
    pub fn parse_str(text: &str) -> Result<Self> {
        Self::parse(text.as_bytes())
    }

    /// Load and parse a document from an `http://`/`https://` URL or a
    /// filesystem path, with default [`Loader`](crate::Loader) options.
    pub fn load(locator: &str) -> Result<Self> {
        crate::loader::Loader::default().load(locator)
    }

    // ------------------------------------------------------------------
    // Policy
    // ------------------------------------------------------------------

    /// Attach a diagnostic sink. Children produced afterwards inherit it.
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.policy.sink = Some(Rc::new(sink));
        self
    }

    /// Set the read-only flag. Children produced afterwards inherit it.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.policy.read_only = read_only;
        self
    }

    pub fn set_sink(&mut self, sink: Option<Rc<dyn DiagnosticSink>>) {
        self.policy.sink = sink;
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.policy.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.policy.read_only
    }

    /// Number of navigation steps from the root (root = 0).
    pub fn depth(&self) -> usize {
        self.policy.depth
    }

    /// The wrapped value. Containers come back as shared handles.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub(crate) fn child(&self, value: Value) -> Element {
        Element {
            value,
            policy: self.policy.child(),
        }
    }

    pub(crate) fn warn(&self, op: &'static str, target: Option<Seg>, message: impl Into<String>) {
        self.policy.emit(Severity::Warn, op, target, message);
    }

    /// Report a hard failure to the sink and hand the error back for returning.
    pub(crate) fn fail(&self, err: DynaError, target: Option<Seg>) -> DynaError {
        let op = match &err {
            DynaError::ReadOnly { op, .. }
            | DynaError::State { op, .. }
            | DynaError::Type { op, .. }
            | DynaError::Cycle { op } => *op,
            _ => "element",
        };
        self.policy.emit(Severity::Fatal, op, target, err.to_string());
        err
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Child at `key`, or a Null child (with a warning) if this element is
    /// not an object or has no such key.
    pub fn select_by_key(&self, key: &str) -> Element {
        self.child(self.lookup_key(key).unwrap_or_default())
    }

    /// Child at `index`, or a Null child (with a warning) if this element is
    /// not an array or the index is out of range.
    pub fn select_by_index(&self, index: usize) -> Element {
        self.child(self.lookup_index(index).unwrap_or_default())
    }

    /// Child at one path step.
    pub fn select_seg(&self, seg: &Seg) -> Element {
        self.child(self.lookup(seg).unwrap_or_default())
    }

    /// Resolve a path of keys and indices left to right.
    ///
    /// Stops at the first step that is absent or type-mismatched and returns a
    /// Null child; only that step warns. An empty path warns and returns Null.
    ///
    /// ```
    /// use dynajson_core::{path, Element};
    ///
    /// let root = Element::parse_str(r#"{"a": {"b": [1, 2, 3]}}"#).unwrap();
    /// assert_eq!(root.select(["a", "b"]).count(), 3);
    /// assert_eq!(root.select("a/b".split('/')).count(), 3);
    /// assert_eq!(root.select(path!("a", "b", 0)).as_int(), 1);
    /// assert!(root.select(["a", "zzz", "b"]).is_null());
    /// ```
    pub fn select<I>(&self, path: I) -> Element
    where
        I: IntoIterator,
        I::Item: Into<Seg>,
    {
        let mut current: Option<Element> = None;
        for seg in path {
            let from = current.as_ref().unwrap_or(self);
            let next = match from.lookup(&seg.into()) {
                Some(v) => from.child(v),
                None => return from.child(Value::Null),
            };
            current = Some(next);
        }
        current.unwrap_or_else(|| {
            self.warn("select", None, "empty path");
            self.child(Value::Null)
        })
    }

    fn lookup(&self, seg: &Seg) -> Option<Value> {
        match seg {
            Seg::Key(k) => self.lookup_key(k),
            Seg::Index(i) => self.lookup_index(*i),
        }
    }

    /// Value at `key`, warning when there is none.
    fn lookup_key(&self, key: &str) -> Option<Value> {
        const OP: &str = "select_by_key";
        let found = match &self.value {
            Value::Object(obj) => obj.get(key),
            _ => None,
        };
        if found.is_none() {
            let message = match &self.value {
                Value::Object(_) => "no such key".to_string(),
                Value::Null => "null element".to_string(),
                other => format!("not an object: {}", other.type_name()),
            };
            self.warn(OP, Some(Seg::key(key)), message);
        }
        found
    }

    /// Value at `index`, warning when there is none.
    fn lookup_index(&self, index: usize) -> Option<Value> {
        const OP: &str = "select_by_index";
        let found = match &self.value {
            Value::Array(arr) => arr.get(index),
            _ => None,
        };
        if found.is_none() {
            let message = match &self.value {
                Value::Array(arr) => format!("out of range: length {}", arr.len()),
                Value::Null => "null element".to_string(),
                other => format!("not an array: {}", other.type_name()),
            };
            self.warn(OP, Some(Seg::index(index)), message);
        }
        found
    }

    /// Entry count of a container; 1 for any other non-null value.
    /// Null counts as 0 and warns.
    pub fn count(&self) -> usize {
        match &self.value {
            Value::Object(obj) => obj.len(),
            Value::Array(arr) => arr.len(),
            Value::Null => {
                self.warn("count", None, "null element");
                0
            }
            _ => 1,
        }
    }

    /// Keys of an object; empty (with a warning) for anything else.
    pub fn keys(&self) -> Vec<String> {
        match &self.value {
            Value::Object(obj) => obj.keys(),
            other => {
                self.warn("keys", None, format!("not an object: {}", other.type_name()));
                Vec::new()
            }
        }
    }

    // ------------------------------------------------------------------
    // Type predicates
    // ------------------------------------------------------------------

    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self.value, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.value, Value::Array(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.value, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self.value, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.value, Value::String(_))
    }

    // ------------------------------------------------------------------
    // Scalar coercions
    // ------------------------------------------------------------------

    /// Borrowed string, or `""` with a warning.
    pub fn as_str(&self) -> &str {
        match &self.value {
            Value::String(s) => s,
            other => {
                self.mismatch("as_string", other);
                ""
            }
        }
    }

    /// Owned string, or `""` with a warning.
    pub fn as_string(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => {
                self.mismatch("as_string", other);
                String::new()
            }
        }
    }

    /// Boolean, or `false` with a warning.
    pub fn as_bool(&self) -> bool {
        match &self.value {
            Value::Bool(b) => *b,
            other => {
                self.mismatch("as_bool", other);
                false
            }
        }
    }

    /// Number truncated toward zero (saturating at the `i64` bounds), or `0`
    /// with a warning.
    pub fn as_int(&self) -> i64 {
        match &self.value {
            Value::Number(n) => n.trunc() as i64,
            other => {
                self.mismatch("as_int", other);
                0
            }
        }
    }

    /// Number, or `0.0` with a warning.
    pub fn as_float(&self) -> f64 {
        match &self.value {
            Value::Number(n) => *n,
            other => {
                self.mismatch("as_float", other);
                0.0
            }
        }
    }

    fn mismatch(&self, op: &'static str, found: &Value) {
        let message = match found {
            Value::Null => "null element".to_string(),
            other => format!("cannot convert {}", other.type_name()),
        };
        self.warn(op, None, message);
    }
}

/// Parse JSON text, as [`Element::parse_str`].
impl FromStr for Element {
    type Err = DynaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

/// Serialized text of the wrapped value (see [`crate::serialize`]).
/// A Null element renders as an empty string.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_null() {
            return Ok(());
        }
        f.write_str(&crate::serialize::serialize(&self.value))
    }
}

/// The wrapped value; containers stay shared with the element's tree.
impl From<&Element> for Value {
    fn from(element: &Element) -> Self {
        element.value.clone()
    }
}

impl From<Element> for Value {
    fn from(element: Element) -> Self {
        element.value
    }
}
