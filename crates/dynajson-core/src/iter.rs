//! Enumeration over containers.
//!
//! Visitors return `Result<ControlFlow<()>, E>`: `Continue` keeps going,
//! `Break` stops early and the call returns `Ok(())`, and `Err(e)` aborts and
//! is handed back to the caller unchanged.
//!
//! Each container is snapshotted before its children are visited, so a
//! visitor may edit the container it is iterating. Such edits are visible
//! afterwards but do not change the ongoing pass.

use crate::element::Element;
use crate::path::{Path, Seg};
use crate::value::Value;
use std::ops::ControlFlow;

/// What a visitor returns.
pub type Visit<E> = Result<ControlFlow<()>, E>;

impl Element {
    /// Visit the entries of an object in ascending key order.
    ///
    /// Anything other than an object warns and visits nothing.
    ///
    /// ```
    /// use std::convert::Infallible;
    /// use std::ops::ControlFlow;
    /// use dynajson_core::Element;
    ///
    /// let root = Element::parse_str(r#"{"b": 1, "a": 2}"#).unwrap();
    /// let mut keys = Vec::new();
    /// root.each_object(|key, _| {
    ///     keys.push(key.to_owned());
    ///     Ok::<_, Infallible>(ControlFlow::Continue(()))
    /// })
    /// .unwrap();
    /// assert_eq!(keys, ["a", "b"]);
    /// ```
    pub fn each_object<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&str, Element) -> Visit<E>,
    {
        let Value::Object(obj) = &self.value else {
            self.warn(
                "each_object",
                None,
                format!("not an object: {}", self.value.type_name()),
            );
            return Ok(());
        };
        for (key, value) in obj.snapshot() {
            if visit(&key, self.child(value))?.is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Visit the elements of an array in index order.
    ///
    /// Anything other than an array warns and visits nothing.
    pub fn each_array<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(usize, Element) -> Visit<E>,
    {
        let Value::Array(arr) = &self.value else {
            self.warn(
                "each_array",
                None,
                format!("not an array: {}", self.value.type_name()),
            );
            return Ok(());
        };
        for (index, value) in arr.snapshot().into_iter().enumerate() {
            if visit(index, self.child(value))?.is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Depth-first, pre-order traversal of the whole subtree.
    ///
    /// For every entry of every array and object the visitor receives the
    /// path of the containing node, the entry's own key or index, and the raw
    /// value, before that value is descended into. Object entries come in
    /// ascending key order, array entries in index order. A scalar or Null
    /// element has no entries and visits nothing.
    ///
    /// ```
    /// use std::convert::Infallible;
    /// use std::ops::ControlFlow;
    /// use dynajson_core::Element;
    ///
    /// let root = Element::parse_str(r#"{"a": [10, {"b": true}]}"#).unwrap();
    /// let mut seen = Vec::new();
    /// root.walk(|parent, seg, _| {
    ///     seen.push(format!("{parent}/{seg}"));
    ///     Ok::<_, Infallible>(ControlFlow::Continue(()))
    /// })
    /// .unwrap();
    /// assert_eq!(seen, [r#"$/"a""#, "$.a/0", "$.a/1", r#"$.a[1]/"b""#]);
    /// ```
    pub fn walk<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&Path, &Seg, &Value) -> Visit<E>,
    {
        let mut path = Path::root();
        walk_value(&self.value, &mut path, &mut visit)?;
        Ok(())
    }

    /// Every array element wrapped individually, in index order.
    ///
    /// Anything other than an array warns and returns an empty vector.
    pub fn as_element_array(&self) -> Vec<Element> {
        match &self.value {
            Value::Array(arr) => arr
                .snapshot()
                .into_iter()
                .map(|v| self.child(v))
                .collect(),
            other => {
                self.warn(
                    "as_element_array",
                    None,
                    format!("not an array: {}", other.type_name()),
                );
                Vec::new()
            }
        }
    }

    /// Every object entry with its value wrapped, in ascending key order.
    ///
    /// Anything other than an object warns and returns an empty vector.
    pub fn entries(&self) -> Vec<(String, Element)> {
        match &self.value {
            Value::Object(obj) => obj
                .snapshot()
                .into_iter()
                .map(|(k, v)| (k, self.child(v)))
                .collect(),
            other => {
                self.warn(
                    "entries",
                    None,
                    format!("not an object: {}", other.type_name()),
                );
                Vec::new()
            }
        }
    }
}

/// Returns `Break` once the visitor asked to stop so callers unwind without
/// visiting siblings.
fn walk_value<E, F>(value: &Value, path: &mut Path, visit: &mut F) -> Visit<E>
where
    F: FnMut(&Path, &Seg, &Value) -> Visit<E>,
{
    let entries: Vec<(Seg, Value)> = match value {
        Value::Array(arr) => arr
            .snapshot()
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Seg::Index(i), v))
            .collect(),
        Value::Object(obj) => obj
            .snapshot()
            .into_iter()
            .map(|(k, v)| (Seg::Key(k), v))
            .collect(),
        _ => return Ok(ControlFlow::Continue(())),
    };

    for (seg, child) in entries {
        if visit(path, &seg, &child)?.is_break() {
            return Ok(ControlFlow::Break(()));
        }
        path.push(seg);
        let flow = walk_value(&child, path, visit);
        path.pop();
        if flow?.is_break() {
            return Ok(ControlFlow::Break(()));
        }
    }
    Ok(ControlFlow::Continue(()))
}
