//! The dynamically-typed document tree.
//!
//! [`Value`] is a closed sum over the six JSON shapes. Scalars are held by
//! value; arrays and objects are held through shared handles ([`ArrayRef`],
//! [`ObjectRef`]) so every [`Value`] (and every [`Element`](crate::Element))
//! cloned from the same container observes the same contents. Cloning a
//! `Value` never copies a container; use [`Value::deep_clone`] for that.
//!
//! Objects are stored in a `BTreeMap`, so every enumeration of an object
//! (keys, entries, walk, serialization) runs in ascending key order.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// One node of a JSON document.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// Every JSON number is a double; integers are a view (see `Element::as_int`).
    Number(f64),
    String(String),
    Array(ArrayRef),
    Object(ObjectRef),
}

impl Value {
    /// Allocate a fresh, empty array.
    pub fn new_array() -> Self {
        Value::Array(ArrayRef::new())
    }

    /// Allocate a fresh, empty object.
    pub fn new_object() -> Self {
        Value::Object(ObjectRef::new())
    }

    /// Short lowercase name of the variant, used in diagnostics and errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for arrays and objects.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Copy the whole subtree into freshly allocated containers.
    ///
    /// The copy shares nothing with `self`: mutating one is never visible
    /// through the other.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Array(arr) => Value::Array(ArrayRef::from_vec(
                arr.borrow().iter().map(Value::deep_clone).collect(),
            )),
            Value::Object(obj) => Value::Object(ObjectRef::from_map(
                obj.borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.deep_clone()))
                    .collect(),
            )),
            scalar => scalar.clone(),
        }
    }

    /// Returns true if `self` is, or transitively contains, the container
    /// behind `target`. Scalars reach nothing.
    pub(crate) fn reaches(&self, target: &Value) -> bool {
        let same = match (self, target) {
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        };
        if same {
            return true;
        }
        match self {
            Value::Array(arr) => arr.borrow().iter().any(|v| v.reaches(target)),
            Value::Object(obj) => obj.borrow().values().any(|v| v.reaches(target)),
            _ => false,
        }
    }

    /// Convert into a `serde_json::Value` (deep copy).
    ///
    /// Integral numbers inside the `i64` range become JSON integers; NaN and
    /// infinities, which JSON cannot carry, become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => match as_exact_i64(*n) {
                Some(i) => serde_json::Value::from(i),
                None => serde_json::Number::from_f64(*n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(arr) => {
                serde_json::Value::Array(arr.borrow().iter().map(Value::to_json).collect())
            }
            Value::Object(obj) => serde_json::Value::Object(
                obj.borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn as_exact_i64(n: f64) -> Option<i64> {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Structural equality. Two handles to the same container short-circuit.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Array(arr) => fmt::Debug::fmt(arr, f),
            Value::Object(obj) => fmt::Debug::fmt(obj, f),
        }
    }
}

/// Same text as [`crate::serialize`].
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::serialize::serialize(self))
    }
}

/// Standard serde serialization, for callers who want RFC 8259 JSON
/// (full string escaping) via `serde_json::to_string`.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match as_exact_i64(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                let items = arr.borrow();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let entries = obj.borrow();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

// ============================================================================
// Shared container handles
// ============================================================================

/// Shared, in-place mutable array storage.
#[derive(Clone, Default)]
pub struct ArrayRef(Rc<RefCell<Vec<Value>>>);

impl ArrayRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    /// Borrow the elements. The guard must be dropped before any mutation
    /// through another handle to the same array.
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Clone of the element at `index` (a shared handle for containers).
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Ordered removal; later elements shift down by one.
    pub fn remove(&self, index: usize) -> Option<Value> {
        let mut items = self.0.borrow_mut();
        if index < items.len() {
            Some(items.remove(index))
        } else {
            None
        }
    }

    /// Clone the element list so it can be visited without holding a borrow.
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Returns true if both handles address the same storage.
    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ArrayRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}

/// Shared, in-place mutable object storage with sorted keys.
#[derive(Clone, Default)]
pub struct ObjectRef(Rc<RefCell<BTreeMap<String, Value>>>);

impl ObjectRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(entries: BTreeMap<String, Value>) -> Self {
        Self(Rc::new(RefCell::new(entries)))
    }

    /// Borrow the entries. The guard must be dropped before any mutation
    /// through another handle to the same object.
    pub fn borrow(&self) -> Ref<'_, BTreeMap<String, Value>> {
        self.0.borrow()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    /// Clone of the value at `key` (a shared handle for containers).
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Insert or overwrite, returning the previous value.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().remove(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Clone the entries (ascending key order) so they can be visited without
    /// holding a borrow.
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns true if both handles address the same storage.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.borrow().iter()).finish()
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Wraps the items in a freshly allocated array.
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(ArrayRef::from_vec(
            items.into_iter().map(Into::into).collect(),
        ))
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Object(ObjectRef::from_map(entries))
    }
}

impl From<ArrayRef> for Value {
    fn from(arr: ArrayRef) -> Self {
        Value::Array(arr)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(ArrayRef::from_vec(iter.into_iter().map(Into::into).collect()))
    }
}

/// Numbers are widened to `f64`; big integers lose precision past 2^53.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::Array(ArrayRef::from_vec(
                items.into_iter().map(Value::from).collect(),
            )),
            serde_json::Value::Object(map) => Value::Object(ObjectRef::from_map(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            )),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Value::from(json.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clone_shares_container() {
        let a = Value::new_array();
        let b = a.clone();
        if let Value::Array(arr) = &a {
            arr.push(Value::from(1));
        }
        match &b {
            Value::Array(arr) => assert_eq!(arr.len(), 1),
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn deep_clone_detaches() {
        let a = Value::from(json!({"x": [1, 2]}));
        let b = a.deep_clone();
        if let Value::Object(obj) = &a {
            obj.insert("y", Value::Bool(true));
        }
        assert_ne!(a, b);
        assert_eq!(b.to_json(), json!({"x": [1, 2]}));
    }

    #[test]
    fn reaches_detects_nested_handle() {
        let inner = Value::new_array();
        let outer: Value = vec![Value::from(1), inner.clone()].into();
        assert!(outer.reaches(&inner));
        assert!(inner.reaches(&inner));
        assert!(!inner.reaches(&outer));
        assert!(!Value::from(3).reaches(&inner));
    }

    #[test]
    fn to_json_keeps_integers_integral() {
        let v = Value::from(json!({"i": 3, "f": 0.5, "n": null, "s": "x"}));
        assert_eq!(v.to_json(), json!({"i": 3, "f": 0.5, "n": null, "s": "x"}));
        assert_eq!(Value::Number(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn serde_serialize_escapes_fully() {
        let v = Value::from("a\nb");
        assert_eq!(serde_json::to_string(&v).unwrap(), r#""a\nb""#);
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(true).type_name(), "bool");
        assert_eq!(Value::from(1).type_name(), "number");
        assert_eq!(Value::from("s").type_name(), "string");
        assert_eq!(Value::new_array().type_name(), "array");
        assert_eq!(Value::new_object().type_name(), "object");
    }
}
