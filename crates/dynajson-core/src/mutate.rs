//! In-place edits of the container an element wraps.
//!
//! Every operation checks, in order: the element is not Null
//! ([`DynaError::State`]), the element is not read-only
//! ([`DynaError::ReadOnly`]), and the element holds the right container
//! ([`DynaError::Type`]). Failures are returned and also reported to the
//! element's sink as `Fatal` events.
//!
//! Containers are shared, so an edit made through one element is visible
//! through every element and value holding the same container.

use crate::element::Element;
use crate::error::{DynaError, Result};
use crate::path::Seg;
use crate::value::{ArrayRef, ObjectRef, Value};

impl Element {
    /// Set `key` to `value` on an object, overwriting any previous entry.
    ///
    /// ```
    /// use dynajson_core::Element;
    ///
    /// let root = Element::new_object();
    /// root.put("name", "Alice").unwrap();
    /// root.put("age", 30).unwrap();
    /// assert_eq!(root.to_string(), r#"{"age": 30, "name": "Alice"}"#);
    /// ```
    pub fn put(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        const OP: &str = "put";
        let value = value.into();
        let obj = self.object_for(OP, key)?;
        self.guard_cycle(OP, Some(Seg::key(key)), &value)?;
        obj.insert(key, value);
        Ok(())
    }

    /// Store `values` as a freshly allocated array under `key`.
    ///
    /// Always stores an array, whatever the number of values (including none).
    pub fn put_array<I>(&self, key: &str, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        const OP: &str = "put_array";
        let obj = self.object_for(OP, key)?;
        let items: Vec<Value> = values.into_iter().map(Into::into).collect();
        for item in &items {
            self.guard_cycle(OP, Some(Seg::key(key)), item)?;
        }
        obj.insert(key, Value::Array(ArrayRef::from_vec(items)));
        Ok(())
    }

    /// Store an empty object under `key` and return the element addressing it.
    pub fn put_empty_object(&self, key: &str) -> Result<Element> {
        self.put_container("put_empty_object", key, Value::new_object())
    }

    /// Store an empty array under `key` and return the element addressing it.
    pub fn put_empty_array(&self, key: &str) -> Result<Element> {
        self.put_container("put_empty_array", key, Value::new_array())
    }

    fn put_container(&self, op: &'static str, key: &str, container: Value) -> Result<Element> {
        let obj = self.object_for(op, key)?;
        obj.insert(key, container);
        Ok(self.select_by_key(key))
    }

    /// Push one value onto an array.
    pub fn append(&self, value: impl Into<Value>) -> Result<()> {
        self.append_all([value])
    }

    /// Push values onto an array in iteration order.
    ///
    /// Either all values are appended or, on failure, none are.
    ///
    /// ```
    /// use dynajson_core::Element;
    ///
    /// let arr = Element::new_array();
    /// arr.append(1).unwrap();
    /// arr.append_all(["a", "b"]).unwrap();
    /// assert_eq!(arr.to_string(), r#"[1, "a", "b"]"#);
    /// ```
    pub fn append_all<I>(&self, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        const OP: &str = "append";
        let arr = self.array_for(OP, None)?;
        let items: Vec<Value> = values.into_iter().map(Into::into).collect();
        for item in &items {
            self.guard_cycle(OP, None, item)?;
        }
        for item in items {
            arr.push(item);
        }
        Ok(())
    }

    /// Remove `key` from an object. A missing key only warns.
    pub fn delete_by_key(&self, key: &str) -> Result<()> {
        const OP: &str = "delete_by_key";
        let obj = self.object_for(OP, key)?;
        if obj.remove(key).is_none() {
            self.warn(OP, Some(Seg::key(key)), "no such key");
        }
        Ok(())
    }

    /// Remove the element at `index` from an array, shifting later elements
    /// down by one. An out-of-range index only warns.
    pub fn delete_by_index(&self, index: usize) -> Result<()> {
        const OP: &str = "delete_by_index";
        let arr = self.array_for(OP, Some(Seg::index(index)))?;
        if arr.remove(index).is_none() {
            self.warn(
                OP,
                Some(Seg::index(index)),
                format!("out of range: length {}", arr.len()),
            );
        }
        Ok(())
    }

    /// Delete by key or by index depending on the segment kind.
    pub fn delete(&self, target: impl Into<Seg>) -> Result<()> {
        match target.into() {
            Seg::Key(k) => self.delete_by_key(&k),
            Seg::Index(i) => self.delete_by_index(i),
        }
    }

    /// Delete by a runtime value: a string deletes a key, a non-negative
    /// integral number deletes an index, anything else is a
    /// [`DynaError::Type`].
    pub fn delete_dynamic(&self, target: &Value) -> Result<()> {
        const OP: &str = "delete";
        self.writable(OP, None)?;
        match Seg::try_from(target) {
            Ok(seg) => self.delete(seg),
            Err(_) => Err(self.fail(
                DynaError::type_mismatch(OP, "string or non-negative integer", target.type_name()),
                None,
            )),
        }
    }

    // ------------------------------------------------------------------
    // Preconditions
    // ------------------------------------------------------------------

    fn writable(&self, op: &'static str, target: Option<Seg>) -> Result<()> {
        if self.value.is_null() {
            return Err(self.fail(DynaError::state(op, target.clone()), target));
        }
        if self.policy.read_only {
            return Err(self.fail(DynaError::read_only(op, target.clone()), target));
        }
        Ok(())
    }

    fn object_for(&self, op: &'static str, key: &str) -> Result<&ObjectRef> {
        let target = Some(Seg::key(key));
        self.writable(op, target.clone())?;
        match &self.value {
            Value::Object(obj) => Ok(obj),
            other => Err(self.fail(
                DynaError::type_mismatch(op, "object", other.type_name()),
                target,
            )),
        }
    }

    fn array_for(&self, op: &'static str, target: Option<Seg>) -> Result<&ArrayRef> {
        self.writable(op, target.clone())?;
        match &self.value {
            Value::Array(arr) => Ok(arr),
            other => Err(self.fail(
                DynaError::type_mismatch(op, "array", other.type_name()),
                target,
            )),
        }
    }

    fn guard_cycle(&self, op: &'static str, target: Option<Seg>, value: &Value) -> Result<()> {
        if value.reaches(&self.value) {
            return Err(self.fail(DynaError::Cycle { op }, target));
        }
        Ok(())
    }
}
