//! # dynajson-core
//!
//! A dynamically-typed JSON document model: navigate, edit, enumerate and
//! re-serialize an already-parsed JSON tree without defining static types.
//!
//! Navigation never fails. Asking for a missing key, an out-of-range index or
//! the wrong type yields a Null element (or a zero value) and a warning
//! through the element's [`DiagnosticSink`], so speculative probing reads
//! cleanly. Mutations return a [`DynaError`] when their preconditions fail.
//!
//! ## Quick start
//!
//! ```rust
//! use dynajson_core::{path, Element};
//!
//! let root = Element::parse_str(r#"{"m1": {"arr": [10, 20, 30]}}"#).unwrap();
//! assert_eq!(root.select(path!("m1", "arr", 2)).as_int(), 30);
//! assert!(root.select(["m1", "missing"]).is_null());
//!
//! let m2 = root.put_empty_object("m2").unwrap();
//! m2.put("name", "x").unwrap();
//! root.select(["m1", "arr"]).append(40).unwrap();
//! assert_eq!(
//!     root.to_string(),
//!     r#"{"m1": {"arr": [10, 20, 30, 40]}, "m2": {"name": "x"}}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value` tree with shared array/object containers
//! - [`element`]: `Element` construction, navigation and scalar coercion
//! - [`mutate`]: put / append / delete
//! - [`iter`]: `each_object`, `each_array`, `walk`
//! - [`serialize`]: text writer with minimal string escaping
//! - [`loader`]: bytes from an HTTP(S) URL or a file
//! - [`diagnostic`]: warn/fatal events and sinks
//! - [`path`]: key/index path segments
//! - [`error`]: `DynaError`

pub mod diagnostic;
pub mod element;
pub mod error;
pub mod iter;
pub mod loader;
pub mod mutate;
pub mod path;
pub mod serialize;
pub mod value;

pub use diagnostic::{Diagnostic, DiagnosticSink, Hooks, Severity, TracingSink};
pub use element::Element;
pub use error::{DynaError, Result};
pub use iter::Visit;
pub use loader::Loader;
pub use path::{Path, Seg};
pub use serialize::{serialize, serialize_into};
pub use value::{ArrayRef, ObjectRef, Value};
