//! Error types for document loading and mutation.
//!
//! Only hard conditions produce a [`DynaError`]. Soft conditions (absent keys,
//! out-of-range indices, wrong-type reads) never fail; they yield a Null or zero
//! result and are reported through the element's diagnostic sink instead.

use crate::path::Seg;
use thiserror::Error;

/// Errors that can occur while loading or mutating a document.
#[derive(Error, Debug)]
pub enum DynaError {
    /// The input bytes were not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A filesystem locator could not be read.
    #[error("cannot read {locator}: {source}")]
    Io {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    /// An HTTP(S) locator answered with a non-2xx status.
    #[error("GET {url} returned status {status}")]
    Http { url: String, status: u16 },

    /// An HTTP(S) request failed before a status was received, or the body
    /// could not be read.
    #[error("GET {url} failed: {message}")]
    Transport { url: String, message: String },

    /// A mutation was attempted through a read-only element.
    #[error("{op}{}: element is read-only", fmt_target(.target))]
    ReadOnly {
        op: &'static str,
        target: Option<Seg>,
    },

    /// A mutation was attempted on an element wrapping Null.
    #[error("{op}{}: element is null", fmt_target(.target))]
    State {
        op: &'static str,
        target: Option<Seg>,
    },

    /// The wrapped value (or an argument) has the wrong type for the operation.
    #[error("{op}: expected {expected}, found {found}")]
    Type {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The inserted value already contains the target container.
    #[error("{op}: inserting a container into itself would create a cycle")]
    Cycle { op: &'static str },
}

impl DynaError {
    /// Create a read-only error.
    #[inline]
    pub fn read_only(op: &'static str, target: Option<Seg>) -> Self {
        DynaError::ReadOnly { op, target }
    }

    /// Create a null-element error.
    #[inline]
    pub fn state(op: &'static str, target: Option<Seg>) -> Self {
        DynaError::State { op, target }
    }

    /// Create a type mismatch error.
    #[inline]
    pub fn type_mismatch(op: &'static str, expected: &'static str, found: &'static str) -> Self {
        DynaError::Type {
            op,
            expected,
            found,
        }
    }

    /// Create a filesystem error.
    #[inline]
    pub fn io(locator: impl Into<String>, source: std::io::Error) -> Self {
        DynaError::Io {
            locator: locator.into(),
            source,
        }
    }

    /// Returns true for failures of the I/O collaborator (file, HTTP status, transport).
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            DynaError::Io { .. } | DynaError::Http { .. } | DynaError::Transport { .. }
        )
    }

    /// Returns true for rejected mutations (read-only, null, wrong type, cycle).
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            DynaError::ReadOnly { .. }
                | DynaError::State { .. }
                | DynaError::Type { .. }
                | DynaError::Cycle { .. }
        )
    }
}

fn fmt_target(target: &Option<Seg>) -> String {
    match target {
        Some(seg) => format!("({})", seg),
        None => String::new(),
    }
}

/// Convenience alias used throughout dynajson-core.
pub type Result<T> = std::result::Result<T, DynaError>;
