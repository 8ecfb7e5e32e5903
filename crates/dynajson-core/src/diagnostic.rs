//! Diagnostic events and the sinks that receive them.
//!
//! Soft conditions (absent key, out-of-range index, wrong-type read) are
//! reported as `Warn` events. Hard failures are reported as `Fatal` events in
//! addition to being returned as a [`DynaError`](crate::DynaError). Elements
//! without a sink drop every event.

use crate::path::Seg;
use std::fmt;
use std::rc::Rc;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A soft condition; the call returned a Null or zero result.
    Warn,
    /// A hard condition; the call also returned an error.
    Fatal,
}

/// A structured diagnostic event.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Symbolic operation name, e.g. `"select_by_key"` or `"put"`.
    pub op: &'static str,
    /// Depth of the element that raised the event (root = 0).
    pub depth: usize,
    /// Key or index the operation was addressing, when there is one.
    pub target: Option<Seg>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)?;
        if let Some(target) = &self.target {
            write!(f, "({})", target)?;
        }
        write!(f, " at depth {}: {}", self.depth, self.message)
    }
}

/// Receiver for diagnostic events.
///
/// `fatal` defaults to `warn`, so a sink that only cares about "something went
/// wrong" implements one method.
pub trait DiagnosticSink {
    fn warn(&self, event: &Diagnostic);

    fn fatal(&self, event: &Diagnostic) {
        self.warn(event);
    }
}

type Callback = Box<dyn Fn(&Diagnostic)>;

/// A sink built from closures: a warn callback and an optional fatal callback.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use dynajson_core::{Element, Hooks};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let log = Rc::clone(&seen);
/// let root = Element::new_object()
///     .with_sink(Hooks::new(move |event| log.borrow_mut().push(event.op)));
///
/// root.select_by_key("missing");
/// assert_eq!(*seen.borrow(), vec!["select_by_key"]);
/// ```
pub struct Hooks {
    warn: Callback,
    fatal: Option<Callback>,
}

impl Hooks {
    pub fn new(warn: impl Fn(&Diagnostic) + 'static) -> Self {
        Self {
            warn: Box::new(warn),
            fatal: None,
        }
    }

    /// Route fatal events to a separate callback instead of the warn callback.
    pub fn with_fatal(mut self, fatal: impl Fn(&Diagnostic) + 'static) -> Self {
        self.fatal = Some(Box::new(fatal));
        self
    }
}

impl DiagnosticSink for Hooks {
    fn warn(&self, event: &Diagnostic) {
        (self.warn)(event);
    }

    fn fatal(&self, event: &Diagnostic) {
        match &self.fatal {
            Some(fatal) => fatal(event),
            None => (self.warn)(event),
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("fatal", &self.fatal.is_some())
            .finish_non_exhaustive()
    }
}

/// Forwards events to `tracing`: warnings as `warn!`, fatal events as `error!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, event: &Diagnostic) {
        tracing::warn!(
            op = event.op,
            depth = event.depth,
            seg = ?event.target,
            "{}",
            event.message
        );
    }

    fn fatal(&self, event: &Diagnostic) {
        tracing::error!(
            op = event.op,
            depth = event.depth,
            seg = ?event.target,
            "{}",
            event.message
        );
    }
}

/// Flags an element passes down to every child it produces.
///
/// A child gets a copy (with `depth + 1`); nothing is shared back with the
/// parent except the sink itself.
#[derive(Clone, Default)]
pub(crate) struct Policy {
    pub(crate) sink: Option<Rc<dyn DiagnosticSink>>,
    pub(crate) read_only: bool,
    pub(crate) depth: usize,
}

impl Policy {
    pub(crate) fn child(&self) -> Policy {
        Policy {
            sink: self.sink.clone(),
            read_only: self.read_only,
            depth: self.depth + 1,
        }
    }

    pub(crate) fn emit(
        &self,
        severity: Severity,
        op: &'static str,
        target: Option<Seg>,
        message: impl Into<String>,
    ) {
        let Some(sink) = &self.sink else {
            return;
        };
        let event = Diagnostic {
            severity,
            op,
            depth: self.depth,
            target,
            message: message.into(),
        };
        match severity {
            Severity::Warn => sink.warn(&event),
            Severity::Fatal => sink.fatal(&event),
        }
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("sink", &self.sink.is_some())
            .field("read_only", &self.read_only)
            .field("depth", &self.depth)
            .finish()
    }
}
