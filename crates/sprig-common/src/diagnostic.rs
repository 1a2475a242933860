//! Structured diagnostics for soft failures.
//!
//! A diagnostic describes something that went wrong but did not stop the
//! operation: content appended to a self-closing node, an attribute key the
//! renderer had to skip, a mismatched closing tag in parsed markup.
//!
//! Every diagnostic is echoed through [`warn_once`](crate::warning::warn_once)
//! unless a [`capture`] scope is active on the current thread, in which case
//! it is recorded for the caller instead. Callers running in a strict mode
//! capture and turn the records into hard errors.

use core::fmt;
use std::cell::RefCell;

use strum_macros::{Display, IntoStaticStr};

use crate::warning::warn_once;

/// The category of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Text or children were added to a self-closing node; they are kept but
    /// never rendered.
    SelfClosingContent,
    /// An attribute key failed validation at render time and was skipped.
    InvalidAttributeKey,
    /// Two source attribute names normalized to the same key while parsing.
    AttributeCollision,
    /// A closing tag did not match the innermost open element.
    MismatchedEndTag,
    /// A closing tag matched no open element at all.
    UnexpectedEndTag,
}

/// A recoverable problem, carrying the offending tag/attribute/value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// The component that noticed it ("DOM", "Renderer", "HTML Parser").
    pub component: &'static str,
    /// Tag of the node involved, if any.
    pub tag: Option<String>,
    /// Attribute involved, if any.
    pub attribute: Option<String>,
    /// Offending value, if any.
    pub value: Option<String>,
    /// Human readable description.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic with only a kind, component and message.
    #[must_use]
    pub fn new(kind: DiagnosticKind, component: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            component,
            tag: None,
            attribute: None,
            value: None,
            message: message.into(),
        }
    }

    /// Attach the tag of the node involved.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Attach the attribute involved.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Attach the offending value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

thread_local! {
    /// Open capture scopes, innermost last.
    static CAPTURES: RefCell<Vec<Vec<Diagnostic>>> = const { RefCell::new(Vec::new()) };
}

/// Report a diagnostic.
///
/// Recorded into every active [`capture`] scope on this thread; printed to
/// stderr (once per unique message) when no scope is active.
pub fn emit(diagnostic: Diagnostic) {
    let captured = CAPTURES.with(|scopes| {
        let mut scopes = scopes.borrow_mut();
        if scopes.is_empty() {
            return false;
        }
        for scope in scopes.iter_mut() {
            scope.push(diagnostic.clone());
        }
        true
    });

    if !captured {
        warn_once(diagnostic.component, &diagnostic.message);
    }
}

/// Pops the innermost capture scope even if the closure panics.
struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        CAPTURES.with(|scopes| {
            let _ = scopes.borrow_mut().pop();
        });
    }
}

/// Run `f`, collecting every diagnostic emitted on this thread meanwhile.
///
/// Scopes nest; an inner scope's diagnostics are also visible to the outer
/// ones.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Diagnostic>) {
    CAPTURES.with(|scopes| scopes.borrow_mut().push(Vec::new()));
    let guard = ScopeGuard;
    let result = f();
    let diagnostics = CAPTURES.with(|scopes| {
        scopes
            .borrow_mut()
            .last_mut()
            .map(std::mem::take)
            .unwrap_or_default()
    });
    drop(guard);
    (result, diagnostics)
}
