//! Structured diagnostics
//!
//! The engine never raises to its host. Conditions worth surfacing (rejected
//! icon markup, a failing recompute) are reported as [`Diagnostic`] values to
//! an injected [`DiagnosticSink`], leaving the choice of backend to the host.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// Icon markup was empty or whitespace only
    SvgEmpty,
    /// Icon markup does not open with an `<svg` tag
    SvgMissingRootTag,
    /// Markup parsed but contains no `svg` element
    SvgNoRootElement,
    /// Markup could not be parsed into an element tree
    SvgParseFailed,
    /// A recompute function reported a failure
    RecomputeFailed,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::SvgEmpty => "svg-empty",
            DiagnosticCode::SvgMissingRootTag => "svg-missing-root-tag",
            DiagnosticCode::SvgNoRootElement => "svg-no-root-element",
            DiagnosticCode::SvgParseFailed => "svg-parse-failed",
            DiagnosticCode::RecomputeFailed => "recompute-failed",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message emitted by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub code: DiagnosticCode,
    pub message: String,
}

impl Diagnostic {
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn info(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            code,
            message: message.into(),
        }
    }
}

/// Receiver for engine diagnostics
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at the matching level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        let code = diagnostic.code.as_str();
        match diagnostic.level {
            DiagnosticLevel::Error => tracing::error!(code, "{}", diagnostic.message),
            DiagnosticLevel::Warning => tracing::warn!(code, "{}", diagnostic.message),
            DiagnosticLevel::Info => tracing::info!(code, "{}", diagnostic.message),
        }
    }
}

/// Buffers diagnostics so a caller can inspect them afterwards
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    pub fn codes(&self) -> Vec<DiagnosticCode> {
        self.diagnostics.borrow().iter().map(|d| d.code).collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

/// Drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}
