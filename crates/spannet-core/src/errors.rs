//! Structured error types shared across spannet crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SpanError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (node ids, counts, paths).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the spannet sampler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SpanError {
    /// User supplied configuration or coordinate errors.
    #[error("input error: {0}")]
    Input(ErrorInfo),
    /// Structural graph errors (unknown nodes, missing edges, no path).
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Degenerate proposal-probability denominators. Signals a broken
    /// move-selection guard and must propagate.
    #[error("numeric error: {0}")]
    Numeric(ErrorInfo),
    /// The connectivity invariant was observed false for a chain state.
    /// Fatal: the run must abort rather than continue sampling.
    #[error("invariant violation: {0}")]
    Invariant(ErrorInfo),
    /// Summary statistics requested over an empty trajectory.
    #[error("analysis error: {0}")]
    Analysis(ErrorInfo),
    /// Artefact serialization failures.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl SpanError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SpanError::Input(info)
            | SpanError::Graph(info)
            | SpanError::Numeric(info)
            | SpanError::Invariant(info)
            | SpanError::Analysis(info)
            | SpanError::Serde(info) => info,
        }
    }
}
