//! Structured failure descriptions.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::codes;

/// A structured description of a failure.
///
/// A diagnostic carries a stable `code` for dispatch, a human-readable
/// `message`, an insertion-ordered key/value `context`, and optionally the
/// lower-level diagnostic it was raised from.
///
/// Context only accumulates as a diagnostic travels upward: each layer can add
/// keys, and wrapping moves the previous diagnostic into `cause`, so the cause
/// chain is finite and acyclic by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    context: IndexMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
    /// Creates a diagnostic with an empty context and no cause.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: IndexMap::new(),
            cause: None,
        }
    }

    /// Creates a `VALIDATION_ERROR` diagnostic naming the offending field.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::new(message, codes::VALIDATION_ERROR).with_context("field", field)
    }

    /// Sets a context key, overwriting any previous value in place.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_context(key, value);
        self
    }

    /// Sets a context key on a diagnostic the caller exclusively owns.
    pub fn set_context(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.context.insert(key.into(), value.into());
    }

    /// Wraps this diagnostic in a higher-level one that keeps it as `cause`.
    #[must_use]
    pub fn wrap(self, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: IndexMap::new(),
            cause: Some(Box::new(self)),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &IndexMap<String, Value> {
        &self.context
    }

    /// Returns a single context value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    pub fn cause(&self) -> Option<&Diagnostic> {
        self.cause.as_deref()
    }

    /// Returns true if this diagnostic carries `code`.
    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    /// Iterates this diagnostic and its causes, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &Diagnostic> {
        std::iter::successors(Some(self), |d| d.cause())
    }

    /// Returns the innermost diagnostic of the cause chain.
    pub fn root_cause(&self) -> &Diagnostic {
        self.chain().last().unwrap_or(self)
    }
}

/// Renders as `[code] message {k=v, ...} -> cause`.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;

        if !self.context.is_empty() {
            f.write_str(" {")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match value {
                    Value::String(s) => write!(f, "{key}={s}")?,
                    other => write!(f, "{key}={other}")?,
                }
            }
            f.write_str("}")?;
        }

        if let Some(cause) = &self.cause {
            write!(f, " -> {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}
