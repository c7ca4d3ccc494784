//! The success/failure container returned by every fallible operation.
//!
//! `Outcome<T>` is a plain `Result` whose error side is always a
//! [`Diagnostic`], so the `?` operator and the combinators below compose:
//!
//! - [`Result::map`] transforms the success value; an error is moved through untouched.
//! - [`OutcomeExt::bind`] chains a further fallible step, short-circuiting on error.
//! - [`OutcomeExt::fold`] forces both branches to be handled at a boundary.

use serde_json::Value;

use crate::diagnostic::Diagnostic;

/// Result of a fallible operation.
pub type Outcome<T> = Result<T, Diagnostic>;

/// Wraps a value as a successful outcome.
pub fn success<T>(value: T) -> Outcome<T> {
    Ok(value)
}

/// Wraps a diagnostic as a failed outcome.
pub fn failure<T>(diagnostic: Diagnostic) -> Outcome<T> {
    Err(diagnostic)
}

/// Combinators over [`Outcome`].
pub trait OutcomeExt<T>: Sized {
    /// Invokes `f` with the success value and returns its outcome.
    ///
    /// On error `f` is never called and the existing diagnostic is returned.
    fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>;

    /// Collapses the outcome by handling both branches.
    fn fold<R, OnOk, OnErr>(self, on_ok: OnOk, on_err: OnErr) -> R
    where
        OnOk: FnOnce(T) -> R,
        OnErr: FnOnce(Diagnostic) -> R;

    /// Adds a context key to the diagnostic of a failed outcome.
    #[must_use]
    fn with_context(self, key: impl Into<String>, value: impl Into<Value>) -> Self;

    /// Wraps the diagnostic of a failed outcome in a higher-level one.
    #[must_use]
    fn wrap_err(self, message: impl Into<String>, code: impl Into<String>) -> Self;
}

impl<T> OutcomeExt<T> for Outcome<T> {
    fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Ok(value) => f(value),
            Err(diagnostic) => Err(diagnostic),
        }
    }

    fn fold<R, OnOk, OnErr>(self, on_ok: OnOk, on_err: OnErr) -> R
    where
        OnOk: FnOnce(T) -> R,
        OnErr: FnOnce(Diagnostic) -> R,
    {
        match self {
            Ok(value) => on_ok(value),
            Err(diagnostic) => on_err(diagnostic),
        }
    }

    fn with_context(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.map_err(|d| d.with_context(key, value))
    }

    fn wrap_err(self, message: impl Into<String>, code: impl Into<String>) -> Self {
        self.map_err(|d| d.wrap(message, code))
    }
}
