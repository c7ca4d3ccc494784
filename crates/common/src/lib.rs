//! Shared failure-propagation primitives.
//!
//! Every fallible operation in the workspace returns an [`Outcome`], whose
//! error side is a [`Diagnostic`]. Layers either pass an outcome up unchanged,
//! enrich its context, or wrap it in a higher-level diagnostic; nothing unwinds.

pub mod codes;
pub mod diagnostic;
pub mod outcome;

pub use diagnostic::Diagnostic;
pub use outcome::{Outcome, OutcomeExt, failure, success};
