//! Request middleware.
//!
//! Lifecycle concerns applied around every handler, currently request
//! tracing.

pub mod trace;

pub use trace::Trace;
