//! Core implementation of the envsub template evaluator. Expands templates
//! containing POSIX / bash-style parameter expansions (`${...}`) against a
//! caller-supplied variable provider.
//!
//! The evaluator is pure and synchronous: it performs no I/O and never reads
//! the process environment itself. Whether concurrent use is safe reduces to
//! the thread-safety of the provider handed in.

mod error;
mod expansion;
mod patterns;
mod trace_categories;
pub mod variables;

pub use error::Error;
pub use expansion::{expand, expand_strict, ResolutionMode, WordExpander};
pub use variables::{FnProvider, VariableProvider};
