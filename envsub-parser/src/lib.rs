//! Implements a scanner and parser for POSIX / bash-style parameter
//! expansion templates (the `${...}` family), producing a tree that an
//! evaluator can walk without re-scanning any text.

pub mod word;

mod error;
mod scanner;

pub use error::WordParseError;
pub use scanner::MAX_NESTING_DEPTH;
