//! Trace utilities

/// Trace category for word expansion.
pub const EXPANSION: &str = "expansion";
/// Trace category for glob patterns.
pub const PATTERN: &str = "pattern";
