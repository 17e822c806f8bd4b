//! # Core Tests

/// General-purpose register file.
pub mod gpr;
/// Hart execution semantics.
pub mod hart;
