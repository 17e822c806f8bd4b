//! # Common Component Tests

/// Error display tests.
pub mod error;
/// Register token parsing.
pub mod reg;
