//! Common types used throughout the compliance I/O crate.
//!
//! This module provides the building blocks shared by the expander, the
//! assembler and the hart. It includes:
//! 1. **Error Handling:** The crate-wide [`Error`] enum and [`Result`] alias.
//! 2. **Register Indices:** Strong types for integer and floating-point registers.
//! 3. **Register Management:** A unified interface for GPR and FPR access.

/// Error types for build-time misuse and harness failures.
pub mod error;

/// Integer and floating-point register index types.
pub mod reg;

/// Register file implementation.
pub mod regfile;

pub use error::{Error, Result};
pub use reg::Reg;
pub use regfile::RegisterFile;
