//! Host-side RISC-V core.
//!
//! Provides the integer register file and the [`Hart`](hart::Hart) that
//! executes assembled compliance programs.

/// Architectural register file.
pub mod arch;
/// Instruction-level executor.
pub mod hart;

pub use hart::Hart;
