//! RISC-V compliance test I/O macros.
//!
//! This crate implements the `RVTEST_IO_*` macro interface used by the RISC-V
//! architectural compliance tests, with the following:
//! 1. **Hooks:** The [`IoHooks`] trait with a default, disabled implementation for the
//!    I/O macros and the active GPR-equality assertion.
//! 2. **Expansion:** Parsing of macro uses and lowering to `mv`/`li`/`bne` sequences,
//!    plus a header preprocessor honouring the `_COMPLIANCE_IO_H` include guard.
//! 3. **ISA:** Encoding, decoding and disassembly for the base instructions the
//!    expansions lower to.
//! 4. **Simulation:** An assembler resolving the `loop_fail` label and a minimal hart
//!    that executes expansions to check pass/fail behaviour on the host.
//! 5. **Bare metal:** Text macros for `global_asm!` and `asm!` macros for RISC-V targets.

/// Common types (errors, register indices, register file).
pub mod common;
/// Harness configuration (XLEN, failure label, scratch registers).
pub mod config;
/// Architectural state (GPR file) and the executing hart.
pub mod core;
/// The `RVTEST_IO_*` macro interface: hooks, parsing, expansion, preprocessor.
pub mod io;
/// Instruction set subset (encode, decode, disassemble, `li` materialisation).
pub mod isa;
/// Bare-metal macros emitting the assertion through inline assembly.
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
pub mod rt;
/// Program assembly and execution.
pub mod sim;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Crate-wide error and result types.
pub use crate::common::error::{Error, Result};
/// Default hook implementation and the hook trait.
pub use crate::io::{ComplianceIo, IoHooks, IoMacro};
/// Host-level assertion helper.
pub use crate::io::assert::{Mismatch, check_gpr_eq};
/// Assembler and run outcome.
pub use crate::sim::{Outcome, Program, ProgramBuilder};
