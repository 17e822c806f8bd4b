//! Instruction set subset.
//!
//! The GPR assertion lowers to `mv`, `li` and `bne`; those in turn lower to
//! `addi`, `addiw`, `lui`, `slli` and B-type branches. This module covers:
//! 1. **Encoding:** Field extraction and construction of 32-bit words.
//! 2. **Materialisation:** The standard `li` sequence for any XLEN-wide constant.
//! 3. **Pseudo-instructions:** The assembler-level items macros expand to.
//! 4. **Disassembly:** Human-readable text for tracing and diagnostics.

/// ABI register names.
pub mod abi;
/// Instruction disassembler for tracing and diagnostics.
pub mod disasm;
/// Instruction encoding, decoding and field extraction.
pub mod instruction;
/// `li` constant materialisation.
pub mod li;
/// Pseudo-instructions emitted by macro expansion.
pub mod pseudo;
/// Base integer opcodes and function codes.
pub mod rv64i;

pub use instruction::{Instruction, InstructionBits};
pub use pseudo::Pseudo;
