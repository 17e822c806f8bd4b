//! Instruction Disassembler.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for debug tracing, logging, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use rvtest_io_core::isa::disasm::disassemble;
//! let text = disassemble(0x00500F93); // ADDI x31, x0, 5
//! assert_eq!(text, "addi t6, zero, 5");
//! ```

use crate::isa::instruction::Instruction;

/// Disassembles a 32-bit RISC-V instruction into a human-readable string.
///
/// Returns a mnemonic like `"bne t5, t6, 8"` or `"unknown"` for encodings
/// outside the supported subset.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    Instruction::decode(inst).map_or_else(|| "unknown".to_string(), |i| i.to_string())
}

/// Disassembles a word with its address, as printed in listings and traces.
///
/// # Arguments
///
/// * `pc` - Address of the word.
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble_at(pc: u64, inst: u32) -> String {
    format!("{pc:#010x}: {inst:08x}  {}", disassemble(inst))
}
