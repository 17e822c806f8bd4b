//! RISC-V Base Integer (I) Function Codes (funct3).
//!
//! The `funct3` field (bits 14-12) distinguishes between instructions sharing
//! the same major opcode.

/// Add Immediate (and ADDIW under `OP_IMM_32`).
pub const ADDI: u32 = 0b000;
/// Shift Left Logical Immediate.
pub const SLLI: u32 = 0b001;

/// Branch Not Equal.
pub const BNE: u32 = 0b001;
