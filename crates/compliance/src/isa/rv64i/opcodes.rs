//! RISC-V Base Integer (I) Opcodes.
//!
//! Defines the major opcodes (bits 6-0) of the instructions `mv`, `li`, `bne`
//! and `j` lower to.

/// Immediate arithmetic instructions (ADDI, SLLI).
pub const OP_IMM: u32 = 0b0010011;

/// 32-bit Immediate arithmetic (ADDIW) - RV64 only.
pub const OP_IMM_32: u32 = 0b0011011;

/// Load Upper Immediate (LUI).
pub const OP_LUI: u32 = 0b0110111;

/// Conditional Branch instructions (BNE).
pub const OP_BRANCH: u32 = 0b1100011;

/// Jump and Link (JAL).
pub const OP_JAL: u32 = 0b1101111;
