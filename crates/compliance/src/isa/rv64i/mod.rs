//! RISC-V Base Integer (I) encodings used by the compliance expansions.

/// Function codes (funct3) for the supported instructions.
pub mod funct3;
/// Major opcodes for the supported instructions.
pub mod opcodes;
