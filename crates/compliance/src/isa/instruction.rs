//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction for the I, U, B and J formats and the [`Instruction`]
//! type the assembler emits and the hart executes.

use std::fmt;

use crate::common::reg::Reg;
use crate::isa::rv64i::{funct3, opcodes};

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct6 field (bits 26-31).
pub const FUNCT6_MASK: u32 = 0x3F;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> Reg;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> Reg;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> Reg;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct6 field (bits 26-31), which qualifies RV64 shifts.
    fn funct6(&self) -> u32;

    /// Sign-extended 12-bit I-type immediate.
    fn imm_i(&self) -> i32;

    /// Upper 20 bits of a U-type instruction, unshifted.
    fn imm_u(&self) -> u32;

    /// Sign-extended 13-bit B-type branch offset.
    fn imm_b(&self) -> i32;

    /// Sign-extended 21-bit J-type jump offset.
    fn imm_j(&self) -> i32;
}

/// Builds a register from a masked 5-bit field.
#[inline(always)]
fn field_reg(bits: u32) -> Reg {
    Reg::new((bits & REG_MASK) as u8).unwrap_or(Reg::ZERO)
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> Reg {
        field_reg(self >> 7)
    }

    #[inline(always)]
    fn rs1(&self) -> Reg {
        field_reg(self >> 15)
    }

    #[inline(always)]
    fn rs2(&self) -> Reg {
        field_reg(self >> 20)
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct6(&self) -> u32 {
        (self >> 26) & FUNCT6_MASK
    }

    #[inline(always)]
    fn imm_i(&self) -> i32 {
        (*self as i32) >> 20
    }

    #[inline(always)]
    fn imm_u(&self) -> u32 {
        self >> 12
    }

    #[inline(always)]
    fn imm_b(&self) -> i32 {
        let bit11 = (self >> 7) & 1;
        let bits4_1 = (self >> 8) & 0xF;
        let bits10_5 = (self >> 25) & 0x3F;
        let bit12 = (self >> 31) & 1;
        let v = (bit12 << 12) | (bit11 << 11) | (bits10_5 << 5) | (bits4_1 << 1);
        ((v as i32) << 19) >> 19
    }

    #[inline(always)]
    fn imm_j(&self) -> i32 {
        let bits19_12 = (self >> 12) & 0xFF;
        let bit11 = (self >> 20) & 1;
        let bits10_1 = (self >> 21) & 0x3FF;
        let bit20 = (self >> 31) & 1;
        let v = (bit20 << 20) | (bits19_12 << 12) | (bit11 << 11) | (bits10_1 << 1);
        ((v as i32) << 11) >> 11
    }
}

/// A base instruction from the subset the compliance macros lower to.
///
/// Immediates are stored already range-reduced: `imm` fits 12 signed bits,
/// `imm20` fits 20 unsigned bits, branch offsets fit 13 signed bits and jump
/// offsets 21 signed bits. The assembler guarantees these ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `addi rd, rs1, imm`
    Addi {
        /// Destination.
        rd: Reg,
        /// Source.
        rs1: Reg,
        /// Signed 12-bit immediate.
        imm: i32,
    },
    /// `addiw rd, rs1, imm` (RV64 only).
    Addiw {
        /// Destination.
        rd: Reg,
        /// Source.
        rs1: Reg,
        /// Signed 12-bit immediate.
        imm: i32,
    },
    /// `lui rd, imm20`
    Lui {
        /// Destination.
        rd: Reg,
        /// Upper 20 bits.
        imm20: u32,
    },
    /// `slli rd, rs1, shamt`
    Slli {
        /// Destination.
        rd: Reg,
        /// Source.
        rs1: Reg,
        /// Shift amount (0-63).
        shamt: u32,
    },
    /// `bne rs1, rs2, offset`
    Bne {
        /// First operand.
        rs1: Reg,
        /// Second operand.
        rs2: Reg,
        /// Byte offset from this instruction.
        offset: i32,
    },
    /// `jal rd, offset`
    Jal {
        /// Link register.
        rd: Reg,
        /// Byte offset from this instruction.
        offset: i32,
    },
}

/// Packs an I-type word.
const fn i_type(opcode: u32, f3: u32, rd: Reg, rs1: Reg, imm: i32) -> u32 {
    ((imm as u32 & 0xFFF) << 20) | (rs1.bits() << 15) | (f3 << 12) | (rd.bits() << 7) | opcode
}

/// Packs a B-type word.
const fn b_type(f3: u32, rs1: Reg, rs2: Reg, offset: i32) -> u32 {
    let imm = offset as u32;
    let bit12 = (imm >> 12) & 1;
    let bit11 = (imm >> 11) & 1;
    let bits10_5 = (imm >> 5) & 0x3F;
    let bits4_1 = (imm >> 1) & 0xF;
    (bit12 << 31)
        | (bits10_5 << 25)
        | (rs2.bits() << 20)
        | (rs1.bits() << 15)
        | (f3 << 12)
        | (bits4_1 << 8)
        | (bit11 << 7)
        | opcodes::OP_BRANCH
}

/// Packs a J-type word.
const fn j_type(rd: Reg, offset: i32) -> u32 {
    let imm = offset as u32;
    let bit20 = (imm >> 20) & 1;
    let bits10_1 = (imm >> 1) & 0x3FF;
    let bit11 = (imm >> 11) & 1;
    let bits19_12 = (imm >> 12) & 0xFF;
    (bit20 << 31)
        | (bits10_1 << 21)
        | (bit11 << 20)
        | (bits19_12 << 12)
        | (rd.bits() << 7)
        | opcodes::OP_JAL
}

impl Instruction {
    /// Encodes the instruction into its 32-bit word.
    pub const fn encode(self) -> u32 {
        match self {
            Self::Addi { rd, rs1, imm } => i_type(opcodes::OP_IMM, funct3::ADDI, rd, rs1, imm),
            Self::Addiw { rd, rs1, imm } => {
                i_type(opcodes::OP_IMM_32, funct3::ADDI, rd, rs1, imm)
            }
            Self::Lui { rd, imm20 } => ((imm20 & 0xFFFFF) << 12) | (rd.bits() << 7) | opcodes::OP_LUI,
            Self::Slli { rd, rs1, shamt } => {
                i_type(opcodes::OP_IMM, funct3::SLLI, rd, rs1, (shamt & 0x3F) as i32)
            }
            Self::Bne { rs1, rs2, offset } => b_type(funct3::BNE, rs1, rs2, offset),
            Self::Jal { rd, offset } => j_type(rd, offset),
        }
    }

    /// Decodes a 32-bit word.
    ///
    /// # Returns
    ///
    /// The instruction, or `None` if the word is outside the supported subset.
    pub fn decode(word: u32) -> Option<Self> {
        let (rd, rs1, rs2) = (word.rd(), word.rs1(), word.rs2());
        match (word.opcode(), word.funct3()) {
            (opcodes::OP_IMM, funct3::ADDI) => Some(Self::Addi {
                rd,
                rs1,
                imm: word.imm_i(),
            }),
            (opcodes::OP_IMM, funct3::SLLI) if word.funct6() == 0 => Some(Self::Slli {
                rd,
                rs1,
                shamt: (word >> 20) & 0x3F,
            }),
            (opcodes::OP_IMM_32, funct3::ADDI) => Some(Self::Addiw {
                rd,
                rs1,
                imm: word.imm_i(),
            }),
            (opcodes::OP_LUI, _) => Some(Self::Lui {
                rd,
                imm20: word.imm_u(),
            }),
            (opcodes::OP_BRANCH, funct3::BNE) => Some(Self::Bne {
                rs1,
                rs2,
                offset: word.imm_b(),
            }),
            (opcodes::OP_JAL, _) => Some(Self::Jal {
                rd,
                offset: word.imm_j(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Addi { rd, rs1, imm } => write!(f, "addi {rd}, {rs1}, {imm}"),
            Self::Addiw { rd, rs1, imm } => write!(f, "addiw {rd}, {rs1}, {imm}"),
            Self::Lui { rd, imm20 } => write!(f, "lui {rd}, {imm20:#x}"),
            Self::Slli { rd, rs1, shamt } => write!(f, "slli {rd}, {rs1}, {shamt}"),
            Self::Bne { rs1, rs2, offset } => write!(f, "bne {rs1}, {rs2}, {offset}"),
            Self::Jal { rd, offset } => write!(f, "jal {rd}, {offset}"),
        }
    }
}
