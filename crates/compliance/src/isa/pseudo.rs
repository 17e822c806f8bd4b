//! Pseudo-instructions.
//!
//! Macro expansions are expressed at assembler level (`mv`, `li`, `bne`, `j`)
//! exactly as they appear in the header. Branch targets stay symbolic until
//! the assembler lays the program out.

use std::fmt;

use crate::common::reg::Reg;
use crate::config::Xlen;
use crate::isa::instruction::Instruction;
use crate::isa::li;

/// An assembler-level instruction as produced by macro expansion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pseudo {
    /// `mv rd, rs` (`addi rd, rs, 0`).
    Mv {
        /// Destination.
        rd: Reg,
        /// Source.
        rs: Reg,
    },
    /// `li rd, imm`.
    Li {
        /// Destination.
        rd: Reg,
        /// Constant, already range-checked against XLEN.
        imm: i64,
    },
    /// `bne rs1, rs2, label`.
    Bne {
        /// First operand.
        rs1: Reg,
        /// Second operand.
        rs2: Reg,
        /// Branch target.
        label: String,
    },
    /// `j label` (`jal zero, label`).
    J {
        /// Jump target.
        label: String,
    },
}

impl Pseudo {
    /// The label this item transfers control to, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Bne { label, .. } | Self::J { label } => Some(label),
            Self::Mv { .. } | Self::Li { .. } => None,
        }
    }

    /// Lowers the item to base instructions with branch offsets left at zero.
    ///
    /// The assembler patches offsets once label addresses are known; the
    /// length of the returned sequence never depends on them.
    pub fn lower(&self, xlen: Xlen) -> Vec<Instruction> {
        match *self {
            Self::Mv { rd, rs } => vec![Instruction::Addi { rd, rs1: rs, imm: 0 }],
            Self::Li { rd, imm } => li::materialize(rd, imm, xlen),
            Self::Bne { rs1, rs2, .. } => vec![Instruction::Bne { rs1, rs2, offset: 0 }],
            Self::J { .. } => vec![Instruction::Jal {
                rd: Reg::ZERO,
                offset: 0,
            }],
        }
    }
}

/// Formats an immediate the way the listing prints it: small values in
/// decimal, wide non-negative values in hex.
struct Imm(i64);

impl fmt::Display for Imm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 0x1000 {
            write!(f, "{:#x}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Display for Pseudo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mv { rd, rs } => write!(f, "mv {rd}, {rs}"),
            Self::Li { rd, imm } => write!(f, "li {rd}, {}", Imm(*imm)),
            Self::Bne { rs1, rs2, label } => write!(f, "bne {rs1}, {rs2}, {label}"),
            Self::J { label } => write!(f, "j {label}"),
        }
    }
}
