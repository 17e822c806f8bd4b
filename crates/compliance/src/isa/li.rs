//! `li` constant materialisation.
//!
//! Lowers `li rd, imm` to the same base sequence GNU as and LLVM emit:
//! - `addi rd, zero, imm` when the value fits 12 signed bits;
//! - `lui` followed by `addiw` (`addi` on RV32) when it fits 32 signed bits;
//! - otherwise the upper bits are materialised recursively, then shifted with
//!   `slli` and the low 12 bits added with `addi`.

use crate::common::reg::Reg;
use crate::config::Xlen;
use crate::isa::instruction::Instruction;

/// Sign-extends the low 12 bits of `value`.
#[inline]
const fn sext12(value: i64) -> i64 {
    (value << 52) >> 52
}

/// Returns the instruction sequence loading `imm` into `rd`.
///
/// On RV32 the immediate is truncated to 32 bits first, so both the signed
/// and unsigned spellings of a 32-bit constant are accepted.
///
/// # Arguments
///
/// * `rd` - Destination register.
/// * `imm` - The constant.
/// * `xlen` - Target register width.
pub fn materialize(rd: Reg, imm: i64, xlen: Xlen) -> Vec<Instruction> {
    let mut out = Vec::with_capacity(2);
    match xlen {
        Xlen::Rv32 => load_i32(rd, i64::from(imm as i32), false, &mut out),
        Xlen::Rv64 => load_i64(rd, imm, &mut out),
    }
    out
}

/// Emits `lui`/`addi(w)` for a value in the signed 32-bit range.
fn load_i32(rd: Reg, value: i64, word_add: bool, out: &mut Vec<Instruction>) {
    let hi20 = ((value + 0x800) >> 12) as u32 & 0xFFFFF;
    let lo12 = sext12(value) as i32;
    if hi20 != 0 {
        out.push(Instruction::Lui { rd, imm20: hi20 });
    }
    if lo12 != 0 || hi20 == 0 {
        let rs1 = if hi20 == 0 { Reg::ZERO } else { rd };
        // RV64 needs addiw after lui so the 32-bit sum wraps before sign extension.
        if word_add && hi20 != 0 {
            out.push(Instruction::Addiw { rd, rs1, imm: lo12 });
        } else {
            out.push(Instruction::Addi { rd, rs1, imm: lo12 });
        }
    }
}

/// Emits the RV64 sequence for an arbitrary 64-bit value.
fn load_i64(rd: Reg, value: i64, out: &mut Vec<Instruction>) {
    if i64::from(value as i32) == value {
        load_i32(rd, value, true, out);
        return;
    }

    let lo12 = sext12(value);
    let hi52 = value.wrapping_add(0x800) >> 12;
    let shift = 12 + hi52.trailing_zeros();
    let upper = ((hi52 >> (shift - 12)) << shift) >> shift;

    load_i64(rd, upper, out);
    out.push(Instruction::Slli {
        rd,
        rs1: rd,
        shamt: shift,
    });
    if lo12 != 0 {
        out.push(Instruction::Addi {
            rd,
            rs1: rd,
            imm: lo12 as i32,
        });
    }
}

/// Evaluates a materialised sequence without a hart, for callers that only
/// need the resulting constant (listings, validation).
///
/// # Returns
///
/// The value `rd` holds after the sequence, zero-extended from XLEN.
pub fn evaluate(seq: &[Instruction], xlen: Xlen) -> u64 {
    let mut acc: u64 = 0;
    for inst in seq {
        acc = match *inst {
            Instruction::Lui { imm20, .. } => i64::from((imm20 << 12) as i32) as u64,
            Instruction::Addi { rs1, imm, .. } => {
                let base = if rs1 == Reg::ZERO { 0 } else { acc };
                base.wrapping_add(i64::from(imm) as u64)
            }
            Instruction::Addiw { rs1, imm, .. } => {
                let base = if rs1 == Reg::ZERO { 0 } else { acc };
                i64::from(base.wrapping_add(i64::from(imm) as u64) as i32) as u64
            }
            Instruction::Slli { shamt, .. } => acc << shamt,
            _ => acc,
        };
        acc = xlen.truncate(acc);
    }
    acc
}
