//! # `li` Materialisation Tests
//!
//! Sequence shapes for representative constants, and full-range properties
//! that the sequence produces the constant both by evaluation and on the hart.

use proptest::prelude::*;
use rstest::rstest;

use rvtest_io_core::common::Reg;
use rvtest_io_core::config::{Config, Xlen};
use rvtest_io_core::core::Hart;
use rvtest_io_core::isa::Instruction;
use rvtest_io_core::isa::li::{evaluate, materialize};

use rvtest_io_core::isa::Instruction::{Addi, Addiw, Lui, Slli};

const RD: Reg = Reg::T6;

#[rstest]
#[case::small(5, vec![Addi { rd: RD, rs1: Reg::ZERO, imm: 5 }])]
#[case::minus_one(-1, vec![Addi { rd: RD, rs1: Reg::ZERO, imm: -1 }])]
#[case::upper_only(0x1000, vec![Lui { rd: RD, imm20: 1 }])]
#[case::upper_lower(
    0x1234_5678,
    vec![Lui { rd: RD, imm20: 0x12345 }, Addiw { rd: RD, rs1: RD, imm: 1656 }]
)]
#[case::round_up(0x800, vec![Lui { rd: RD, imm20: 1 }, Addiw { rd: RD, rs1: RD, imm: -2048 }])]
#[case::wide(
    0x1_0000_0000,
    vec![Addi { rd: RD, rs1: Reg::ZERO, imm: 1 }, Slli { rd: RD, rs1: RD, shamt: 32 }]
)]
fn test_rv64_sequences(#[case] imm: i64, #[case] expected: Vec<Instruction>) {
    assert_eq!(materialize(RD, imm, Xlen::Rv64), expected);
}

#[test]
fn test_rv32_uses_addi_after_lui() {
    assert_eq!(
        materialize(RD, 0x800, Xlen::Rv32),
        vec![Lui { rd: RD, imm20: 1 }, Addi { rd: RD, rs1: RD, imm: -2048 }]
    );
}

#[test]
fn test_rv32_unsigned_spelling_matches_signed() {
    assert_eq!(
        materialize(RD, 0xFFFF_FFFF, Xlen::Rv32),
        materialize(RD, -1, Xlen::Rv32)
    );
}

#[rstest]
#[case(i64::MIN)]
#[case(i64::MAX)]
#[case(0x7FFF_F800)]
#[case(0x8000_0000)]
#[case(-0x8000_0001)]
fn test_rv64_edge_values(#[case] imm: i64) {
    let seq = materialize(RD, imm, Xlen::Rv64);
    assert!(seq.len() <= 8, "{seq:?}");
    assert_eq!(evaluate(&seq, Xlen::Rv64), imm as u64);
}

/// Runs a sequence on a fresh hart and returns `rd`.
fn run_on_hart(seq: &[Instruction], xlen: Xlen) -> u64 {
    let mut config = Config::default();
    config.general.xlen = xlen;
    let mut hart = Hart::new(&config);
    for inst in seq {
        hart.step(inst.encode()).unwrap();
    }
    hart.reg(RD)
}

proptest! {
    #[test]
    fn prop_rv64_materialises_any_value(imm in any::<i64>()) {
        let seq = materialize(RD, imm, Xlen::Rv64);
        prop_assert!(seq.len() <= 8);
        prop_assert_eq!(evaluate(&seq, Xlen::Rv64), imm as u64);
        prop_assert_eq!(run_on_hart(&seq, Xlen::Rv64), imm as u64);
    }

    #[test]
    fn prop_rv32_materialises_any_word(imm in any::<i32>()) {
        let seq = materialize(RD, i64::from(imm), Xlen::Rv32);
        prop_assert!(seq.len() <= 2);
        prop_assert!(
            !seq.iter().any(|i| matches!(i, Addiw { .. } | Slli { .. })),
            "RV64-only instruction in {:?}",
            seq
        );
        prop_assert_eq!(run_on_hart(&seq, Xlen::Rv32), u64::from(imm as u32));
    }
}
