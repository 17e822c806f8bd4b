//! # Hart Execution Tests
//!
//! Instruction semantics and termination conditions of the host hart.

use rvtest_io_core::common::Reg;
use rvtest_io_core::config::{Config, Xlen};
use rvtest_io_core::core::Hart;
use rvtest_io_core::isa::{Instruction, Pseudo};
use rvtest_io_core::{Error, Outcome, ProgramBuilder};

fn rv32_config() -> Config {
    let mut config = Config::default();
    config.general.xlen = Xlen::Rv32;
    config
}

#[test]
fn test_addi_sign_extends_immediate() {
    let mut hart = Hart::new(&Config::default());
    hart.step(Instruction::Addi { rd: Reg::T6, rs1: Reg::ZERO, imm: -1 }.encode())
        .unwrap();
    assert_eq!(hart.reg(Reg::T6), u64::MAX);
}

#[test]
fn test_addi_rv32_truncates() {
    let mut hart = Hart::new(&rv32_config());
    hart.step(Instruction::Addi { rd: Reg::T6, rs1: Reg::ZERO, imm: -1 }.encode())
        .unwrap();
    assert_eq!(hart.reg(Reg::T6), 0xFFFF_FFFF);
}

#[test]
fn test_lui_sign_extends_on_rv64() {
    let mut hart = Hart::new(&Config::default());
    hart.step(Instruction::Lui { rd: Reg::T6, imm20: 0x80000 }.encode())
        .unwrap();
    assert_eq!(hart.reg(Reg::T6), 0xFFFF_FFFF_8000_0000);
}

#[test]
fn test_addiw_wraps_at_32_bits() {
    let mut hart = Hart::new(&Config::default());
    hart.set_reg(Reg::T6, 0xFFFF_FFFF_8000_0000);
    hart.step(Instruction::Addiw { rd: Reg::T6, rs1: Reg::T6, imm: -1 }.encode())
        .unwrap();
    assert_eq!(hart.reg(Reg::T6), 0x7FFF_FFFF);
}

#[test]
fn test_addiw_is_illegal_on_rv32() {
    let mut hart = Hart::new(&rv32_config());
    let word = Instruction::Addiw { rd: Reg::T6, rs1: Reg::T6, imm: 1 }.encode();
    let err = hart.step(word).unwrap_err();
    assert!(matches!(err, Error::IllegalInstruction { word: w, .. } if w == word));
}

#[test]
fn test_slli_wide_shift_is_illegal_on_rv32() {
    let mut hart = Hart::new(&rv32_config());
    let word = Instruction::Slli { rd: Reg::T6, rs1: Reg::T6, shamt: 32 }.encode();
    assert!(hart.step(word).is_err());
}

#[test]
fn test_undecodable_word_is_illegal() {
    let mut hart = Hart::new(&Config::default());
    assert!(matches!(
        hart.step(0x0000_0000),
        Err(Error::IllegalInstruction { .. })
    ));
}

#[test]
fn test_bne_not_taken_advances_pc() {
    let mut hart = Hart::new(&Config::default());
    hart.pc = 0x100;
    hart.step(Instruction::Bne { rs1: Reg::T5, rs2: Reg::T6, offset: 64 }.encode())
        .unwrap();
    assert_eq!(hart.pc, 0x104);
}

#[test]
fn test_bne_taken_jumps() {
    let mut hart = Hart::new(&Config::default());
    hart.pc = 0x100;
    hart.set_reg(Reg::T5, 1);
    hart.step(Instruction::Bne { rs1: Reg::T5, rs2: Reg::T6, offset: -8 }.encode())
        .unwrap();
    assert_eq!(hart.pc, 0xF8);
}

#[test]
fn test_jal_links_return_address() {
    let mut hart = Hart::new(&Config::default());
    hart.pc = 0x200;
    hart.step(Instruction::Jal { rd: Reg::new(1).unwrap(), offset: 16 }.encode())
        .unwrap();
    assert_eq!(hart.pc, 0x210);
    assert_eq!(hart.reg(Reg::new(1).unwrap()), 0x204);
}

#[test]
fn test_run_without_failure_label_passes() {
    let config = Config::default();
    let program = ProgramBuilder::new(&config)
        .op(Pseudo::Li { rd: Reg::A0, imm: 3 })
        .build()
        .unwrap();
    let mut hart = Hart::new(&config);
    assert_eq!(hart.run(&program).unwrap(), Outcome::Passed { steps: 1 });
    assert_eq!(hart.reg(Reg::A0), 3);
}

#[test]
fn test_run_hits_step_limit_on_spin() {
    let mut config = Config::default();
    config.general.max_steps = 10;
    let program = ProgramBuilder::new(&config)
        .label("spin")
        .op(Pseudo::J { label: "spin".to_string() })
        .build()
        .unwrap();
    let mut hart = Hart::new(&config);
    assert!(matches!(hart.run(&program), Err(Error::StepLimit(10))));
}

#[test]
fn test_fetch_outside_program_is_none() {
    let config = Config::default();
    let program = ProgramBuilder::new(&config)
        .op(Pseudo::Li { rd: Reg::A0, imm: 1 })
        .build()
        .unwrap();
    let base = program.base();
    assert!(program.fetch(base).is_some());
    assert_eq!(program.fetch(base - 4), None);
    assert_eq!(program.fetch(base + 2), None);
    assert_eq!(program.fetch(program.end()), None);
}

#[test]
fn test_empty_program_passes_without_steps() {
    let config = Config::default();
    let program = ProgramBuilder::new(&config).build().unwrap();
    assert!(program.is_empty());
    let mut hart = Hart::new(&config);
    assert_eq!(hart.run(&program).unwrap(), Outcome::Passed { steps: 0 });
}
