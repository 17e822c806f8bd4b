use rvtest_io_core::common::Reg;
use rvtest_io_core::config::Xlen;
use rvtest_io_core::isa::{Instruction, Pseudo};

#[test]
fn test_display_matches_header_text() {
    let items = [
        Pseudo::Mv { rd: Reg::T5, rs: Reg::A0 },
        Pseudo::Li { rd: Reg::T6, imm: 5 },
        Pseudo::Bne {
            rs1: Reg::T5,
            rs2: Reg::T6,
            label: "loop_fail".to_string(),
        },
    ];
    let text: Vec<String> = items.iter().map(ToString::to_string).collect();
    assert_eq!(text, ["mv t5, a0", "li t6, 5", "bne t5, t6, loop_fail"]);
}

#[test]
fn test_li_display_radix() {
    assert_eq!(Pseudo::Li { rd: Reg::T6, imm: -1 }.to_string(), "li t6, -1");
    assert_eq!(Pseudo::Li { rd: Reg::T6, imm: 4095 }.to_string(), "li t6, 4095");
    assert_eq!(
        Pseudo::Li { rd: Reg::T6, imm: 0x1234_5678 }.to_string(),
        "li t6, 0x12345678"
    );
}

#[test]
fn test_targets() {
    assert_eq!(Pseudo::J { label: "end".to_string() }.target(), Some("end"));
    assert_eq!(Pseudo::Mv { rd: Reg::T5, rs: Reg::A0 }.target(), None);
}

#[test]
fn test_mv_lowers_to_addi() {
    assert_eq!(
        Pseudo::Mv { rd: Reg::T5, rs: Reg::A0 }.lower(Xlen::Rv64),
        vec![Instruction::Addi { rd: Reg::T5, rs1: Reg::A0, imm: 0 }]
    );
}

#[test]
fn test_branch_lowering_is_one_word() {
    let bne = Pseudo::Bne {
        rs1: Reg::T5,
        rs2: Reg::T6,
        label: "loop_fail".to_string(),
    };
    assert_eq!(
        bne.lower(Xlen::Rv32),
        vec![Instruction::Bne { rs1: Reg::T5, rs2: Reg::T6, offset: 0 }]
    );
}
