use rvtest_io_core::common::Reg;
use rvtest_io_core::config::Config;
use rvtest_io_core::isa::{Instruction, Pseudo};
use rvtest_io_core::{ComplianceIo, Error, IoMacro, ProgramBuilder};

fn fail_loop(builder: ProgramBuilder) -> ProgramBuilder {
    builder
        .label("loop_fail")
        .op(Pseudo::J {
            label: "loop_fail".to_string(),
        })
}

#[test]
fn test_layout_and_offsets() {
    let config = Config::default();
    let hooks = ComplianceIo::new(&config);
    let assertion = IoMacro::parse("RVTEST_IO_ASSERT_GPR_EQ(x31, a0, 5)", config.general.xlen).unwrap();
    let program = fail_loop(ProgramBuilder::new(&config).invoke(&hooks, &assertion))
        .build()
        .unwrap();

    let base = config.general.base_address;
    assert_eq!(program.base(), base);
    assert_eq!(program.end(), base + 16);
    assert_eq!(program.label("loop_fail"), Some(base + 12));
    assert_eq!(program.len(), 4);
    assert_eq!(
        program.words(),
        [0x0005_0F13, 0x0050_0F93, 0x01FF_1263, 0x0000_006F]
    );
    assert_eq!(
        program.instructions()[2],
        (
            base + 8,
            Instruction::Bne {
                rs1: Reg::T5,
                rs2: Reg::T6,
                offset: 4
            }
        )
    );
}

#[test]
fn test_wide_li_occupies_several_words() {
    let config = Config::default();
    let program = ProgramBuilder::new(&config)
        .op(Pseudo::Li {
            rd: Reg::T6,
            imm: 0x1234_5678,
        })
        .label("after")
        .build()
        .unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(program.label("after"), Some(program.end()));
}

#[test]
fn test_backward_branch() {
    let config = Config::default();
    let program = ProgramBuilder::new(&config)
        .label("top")
        .op(Pseudo::Li { rd: Reg::A0, imm: 1 })
        .op(Pseudo::Bne {
            rs1: Reg::ZERO,
            rs2: Reg::A0,
            label: "top".to_string(),
        })
        .build()
        .unwrap();
    assert_eq!(
        program.instructions()[1].1,
        Instruction::Bne {
            rs1: Reg::ZERO,
            rs2: Reg::A0,
            offset: -4
        }
    );
}

#[test]
fn test_duplicate_label() {
    let err = fail_loop(fail_loop(ProgramBuilder::new(&Config::default())))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateLabel(label) if label == "loop_fail"));
}

#[test]
fn test_branch_out_of_range() {
    let config = Config::default();
    let hooks = ComplianceIo::new(&config);
    let assertion = IoMacro::parse("RVTEST_IO_ASSERT_GPR_EQ(x31, a0, 5)", config.general.xlen).unwrap();
    let padding = std::iter::repeat_n(Pseudo::Mv { rd: Reg::A0, rs: Reg::A0 }, 1100);
    let err = fail_loop(ProgramBuilder::new(&config).invoke(&hooks, &assertion).ops(padding))
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::BranchOutOfRange { ref label, offset } if label == "loop_fail" && offset == 4404
    ));
}

#[test]
fn test_jump_reaches_further_than_branch() {
    let config = Config::default();
    let padding = std::iter::repeat_n(Pseudo::Mv { rd: Reg::A0, rs: Reg::A0 }, 1100);
    let program = ProgramBuilder::new(&config)
        .op(Pseudo::J {
            label: "far".to_string(),
        })
        .ops(padding)
        .label("far")
        .build()
        .unwrap();
    assert_eq!(
        program.instructions()[0].1,
        Instruction::Jal {
            rd: Reg::ZERO,
            offset: 4404
        }
    );
}
