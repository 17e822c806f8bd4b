//! # Error Display Tests

use rvtest_io_core::Error;
use rvtest_io_core::config::Xlen;

#[test]
fn test_unknown_register_display() {
    let err = Error::UnknownRegister("q9".to_string());
    assert_eq!(err.to_string(), "unknown register `q9`");
}

#[test]
fn test_invalid_immediate_names_xlen() {
    let err = Error::InvalidImmediate {
        token: "0x1_0000_0000".to_string(),
        xlen: Xlen::Rv32,
    };
    assert_eq!(err.to_string(), "invalid immediate `0x1_0000_0000` for RV32");
}

#[test]
fn test_undefined_label_display() {
    let err = Error::UndefinedLabel("loop_fail".to_string());
    assert_eq!(err.to_string(), "undefined label `loop_fail`");
}

#[test]
fn test_arity_display() {
    let err = Error::Arity {
        name: "RVTEST_IO_ASSERT_GPR_EQ",
        expected: 3,
        found: 2,
    };
    assert!(err.to_string().contains("takes 3 parameter(s), found 2"));
}

#[test]
fn test_illegal_instruction_display() {
    let err = Error::IllegalInstruction {
        pc: 0x8000_0000,
        word: 0xFFFF_FFFF,
    };
    assert_eq!(
        err.to_string(),
        "illegal instruction 0xffffffff at 0x80000000"
    );
}

#[test]
fn test_json_error_keeps_source() {
    let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = Error::from(parse);
    assert!(std::error::Error::source(&err).is_some());
}
