//! # Register Token Tests
//!
//! Parsing of `x`/`f` indices and ABI names into register types.

use rstest::rstest;
use rvtest_io_core::common::{Error, Reg};

#[rstest]
#[case("x0", 0)]
#[case("zero", 0)]
#[case("ra", 1)]
#[case("sp", 2)]
#[case("fp", 8)]
#[case("s0", 8)]
#[case("a0", 10)]
#[case("a7", 17)]
#[case("s11", 27)]
#[case("t5", 30)]
#[case("t6", 31)]
#[case("x31", 31)]
#[case(" a1 ", 11)]
fn test_reg_parses_names_and_indices(#[case] token: &str, #[case] idx: usize) {
    let reg: Reg = token.parse().unwrap();
    assert_eq!(reg.index(), idx);
}

#[rstest]
#[case("x32")]
#[case("x01")]
#[case("x")]
#[case("t7")]
#[case("f0")]
#[case("")]
#[case("A0")]
fn test_reg_rejects_unknown(#[case] token: &str) {
    let err = token.parse::<Reg>().unwrap_err();
    assert!(matches!(err, Error::UnknownRegister(_)));
}

#[test]
fn test_reg_display_uses_abi_name() {
    let reg: Reg = "x30".parse().unwrap();
    assert_eq!(reg.to_string(), "t5");
    assert_eq!(Reg::T6.to_string(), "t6");
    assert_eq!(Reg::ZERO.name(), "zero");
}

#[test]
fn test_reg_new_bounds() {
    assert_eq!(Reg::new(31), Some(Reg::T6));
    assert_eq!(Reg::new(32), None);
}

#[test]
fn test_reg_bits_matches_index() {
    assert_eq!(Reg::T5.bits(), 30);
    assert_eq!(Reg::A0.bits(), 10);
}
