//! # Lexing Tests
//!
//! Parameter splitting follows cpp rules and immediates follow GNU as
//! literal syntax, range-checked per XLEN.

use rstest::rstest;

use rvtest_io_core::Error;
use rvtest_io_core::config::Xlen;
use rvtest_io_core::io::parse::{parse_immediate, scan, split_args};

#[test]
fn test_scan_respects_strings_and_nesting() {
    let inv = scan(r#"RVTEST_IO_WRITE_STR(x31, "a, (b") ; tail"#).unwrap();
    assert_eq!(inv.name, "RVTEST_IO_WRITE_STR");
    assert_eq!(
        inv.args,
        Some(vec!["x31".to_string(), r#""a, (b""#.to_string()])
    );
    assert_eq!(inv.rest, " ; tail");
}

#[test]
fn test_scan_without_parameter_list() {
    let inv = scan("RVTEST_IO_INIT  # setup").unwrap();
    assert_eq!(inv.name, "RVTEST_IO_INIT");
    assert_eq!(inv.args, None);
    assert_eq!(inv.rest, "  # setup");
}

#[test]
fn test_scan_unterminated_list() {
    assert!(matches!(
        scan("RVTEST_IO_ASSERT_GPR_EQ(x31, a0, 5"),
        Err(Error::MalformedInvocation(_))
    ));
}

#[test]
fn test_split_args() {
    assert!(split_args("  ").is_empty());
    assert_eq!(split_args(" a , f(b, c) "), ["a", "f(b, c)"]);
    assert_eq!(split_args(r#"x1, "\", x""#), ["x1", r#""\", x""#]);
}

#[rstest]
#[case("5", 5)]
#[case("-5", -5)]
#[case("+7", 7)]
#[case("0", 0)]
#[case("0x10", 16)]
#[case("0XfF", 255)]
#[case("0b101", 5)]
#[case("010", 8)]
#[case("-0x800", -2048)]
#[case("-9223372036854775808", i64::MIN)]
#[case("0xFFFFFFFFFFFFFFFF", -1)]
fn test_rv64_immediates(#[case] token: &str, #[case] value: i64) {
    assert_eq!(parse_immediate(token, Xlen::Rv64).unwrap(), value);
}

#[rstest]
#[case("-2147483648", -2_147_483_648)]
#[case("0x7FFFFFFF", 0x7FFF_FFFF)]
#[case("0xFFFFFFFF", 0xFFFF_FFFF)]
fn test_rv32_immediates(#[case] token: &str, #[case] value: i64) {
    assert_eq!(parse_immediate(token, Xlen::Rv32).unwrap(), value);
}

#[rstest]
#[case("", Xlen::Rv64)]
#[case("abc", Xlen::Rv64)]
#[case("0x", Xlen::Rv64)]
#[case("08", Xlen::Rv64)]
#[case("1.5", Xlen::Rv64)]
#[case("--1", Xlen::Rv64)]
#[case("18446744073709551616", Xlen::Rv64)]
#[case("-9223372036854775809", Xlen::Rv64)]
#[case("0x100000000", Xlen::Rv32)]
#[case("-2147483649", Xlen::Rv32)]
fn test_invalid_immediates(#[case] token: &str, #[case] xlen: Xlen) {
    let err = parse_immediate(token, xlen).unwrap_err();
    assert!(matches!(err, Error::InvalidImmediate { xlen: x, .. } if x == xlen));
}
