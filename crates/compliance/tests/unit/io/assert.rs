use rvtest_io_core::{Mismatch, check_gpr_eq};

#[test]
fn test_equal_values_pass() {
    assert_eq!(check_gpr_eq(5, 5), Ok(()));
}

#[test]
fn test_unequal_values_report_both() {
    let err = check_gpr_eq(7, 5).unwrap_err();
    assert_eq!(
        err,
        Mismatch {
            candidate: 7,
            expected: 5
        }
    );
    assert_eq!(err.to_string(), "assertion failed: candidate 0x7 != expected 0x5");
}

fn sum_is(a: u64, b: u64, expected: u64) -> Result<u64, Mismatch> {
    let sum = a.wrapping_add(b);
    check_gpr_eq(sum, expected)?;
    Ok(sum)
}

#[test]
fn test_mismatch_propagates_with_question_mark() {
    assert_eq!(sum_is(2, 3, 5), Ok(5));
    assert!(sum_is(2, 2, 5).is_err());
}
