//! Text renditions of the macros for `global_asm!`.
//!
//! Each macro evaluates to a string literal holding exactly what the C header
//! expands to, so Rust-hosted compliance tests can splice them into assembly:
//!
//! ```
//! use rvtest_io_core::{rvtest_io_assert_gpr_eq, rvtest_io_check};
//!
//! assert_eq!(
//!     rvtest_io_assert_gpr_eq!(x31, a0, 5),
//!     "mv t5, a0\nli t6, 5\nbne t5, t6, loop_fail\n"
//! );
//! assert_eq!(rvtest_io_check!(), "");
//! ```

/// `RVTEST_IO_INIT`: expands to nothing.
#[macro_export]
macro_rules! rvtest_io_init {
    () => {
        ""
    };
}

/// `RVTEST_IO_WRITE_STR(_SP, _STR)`: expands to nothing.
#[macro_export]
macro_rules! rvtest_io_write_str {
    ($sp:tt, $str:expr) => {
        ""
    };
}

/// `RVTEST_IO_CHECK()`: expands to nothing.
#[macro_export]
macro_rules! rvtest_io_check {
    () => {
        ""
    };
}

/// `RVTEST_IO_ASSERT_GPR_EQ(_SP, _R, _I)`: `mv`/`li`/`bne` to `loop_fail`.
///
/// `_SP` is accepted and dropped. `t5` and `t6` are clobbered.
///
/// `_I` is an integer literal, optionally negated, and is copied into the
/// text exactly as written. Spell it the way the assembler reads it: no `_`
/// digit separators and no type suffixes (`0xffffffff`, not `0xFFFF_FFFF_u32`).
#[macro_export]
macro_rules! rvtest_io_assert_gpr_eq {
    ($sp:tt, $r:ident, - $i:literal) => {
        concat!(
            "mv t5, ",
            stringify!($r),
            "\n",
            "li t6, -",
            stringify!($i),
            "\n",
            "bne t5, t6, loop_fail\n"
        )
    };
    ($sp:tt, $r:ident, $i:literal) => {
        concat!(
            "mv t5, ",
            stringify!($r),
            "\n",
            "li t6, ",
            stringify!($i),
            "\n",
            "bne t5, t6, loop_fail\n"
        )
    };
}

/// `RVTEST_IO_ASSERT_SFPR_EQ(_F, _R, _I)`: expands to nothing.
#[macro_export]
macro_rules! rvtest_io_assert_sfpr_eq {
    ($f:tt, $r:tt, $i:expr) => {
        ""
    };
}

/// `RVTEST_IO_ASSERT_DFPR_EQ(_D, _R, _I)`: expands to nothing.
#[macro_export]
macro_rules! rvtest_io_assert_dfpr_eq {
    ($d:tt, $r:tt, $i:expr) => {
        ""
    };
}
