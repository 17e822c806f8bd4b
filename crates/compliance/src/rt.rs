//! Bare-metal GPR assertion.
//!
//! On RISC-V targets the assertion is emitted inline, with the same three
//! instructions and the same clobbers as the header:
//!
//! ```ignore
//! let sum = a + b;
//! rvtest_io_core::rvtest_assert_gpr_eq!(x31, sum, 5);
//! ```
//!
//! The including program must define `loop_fail` as a global symbol
//! (`.global loop_fail` in its assembly) so the branch in the inline
//! assembly resolves at link time. A local label in a
//! separate `global_asm!` block is not visible to it. `loop_fail` must never
//! return; the compliance harness spins or halts there.

/// Emits `mv t5, r; li t6, i; bne t5, t6, loop_fail`.
///
/// `$sp` is accepted for call-shape uniformity and ignored. `$i` must be
/// a constant expression. `t5` and `t6` are declared clobbered.
///
/// # Safety
///
/// The expansion contains an `unsafe` block: control leaving through
/// `loop_fail` is only sound if that symbol does not return into Rust code.
#[macro_export]
macro_rules! rvtest_assert_gpr_eq {
    ($sp:tt, $r:expr, $i:expr) => {{
        let value: usize = $r;
        // SAFETY: reads one register, clobbers t5/t6, and only leaves the
        // block through `loop_fail`, which never returns.
        unsafe {
            ::core::arch::asm!(
                "mv t5, {r}",
                "li t6, {i}",
                "bne t5, t6, loop_fail",
                r = in(reg) value,
                i = const $i,
                out("t5") _,
                out("t6") _,
                options(nomem, nostack),
            );
        }
    }};
}

/// `RVTEST_IO_INIT` and friends: nothing to emit on bare metal.
#[macro_export]
macro_rules! rvtest_io_noop {
    ($($args:tt)*) => {{}};
}
