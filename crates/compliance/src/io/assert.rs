//! Host-level rendition of the GPR assertion.
//!
//! Outside assembly the compare-and-branch collapses to a comparison with an
//! early return; the scratch-register clobbering has no counterpart here.

use thiserror::Error;

/// A failed equality assertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("assertion failed: candidate {candidate:#x} != expected {expected:#x}")]
pub struct Mismatch {
    /// Value that was checked.
    pub candidate: u64,
    /// Value it was expected to equal.
    pub expected: u64,
}

/// Checks `candidate == expected`.
///
/// # Returns
///
/// `Ok(())` when equal, otherwise the [`Mismatch`] for the caller to route to
/// its failure path with `?`.
pub const fn check_gpr_eq(candidate: u64, expected: u64) -> Result<(), Mismatch> {
    if candidate == expected {
        Ok(())
    } else {
        Err(Mismatch {
            candidate,
            expected,
        })
    }
}
