//! Program assembly and execution.
//!
//! Ties the pieces together for host-side checking of compliance macros:
//! 1. **Assembly:** [`ProgramBuilder`] lays out macro expansions and labels.
//! 2. **Execution:** [`run`] loads a program into a fresh [`Hart`] and runs it.
//! 3. **Outcome:** [`Outcome`] reports whether execution fell through or reached
//!    the failure label.

/// Label resolution and encoding.
pub mod assembler;

use std::fmt;

use crate::common::error::Result;
use crate::common::reg::Reg;
use crate::config::Config;
use crate::core::hart::Hart;

pub use assembler::{Program, ProgramBuilder};

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Execution ran off the end of the program without reaching the failure label.
    Passed {
        /// Instructions executed.
        steps: u64,
    },
    /// Control reached the failure label.
    Failed {
        /// Address of the instruction that transferred control there.
        from: u64,
        /// Instructions executed.
        steps: u64,
    },
}

impl Outcome {
    /// Returns true for [`Outcome::Passed`].
    pub const fn passed(self) -> bool {
        matches!(self, Self::Passed { .. })
    }

    /// Instructions executed.
    pub const fn steps(self) -> u64 {
        match self {
            Self::Passed { steps } | Self::Failed { steps, .. } => steps,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed { steps } => write!(f, "PASS ({steps} instructions)"),
            Self::Failed { from, steps } => {
                write!(f, "FAIL (branch at {from:#x} after {steps} instructions)")
            }
        }
    }
}

/// Runs `program` on a fresh hart after presetting `regs`.
///
/// # Arguments
///
/// * `config` - Harness configuration.
/// * `program` - Assembled program.
/// * `regs` - Initial register values.
///
/// # Returns
///
/// The outcome together with the hart, so callers can inspect the scratch registers.
pub fn run(config: &Config, program: &Program, regs: &[(Reg, u64)]) -> Result<(Outcome, Hart)> {
    let mut hart = Hart::new(config);
    for &(reg, val) in regs {
        hart.set_reg(reg, val);
    }
    let outcome = hart.run(program)?;
    Ok((outcome, hart))
}
