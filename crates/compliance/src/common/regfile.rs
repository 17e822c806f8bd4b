//! Register File.
//!
//! `RegisterFile` puts typed [`Reg`] access in front of the integer register
//! storage. The assertion macros only ever touch integer registers, so there
//! is no floating-point state. It provides:
//! 1. **Abstraction:** Reads and writes keyed by [`Reg`] rather than raw indices.
//! 2. **Observability:** A register dump used after an assertion to inspect scratch registers.

use crate::common::reg::Reg;
use crate::core::arch::gpr::Gpr;

/// Integer register file addressed by [`Reg`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self { gpr: Gpr::new() }
    }

    /// Reads a value from a general-purpose register. `x0` always returns 0.
    pub fn read(&self, reg: Reg) -> u64 {
        self.gpr.read(reg.index())
    }

    /// Writes a value to a general-purpose register. Writes to `x0` are ignored.
    pub fn write(&mut self, reg: Reg, val: u64) {
        self.gpr.write(reg.index(), val);
    }

    /// Renders the contents of all general-purpose registers.
    pub fn dump(&self) -> String {
        self.gpr.dump()
    }
}
