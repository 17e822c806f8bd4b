//! Register index type.
//!
//! Macro parameters name registers as text (`a0`, `x31`, `t6`). [`Reg`]
//! parses and validates those tokens once so the expander and the hart work
//! with plain indices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::Error;
use crate::isa::abi;

/// Integer (general-purpose) register index, 0–31.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Reg(u8);

impl Reg {
    /// Hardwired zero register.
    pub const ZERO: Self = Self(abi::REG_ZERO);
    /// First argument register.
    pub const A0: Self = Self(abi::REG_A0);
    /// Temporary `t5`, the default candidate holder.
    pub const T5: Self = Self(abi::REG_T5);
    /// Temporary `t6`, the default expected holder.
    pub const T6: Self = Self(abi::REG_T6);

    /// Creates a register from an index, or `None` if the index is not below 32.
    pub const fn new(idx: u8) -> Option<Self> {
        if idx < 32 { Some(Self(idx)) } else { None }
    }

    /// Returns the register index as used by the register files.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the 5-bit field value for instruction encoding.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0 as u32
    }

    /// Returns the ABI name (`t5`, `a0`, ...).
    pub fn name(self) -> &'static str {
        abi::xreg(self.index())
    }
}

impl FromStr for Reg {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        abi::xreg_index(token)
            .map(Self)
            .ok_or_else(|| Error::UnknownRegister(token.to_string()))
    }
}

impl TryFrom<String> for Reg {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Reg> for String {
    fn from(reg: Reg) -> Self {
        reg.name().to_string()
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
