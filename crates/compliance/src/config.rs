//! Configuration for the compliance I/O macros and the host hart.
//!
//! This module defines the structures used to parameterize expansion and execution.
//! It provides:
//! 1. **Defaults:** The behaviour of the stock `compliance_io.h` header (`t5`/`t6`, `loop_fail`).
//! 2. **Structures:** `general` (register width, load address, step limit) and
//!    `assertion` (scratch registers, failure label) sections.
//! 3. **Loading:** JSON deserialization with per-field defaults and validation.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::{Error, Result};
use crate::common::reg::Reg;

/// Default configuration constants.
mod defaults {
    use crate::common::reg::Reg;

    /// Load address of assembled programs (start of RAM on most RISC-V platforms).
    pub const BASE_ADDRESS: u64 = 0x8000_0000;

    /// Instructions executed before the hart gives up on a program.
    pub const MAX_STEPS: u64 = 1_000_000;

    /// Label the assertion branches to on mismatch.
    pub const FAILURE_LABEL: &str = "loop_fail";

    /// Scratch register receiving the candidate value.
    pub const CANDIDATE_REG: Reg = Reg::T5;

    /// Scratch register receiving the expected immediate.
    pub const EXPECTED_REG: Reg = Reg::T6;
}

/// Base integer register width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Xlen {
    /// 32-bit registers (RV32I).
    Rv32,
    /// 64-bit registers (RV64I).
    #[default]
    Rv64,
}

impl Xlen {
    /// Register width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Rv32 => 32,
            Self::Rv64 => 64,
        }
    }

    /// Truncates a value to the register width (zero-extended storage).
    #[inline]
    pub const fn truncate(self, val: u64) -> u64 {
        match self {
            Self::Rv32 => val & 0xFFFF_FFFF,
            Self::Rv64 => val,
        }
    }
}

impl fmt::Display for Xlen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rv32 => f.write_str("RV32"),
            Self::Rv64 => f.write_str("RV64"),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Register width, load address and execution limits.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Registers and label used by the GPR assertion.
    #[serde(default)]
    pub assertion: AssertionConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Arguments
    ///
    /// * `json` - The configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks that the assertion can be expanded with this configuration.
    ///
    /// The two scratch registers must be distinct and writable, the failure
    /// label must be a valid assembler symbol, and the step limit non-zero.
    pub fn validate(&self) -> Result<()> {
        let assertion = &self.assertion;
        if assertion.candidate_reg == assertion.expected_reg {
            return Err(Error::InvalidConfig(format!(
                "candidate and expected registers are both `{}`",
                assertion.candidate_reg
            )));
        }
        if assertion.candidate_reg == Reg::ZERO || assertion.expected_reg == Reg::ZERO {
            return Err(Error::InvalidConfig(
                "scratch registers cannot be `zero`".to_string(),
            ));
        }
        if !is_symbol(&assertion.failure_label) {
            return Err(Error::InvalidConfig(format!(
                "`{}` is not a valid label",
                assertion.failure_label
            )));
        }
        if self.general.max_steps == 0 {
            return Err(Error::InvalidConfig("max_steps must be non-zero".to_string()));
        }
        if self.general.base_address % 4 != 0 {
            return Err(Error::InvalidConfig(format!(
                "base address {:#x} is not 4-byte aligned",
                self.general.base_address
            )));
        }
        Ok(())
    }
}

/// Returns true if `name` is a plain assembler symbol (`[A-Za-z_.][A-Za-z0-9_.$]*`).
pub(crate) fn is_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '.')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$'))
}

/// General settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Base integer register width.
    #[serde(default)]
    pub xlen: Xlen,

    /// Address the first assembled instruction is placed at.
    #[serde(default = "GeneralConfig::default_base_address")]
    pub base_address: u64,

    /// Upper bound on executed instructions per run.
    #[serde(default = "GeneralConfig::default_max_steps")]
    pub max_steps: u64,
}

impl GeneralConfig {
    fn default_base_address() -> u64 {
        defaults::BASE_ADDRESS
    }

    fn default_max_steps() -> u64 {
        defaults::MAX_STEPS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            xlen: Xlen::default(),
            base_address: defaults::BASE_ADDRESS,
            max_steps: defaults::MAX_STEPS,
        }
    }
}

/// GPR assertion settings.
///
/// The stock header hardcodes these; they are configurable so a harness that
/// reserves `t5`/`t6` for itself can move the scratch pair elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionConfig {
    /// Label branched to when the candidate differs from the expected value.
    #[serde(default = "AssertionConfig::default_failure_label")]
    pub failure_label: String,

    /// Scratch register holding the candidate value after the assertion.
    #[serde(default = "AssertionConfig::default_candidate_reg")]
    pub candidate_reg: Reg,

    /// Scratch register holding the expected value after the assertion.
    #[serde(default = "AssertionConfig::default_expected_reg")]
    pub expected_reg: Reg,
}

impl AssertionConfig {
    fn default_failure_label() -> String {
        defaults::FAILURE_LABEL.to_string()
    }

    const fn default_candidate_reg() -> Reg {
        defaults::CANDIDATE_REG
    }

    const fn default_expected_reg() -> Reg {
        defaults::EXPECTED_REG
    }
}

impl Default for AssertionConfig {
    fn default() -> Self {
        Self {
            failure_label: defaults::FAILURE_LABEL.to_string(),
            candidate_reg: defaults::CANDIDATE_REG,
            expected_reg: defaults::EXPECTED_REG,
        }
    }
}
