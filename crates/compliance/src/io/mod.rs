//! The `RVTEST_IO_*` macro interface.
//!
//! Compliance tests call six I/O macros. In the stock configuration five of them
//! are inert and only `RVTEST_IO_ASSERT_GPR_EQ` emits code:
//!
//! ```text
//! mv  t5, _R
//! li  t6, _I
//! bne t5, t6, loop_fail
//! ```
//!
//! This module models the interface as the [`IoHooks`] trait. Every I/O hook
//! defaults to an empty expansion and the GPR assertion defaults to the sequence
//! above, so [`ComplianceIo`] reproduces the header exactly while a richer
//! harness can override individual hooks without touching call sites.

/// Host-level assertion helper.
pub mod assert;
/// Header preprocessor with include-guard semantics.
pub mod header;
/// Macro-use lexing and immediate parsing.
pub mod parse;
/// `macro_rules!` renditions producing assembly text.
pub mod text;

use std::fmt;

use tracing::debug;

use crate::common::error::{Error, Result};
use crate::common::reg::Reg;
use crate::config::{AssertionConfig, Config, Xlen};
use crate::isa::pseudo::Pseudo;

/// Ordered instructions produced by one macro use. Empty for inert hooks.
pub type Expansion = Vec<Pseudo>;

/// The six macros of the interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MacroKind {
    /// `RVTEST_IO_INIT`
    Init,
    /// `RVTEST_IO_WRITE_STR(_SP, _STR)`
    WriteStr,
    /// `RVTEST_IO_CHECK()`
    Check,
    /// `RVTEST_IO_ASSERT_GPR_EQ(_SP, _R, _I)`
    AssertGprEq,
    /// `RVTEST_IO_ASSERT_SFPR_EQ(_F, _R, _I)`
    AssertSfprEq,
    /// `RVTEST_IO_ASSERT_DFPR_EQ(_D, _R, _I)`
    AssertDfprEq,
}

impl MacroKind {
    /// Every macro, in header order.
    pub const ALL: [Self; 6] = [
        Self::Init,
        Self::WriteStr,
        Self::Check,
        Self::AssertGprEq,
        Self::AssertSfprEq,
        Self::AssertDfprEq,
    ];

    /// Prefix shared by all macro names.
    pub const PREFIX: &'static str = "RVTEST_IO_";

    /// The macro name as written in test sources.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "RVTEST_IO_INIT",
            Self::WriteStr => "RVTEST_IO_WRITE_STR",
            Self::Check => "RVTEST_IO_CHECK",
            Self::AssertGprEq => "RVTEST_IO_ASSERT_GPR_EQ",
            Self::AssertSfprEq => "RVTEST_IO_ASSERT_SFPR_EQ",
            Self::AssertDfprEq => "RVTEST_IO_ASSERT_DFPR_EQ",
        }
    }

    /// Parameter count, or `None` for the object-like `RVTEST_IO_INIT`.
    pub const fn arity(self) -> Option<usize> {
        match self {
            Self::Init => None,
            Self::Check => Some(0),
            Self::WriteStr => Some(2),
            Self::AssertGprEq | Self::AssertSfprEq | Self::AssertDfprEq => Some(3),
        }
    }

    /// Looks a macro up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for MacroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One parsed macro use.
///
/// Parameters the stock header ignores are kept as the tokens written at the
/// use site, so any syntactically valid argument is accepted for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IoMacro {
    /// `RVTEST_IO_INIT`
    Init,
    /// `RVTEST_IO_WRITE_STR(status, string)`
    WriteStr {
        /// Status register token.
        status: String,
        /// String literal, quotes included.
        text: String,
    },
    /// `RVTEST_IO_CHECK()`
    Check,
    /// `RVTEST_IO_ASSERT_GPR_EQ(status, result, expected)`
    AssertGprEq {
        /// Status register token, unused by the stock expansion.
        status: String,
        /// Register holding the computed result.
        result: Reg,
        /// Expected value.
        expected: i64,
    },
    /// `RVTEST_IO_ASSERT_SFPR_EQ(format, result, expected)`
    AssertSfprEq {
        /// Format/temporary register token.
        format: String,
        /// Result register token.
        result: String,
        /// Expected value token.
        expected: String,
    },
    /// `RVTEST_IO_ASSERT_DFPR_EQ(format, result, expected)`
    AssertDfprEq {
        /// Format/temporary register token.
        format: String,
        /// Result register token.
        result: String,
        /// Expected value token.
        expected: String,
    },
}

impl IoMacro {
    /// Which macro this is.
    pub const fn kind(&self) -> MacroKind {
        match self {
            Self::Init => MacroKind::Init,
            Self::WriteStr { .. } => MacroKind::WriteStr,
            Self::Check => MacroKind::Check,
            Self::AssertGprEq { .. } => MacroKind::AssertGprEq,
            Self::AssertSfprEq { .. } => MacroKind::AssertSfprEq,
            Self::AssertDfprEq { .. } => MacroKind::AssertDfprEq,
        }
    }

    /// Parses a single macro use such as `RVTEST_IO_ASSERT_GPR_EQ(x31, a0, 5)`.
    ///
    /// Trailing whitespace and a trailing `;` are allowed.
    ///
    /// # Arguments
    ///
    /// * `text` - The macro use.
    /// * `xlen` - Register width used to range-check the expected immediate.
    pub fn parse(text: &str, xlen: Xlen) -> Result<Self> {
        let text = text.trim();
        let invocation = parse::scan(text)?;
        let rest = invocation.rest.trim();
        if !(rest.is_empty() || rest == ";") {
            return Err(Error::MalformedInvocation(text.to_string()));
        }
        Self::from_parts(invocation.name, invocation.args, xlen)
    }

    /// Builds a macro from a name and its lexed parameters.
    ///
    /// # Arguments
    ///
    /// * `name` - Macro name.
    /// * `args` - Parameters, or `None` when no parameter list was written.
    /// * `xlen` - Register width used to range-check the expected immediate.
    pub fn from_parts(name: &str, args: Option<Vec<String>>, xlen: Xlen) -> Result<Self> {
        let kind = MacroKind::from_name(name).ok_or_else(|| Error::UnknownMacro(name.to_string()))?;
        let args = match (kind.arity(), args) {
            (None, None) => Vec::new(),
            (Some(expected), Some(args)) if args.len() == expected => args,
            (Some(expected), Some(args)) => {
                return Err(Error::Arity {
                    name: kind.name(),
                    expected,
                    found: args.len(),
                });
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(Error::MalformedInvocation(name.to_string()));
            }
        };

        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or_default();
        Ok(match kind {
            MacroKind::Init => Self::Init,
            MacroKind::Check => Self::Check,
            MacroKind::WriteStr => Self::WriteStr {
                status: next(),
                text: next(),
            },
            MacroKind::AssertGprEq => {
                let status = next();
                let result = next().parse::<Reg>()?;
                let expected = parse::parse_immediate(&next(), xlen)?;
                Self::AssertGprEq {
                    status,
                    result,
                    expected,
                }
            }
            MacroKind::AssertSfprEq => Self::AssertSfprEq {
                format: next(),
                result: next(),
                expected: next(),
            },
            MacroKind::AssertDfprEq => Self::AssertDfprEq {
                format: next(),
                result: next(),
                expected: next(),
            },
        })
    }

    /// Dispatches this use to the matching hook.
    ///
    /// # Arguments
    ///
    /// * `hooks` - The hook implementation in effect.
    pub fn expand<H: IoHooks + ?Sized>(&self, hooks: &H) -> Expansion {
        let expansion = match self {
            Self::Init => hooks.init(),
            Self::WriteStr { status, text } => hooks.write_str(status, text),
            Self::Check => hooks.check(),
            Self::AssertGprEq {
                status,
                result,
                expected,
            } => hooks.assert_gpr_eq(status, *result, *expected),
            Self::AssertSfprEq {
                format,
                result,
                expected,
            } => hooks.assert_sfpr_eq(format, result, expected),
            Self::AssertDfprEq {
                format,
                result,
                expected,
            } => hooks.assert_dfpr_eq(format, result, expected),
        };
        debug!(
            kind = self.kind().name(),
            instructions = expansion.len(),
            "expanded macro"
        );
        expansion
    }
}

/// Builds the `mv`/`li`/`bne` sequence of the GPR assertion.
///
/// # Arguments
///
/// * `config` - Scratch registers and failure label.
/// * `result` - Register holding the computed result.
/// * `expected` - Expected value.
pub fn gpr_eq_sequence(config: &AssertionConfig, result: Reg, expected: i64) -> Expansion {
    vec![
        Pseudo::Mv {
            rd: config.candidate_reg,
            rs: result,
        },
        Pseudo::Li {
            rd: config.expected_reg,
            imm: expected,
        },
        Pseudo::Bne {
            rs1: config.candidate_reg,
            rs2: config.expected_reg,
            label: config.failure_label.clone(),
        },
    ]
}

/// The hooks behind the `RVTEST_IO_*` macros.
///
/// Default methods reproduce the stock header: the I/O hooks expand to
/// nothing and [`assert_gpr_eq`](IoHooks::assert_gpr_eq) emits the
/// compare-and-branch sequence. Implementors override what they need.
pub trait IoHooks {
    /// Scratch registers and failure label used by the GPR assertion.
    fn assertion(&self) -> &AssertionConfig;

    /// `RVTEST_IO_INIT`
    fn init(&self) -> Expansion {
        Expansion::new()
    }

    /// `RVTEST_IO_WRITE_STR(status, text)`
    fn write_str(&self, _status: &str, _text: &str) -> Expansion {
        Expansion::new()
    }

    /// `RVTEST_IO_CHECK()`
    fn check(&self) -> Expansion {
        Expansion::new()
    }

    /// `RVTEST_IO_ASSERT_GPR_EQ(status, result, expected)`
    ///
    /// Clobbers both scratch registers. `status` is accepted for call-shape
    /// uniformity and never read.
    fn assert_gpr_eq(&self, _status: &str, result: Reg, expected: i64) -> Expansion {
        gpr_eq_sequence(self.assertion(), result, expected)
    }

    /// `RVTEST_IO_ASSERT_SFPR_EQ(format, result, expected)`
    fn assert_sfpr_eq(&self, _format: &str, _result: &str, _expected: &str) -> Expansion {
        Expansion::new()
    }

    /// `RVTEST_IO_ASSERT_DFPR_EQ(format, result, expected)`
    fn assert_dfpr_eq(&self, _format: &str, _result: &str, _expected: &str) -> Expansion {
        Expansion::new()
    }
}

/// The stock hook set: I/O disabled, GPR assertion active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComplianceIo {
    assertion: AssertionConfig,
}

impl ComplianceIo {
    /// Creates the stock hooks from a configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            assertion: config.assertion.clone(),
        }
    }
}

impl IoHooks for ComplianceIo {
    fn assertion(&self) -> &AssertionConfig {
        &self.assertion
    }
}
