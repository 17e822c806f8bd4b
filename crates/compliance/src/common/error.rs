//! Error definitions.
//!
//! An assertion mismatch is never an error: it is a control transfer to the
//! failure label. The variants here cover what an assembler or harness would
//! reject at build time:
//! 1. **Operands:** Unknown register tokens and immediates that do not fit XLEN.
//! 2. **Macros:** Unknown names, wrong arity, use before the header is included.
//! 3. **Assembly:** Undefined or duplicate labels and out-of-range branches.
//! 4. **Execution:** Illegal encodings and runaway programs in the host hart.
//! 5. **Configuration:** Unreadable or invalid configuration files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::Xlen;

/// Errors raised while expanding, assembling or running compliance macros.
#[derive(Debug, Error)]
pub enum Error {
    /// A register operand is not an `x`/`f` index or a known ABI name.
    #[error("unknown register `{0}`")]
    UnknownRegister(String),

    /// An immediate operand is not a number or does not fit the register width.
    #[error("invalid immediate `{token}` for {xlen}")]
    InvalidImmediate {
        /// The offending source token.
        token: String,
        /// Register width the immediate was checked against.
        xlen: Xlen,
    },

    /// A name starting with `RVTEST_IO_` that is not part of the interface.
    #[error("unknown macro `{0}`")]
    UnknownMacro(String),

    /// A macro was used before `compliance_io.h` was included.
    #[error("macro `{0}` used before compliance_io.h was included")]
    UndefinedMacro(&'static str),

    /// An interface macro was defined a second time.
    #[error("macro `{0}` redefined")]
    MacroRedefined(&'static str),

    /// A macro was invoked with the wrong number of parameters.
    #[error("macro `{name}` takes {expected} parameter(s), found {found}")]
    Arity {
        /// Macro name.
        name: &'static str,
        /// Declared parameter count.
        expected: usize,
        /// Parameters present at the use site.
        found: usize,
    },

    /// A macro use could not be split into a name and a parameter list.
    #[error("malformed macro use `{0}`")]
    MalformedInvocation(String),

    /// A branch names a label the program never defines.
    #[error("undefined label `{0}`")]
    UndefinedLabel(String),

    /// The same label was defined twice.
    #[error("duplicate label `{0}`")]
    DuplicateLabel(String),

    /// A conditional branch target is beyond the ±4 KiB B-type range.
    #[error("branch to `{label}` out of range (offset {offset})")]
    BranchOutOfRange {
        /// Target label.
        label: String,
        /// Byte offset from the branch to the label.
        offset: i64,
    },

    /// The hart fetched a word it cannot decode.
    #[error("illegal instruction {word:#010x} at {pc:#x}")]
    IllegalInstruction {
        /// Address of the word.
        pc: u64,
        /// Raw encoding.
        word: u32,
    },

    /// The hart fetched from an address outside the program.
    #[error("instruction fetch outside the program at {0:#x}")]
    FetchFault(u64),

    /// The hart ran for more steps than the configured limit.
    #[error("step limit of {0} exceeded")]
    StepLimit(u64),

    /// A configuration value is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A JSON document (configuration or report) could not be processed.
    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("failed to read `{}`", path.display())]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
