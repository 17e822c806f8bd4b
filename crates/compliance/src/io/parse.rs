//! Lexing of macro uses.
//!
//! Splits `NAME(arg, arg, ...)` into a name and its parameters the way the C
//! preprocessor would (commas inside string literals or nested parentheses do
//! not separate parameters), and parses immediate literals the way GNU as does
//! (`0x`, `0b`, leading-zero octal, decimal, optional sign).

use tracing::warn;

use crate::common::error::{Error, Result};
use crate::config::Xlen;

/// A macro use located in a line of source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Macro name.
    pub name: &'a str,
    /// Parameters, or `None` when the name is not followed by `(`.
    pub args: Option<Vec<String>>,
    /// Text following the use.
    pub rest: &'a str,
}

/// Returns true for characters that may continue a C identifier.
pub(crate) const fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scans a macro use starting at the beginning of `text`.
///
/// # Arguments
///
/// * `text` - Source text starting with the macro name.
///
/// # Returns
///
/// The name, its parameters and the remaining text, or
/// [`Error::MalformedInvocation`] if the parameter list is unterminated.
pub fn scan(text: &str) -> Result<Invocation<'_>> {
    let name_len = text.find(|c: char| !is_ident(c)).unwrap_or(text.len());
    let (name, after) = text.split_at(name_len);
    let trimmed = after.trim_start();
    if !trimmed.starts_with('(') {
        return Ok(Invocation {
            name,
            args: None,
            rest: after,
        });
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (pos, c) in trimmed.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let inner = &trimmed[1..pos];
                    return Ok(Invocation {
                        name,
                        args: Some(split_args(inner)),
                        rest: &trimmed[pos + 1..],
                    });
                }
            }
            _ => {}
        }
    }
    Err(Error::MalformedInvocation(text.trim_end().to_string()))
}

/// Splits a parameter list on top-level commas and trims each parameter.
///
/// An empty or all-whitespace list yields no parameters.
pub fn split_args(inner: &str) -> Vec<String> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    let mut args = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for c in inner.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            current.push(c);
            continue;
        }
        match c {
            ',' if depth == 0 => {
                args.push(current.trim().to_string());
                current.clear();
                continue;
            }
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        current.push(c);
    }
    args.push(current.trim().to_string());
    args
}

/// Parses an immediate literal for a register of width `xlen`.
///
/// Accepted ranges are those `li` accepts: `-2^63 ..= 2^64-1` on RV64 and
/// `-2^31 ..= 2^32-1` on RV32. RV64 values above `i64::MAX` are returned as
/// their two's-complement `i64`.
///
/// # Arguments
///
/// * `token` - The literal as written.
/// * `xlen` - Register width the value is destined for.
pub fn parse_immediate(token: &str, xlen: Xlen) -> Result<i64> {
    let text = token.trim();
    let invalid = || Error::InvalidImmediate {
        token: text.to_string(),
        xlen,
    };

    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (radix, digits) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        (16, hex)
    } else if let Some(bin) = body
        .strip_prefix("0b")
        .or_else(|| body.strip_prefix("0B"))
    {
        (2, bin)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    let magnitude = u128::from_str_radix(digits, radix).map_err(|_| invalid())?;
    if magnitude > u128::from(u64::MAX) {
        return Err(invalid());
    }
    let value = if negative {
        -(magnitude as i128)
    } else {
        magnitude as i128
    };

    let (min, max) = match xlen {
        Xlen::Rv32 => (-(1i128 << 31), i128::from(u32::MAX)),
        Xlen::Rv64 => (-(1i128 << 63), i128::from(u64::MAX)),
    };
    if !(min..=max).contains(&value) {
        return Err(invalid());
    }
    if xlen == Xlen::Rv32 && value > i128::from(i32::MAX) {
        warn!(token = text, "unsigned RV32 immediate reinterpreted as negative");
    }
    Ok(value as u64 as i64)
}
