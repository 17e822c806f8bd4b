//! RISC-V Application Binary Interface (ABI) register names.
//!
//! Maps between register indices and the ABI names assemblers accept
//! (`zero`, `ra`, `t5`, ...), alongside the raw `xN` form.

/// Register x0 (zero register, always zero).
pub const REG_ZERO: u8 = 0;
/// Register x1 (return address, ra).
pub const REG_RA: u8 = 1;
/// Register x2 (stack pointer, sp).
pub const REG_SP: u8 = 2;
/// Register x10 (first argument/return value, a0).
pub const REG_A0: u8 = 10;
/// Register x30 (temporary, t5). Candidate holder of the GPR assertion.
pub const REG_T5: u8 = 30;
/// Register x31 (temporary, t6). Expected holder of the GPR assertion.
pub const REG_T6: u8 = 31;

/// ABI register names for x0–x31.
pub const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name for an integer register index.
#[inline]
pub fn xreg(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("x??")
}

/// Parses a numeric register token of the form `<prefix><0..=31>`.
fn numbered(token: &str, prefix: char) -> Option<u8> {
    let digits = token.strip_prefix(prefix)?;
    if digits.is_empty() || (digits.len() > 1 && digits.starts_with('0')) {
        return None;
    }
    digits.parse::<u8>().ok().filter(|&n| n < 32)
}

/// Looks up an integer register by `xN` or ABI name (`fp` aliases `s0`).
///
/// # Arguments
///
/// * `token` - Register token as written in assembly source.
///
/// # Returns
///
/// The register index, or `None` if the token names no integer register.
pub fn xreg_index(token: &str) -> Option<u8> {
    if token == "fp" {
        return Some(8);
    }
    numbered(token, 'x').or_else(|| {
        REG_NAMES
            .iter()
            .position(|&name| name == token)
            .map(|idx| idx as u8)
    })
}
