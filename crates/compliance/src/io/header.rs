//! Header preprocessor.
//!
//! Expands `RVTEST_IO_*` uses in compliance test sources. The macros only
//! exist once `compliance_io.h` has been included; the include is guarded by
//! `_COMPLIANCE_IO_H`, so repeated includes in one unit are no-ops while a
//! second, unguarded definition would be rejected as a redefinition.
//!
//! Lines that are neither includes of the header nor macro uses pass through
//! unchanged. `#define`/`#undef` lines are tracked so a pre-set guard or a
//! source-level definition behaves as it would under cpp, and are passed
//! through as well. Backslash-continued lines form one logical line, so a
//! multi-line `#define` body stays part of its directive.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::common::error::{Error, Result};
use crate::config::{Config, Xlen};
use crate::io::parse;
use crate::io::{ComplianceIo, IoHooks, IoMacro, MacroKind};

/// File name of the header.
pub const HEADER_NAME: &str = "compliance_io.h";

/// Include guard of the header.
pub const HEADER_GUARD: &str = "_COMPLIANCE_IO_H";

/// Where an interface macro's definition came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Definition {
    /// Defined by including the header; uses are expanded through the hooks.
    Header,
    /// Defined by a `#define` in the source; uses are left for the downstream cpp.
    Source,
}

/// One translation unit's worth of preprocessor state.
#[derive(Debug)]
pub struct Preprocessor<H: IoHooks = ComplianceIo> {
    hooks: H,
    xlen: Xlen,
    defines: BTreeSet<String>,
    macros: HashMap<MacroKind, Definition>,
}

impl Preprocessor<ComplianceIo> {
    /// Creates a preprocessor using the stock hooks.
    pub fn new(config: &Config) -> Self {
        Self::with_hooks(ComplianceIo::new(config), config.general.xlen)
    }
}

impl<H: IoHooks> Preprocessor<H> {
    /// Creates a preprocessor dispatching macro uses to `hooks`.
    pub fn with_hooks(hooks: H, xlen: Xlen) -> Self {
        Self {
            hooks,
            xlen,
            defines: BTreeSet::new(),
            macros: HashMap::new(),
        }
    }

    /// The hooks macro uses are dispatched to.
    pub const fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Returns true if `name` is currently defined.
    pub fn is_defined(&self, name: &str) -> bool {
        self.defines.contains(name)
    }

    /// Processes `#include "compliance_io.h"`.
    ///
    /// # Returns
    ///
    /// `true` if the header body was processed, `false` if the guard was
    /// already defined and the include was skipped.
    pub fn include_header(&mut self) -> Result<bool> {
        if self.is_defined(HEADER_GUARD) {
            debug!(guard = HEADER_GUARD, "header already included; skipping");
            return Ok(false);
        }
        self.define(HEADER_GUARD);
        for kind in MacroKind::ALL {
            self.define_macro(kind, Definition::Header)?;
        }
        debug!(guard = HEADER_GUARD, "header included");
        Ok(true)
    }

    /// Defines one interface macro, rejecting redefinitions.
    fn define_macro(&mut self, kind: MacroKind, origin: Definition) -> Result<()> {
        if self.macros.contains_key(&kind) {
            return Err(Error::MacroRedefined(kind.name()));
        }
        let _ = self.macros.insert(kind, origin);
        self.define(kind.name());
        Ok(())
    }

    /// Records a definition.
    fn define(&mut self, name: &str) {
        let _ = self.defines.insert(name.to_string());
    }

    /// Removes a definition; interface macros become unusable again.
    fn undefine(&mut self, name: &str) {
        let _ = self.defines.remove(name);
        if let Some(kind) = MacroKind::from_name(name) {
            let _ = self.macros.remove(&kind);
        }
    }

    /// Expands a whole source text.
    ///
    /// # Arguments
    ///
    /// * `source` - Test source (assembly with preprocessor directives).
    ///
    /// # Returns
    ///
    /// The source with header includes consumed and macro uses replaced by
    /// their expansions.
    pub fn expand(&mut self, source: &str) -> Result<String> {
        let mut out = String::with_capacity(source.len());
        let mut lines = source.lines();
        while let Some(first) = lines.next() {
            let mut raw = first.to_string();
            let mut logical = first.to_string();
            let mut continued = false;
            while logical.ends_with('\\') {
                let Some(next) = lines.next() else { break };
                let _ = logical.pop();
                logical.push_str(next);
                raw.push('\n');
                raw.push_str(next);
                continued = true;
            }

            if let Some(directive) = logical.trim_start().strip_prefix('#') {
                self.directive(&raw, directive.trim_start(), &mut out)?;
            } else if continued && find_use(&logical).is_none() {
                push_line(&mut out, &raw);
            } else {
                self.expand_text(&logical, &mut out)?;
            }
        }
        Ok(out)
    }

    /// Reads and expands a source file.
    pub fn expand_file(&mut self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.expand(&source)
    }

    /// Expands macro uses in a non-directive line, appending the result to `out`.
    fn expand_text(&mut self, line: &str, out: &mut String) -> Result<()> {
        let Some((pos, kind)) = find_use(line) else {
            push_line(out, line);
            return Ok(());
        };

        let (prefix, tail) = line.split_at(pos);
        let invocation = parse::scan(tail)?;
        match self.macros.get(&kind) {
            None => return Err(Error::UndefinedMacro(kind.name())),
            Some(Definition::Source) => {
                push_line(out, line);
                return Ok(());
            }
            Some(Definition::Header) => {}
        }

        // INIT is object-like: a following parenthesis is ordinary text.
        let (args, rest) = if kind == MacroKind::Init {
            (None, &tail[invocation.name.len()..])
        } else {
            (invocation.args, invocation.rest)
        };
        let expansion = IoMacro::from_parts(invocation.name, args, self.xlen)?.expand(&self.hooks);

        let label = prefix.trim();
        let indent = match &line[..line.len() - line.trim_start().len()] {
            "" if !label.is_empty() => "    ",
            leading => leading,
        };
        if !label.is_empty() {
            push_line(out, prefix.trim_end());
        }
        for item in &expansion {
            out.push_str(indent);
            push_line(out, &item.to_string());
        }

        let rest = rest.trim_start();
        let rest = rest.strip_prefix(';').unwrap_or(rest).trim();
        if !rest.is_empty() {
            self.expand_text(&format!("{indent}{rest}"), out)?;
        }
        Ok(())
    }

    /// Handles a `#` directive line.
    fn directive(&mut self, line: &str, directive: &str, out: &mut String) -> Result<()> {
        if let Some(target) = directive.strip_prefix("include") {
            let target = target.trim();
            let name = target
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .or_else(|| target.strip_prefix('<').and_then(|t| t.strip_suffix('>')));
            if name.is_some_and(|n| n.rsplit('/').next() == Some(HEADER_NAME)) {
                let _ = self.include_header()?;
                return Ok(());
            }
        } else if let Some(rest) = directive.strip_prefix("define") {
            let name = identifier(rest);
            match MacroKind::from_name(name) {
                Some(kind) => self.define_macro(kind, Definition::Source)?,
                None if !name.is_empty() => self.define(name),
                None => {}
            }
        } else if let Some(rest) = directive.strip_prefix("undef") {
            self.undefine(identifier(rest));
        }
        push_line(out, line);
        Ok(())
    }
}

/// Returns the identifier at the start of `text`, skipping leading whitespace.
fn identifier(text: &str) -> &str {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    &text[..end]
}

/// Locates the first interface macro use in `line`.
///
/// Only whole identifiers count, and scanning stops at a `#` or `//`
/// comment. String literals are skipped. Other `RVTEST_IO_*` names are
/// left alone, as cpp leaves any identifier it has no definition for.
fn find_use(line: &str) -> Option<(usize, MacroKind)> {
    let mut in_string = false;
    let mut escaped = false;
    let mut prev = '\0';
    for (pos, c) in line.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
        } else {
            match c {
                '"' => in_string = true,
                '#' => return None,
                '/' if prev == '/' => return None,
                'A'..='Z' | 'a'..='z' | '_' if !parse::is_ident(prev) => {
                    let name = identifier(&line[pos..]);
                    if let Some(kind) = MacroKind::from_name(name) {
                        return Some((pos, kind));
                    }
                    if name.starts_with(MacroKind::PREFIX) {
                        warn!(name, "not an interface macro; passed through");
                    }
                }
                _ => {}
            }
        }
        prev = c;
    }
    None
}

/// Appends `line` and a newline.
fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
