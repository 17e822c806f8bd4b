//! Program assembler.
//!
//! Lays out labels and pseudo-instructions at consecutive word addresses,
//! lowers each pseudo to base instructions, then patches branch and jump
//! offsets once every label address is known. Label resolution is where a
//! missing `loop_fail` surfaces, just as it would from a real assembler.

use std::collections::BTreeMap;

use tracing::debug;

use crate::common::error::{Error, Result};
use crate::config::{Config, Xlen};
use crate::io::{IoHooks, IoMacro};
use crate::isa::instruction::Instruction;
use crate::isa::pseudo::Pseudo;

/// Size of one instruction in bytes.
const INSTRUCTION_BYTES: u64 = 4;

/// Source item: a label definition or a pseudo-instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Item {
    Label(String),
    Op(Pseudo),
}

/// Collects labels and instructions and assembles them into a [`Program`].
#[derive(Clone, Debug)]
pub struct ProgramBuilder {
    xlen: Xlen,
    base: u64,
    items: Vec<Item>,
}

impl ProgramBuilder {
    /// Creates an empty builder for the configured XLEN and base address.
    pub const fn new(config: &Config) -> Self {
        Self {
            xlen: config.general.xlen,
            base: config.general.base_address,
            items: Vec::new(),
        }
    }

    /// Defines `name` at the current position.
    pub fn label(mut self, name: impl Into<String>) -> Self {
        self.items.push(Item::Label(name.into()));
        self
    }

    /// Appends one pseudo-instruction.
    pub fn op(mut self, op: Pseudo) -> Self {
        self.items.push(Item::Op(op));
        self
    }

    /// Appends a sequence of pseudo-instructions.
    pub fn ops(mut self, ops: impl IntoIterator<Item = Pseudo>) -> Self {
        self.items.extend(ops.into_iter().map(Item::Op));
        self
    }

    /// Appends the expansion of a macro use under `hooks`.
    pub fn invoke<H: IoHooks + ?Sized>(self, hooks: &H, io_macro: &IoMacro) -> Self {
        self.ops(io_macro.expand(hooks))
    }

    /// Resolves labels and encodes the program.
    ///
    /// # Returns
    ///
    /// The assembled [`Program`], or an error for duplicate or undefined
    /// labels and out-of-range branches.
    pub fn build(self) -> Result<Program> {
        let mut labels = BTreeMap::new();
        let mut lowered: Vec<(u64, Pseudo, Vec<Instruction>)> = Vec::new();
        let mut pc = self.base;
        for item in self.items {
            match item {
                Item::Label(name) => {
                    if labels.insert(name.clone(), pc).is_some() {
                        return Err(Error::DuplicateLabel(name));
                    }
                }
                Item::Op(op) => {
                    let seq = op.lower(self.xlen);
                    let at = pc;
                    pc += seq.len() as u64 * INSTRUCTION_BYTES;
                    lowered.push((at, op, seq));
                }
            }
        }

        let mut listing = Vec::new();
        for (at, op, seq) in lowered {
            let offset = match op.target() {
                Some(label) => {
                    let target = labels
                        .get(label)
                        .copied()
                        .ok_or_else(|| Error::UndefinedLabel(label.to_string()))?;
                    Some((label, target.wrapping_sub(at) as i64))
                }
                None => None,
            };
            for (i, inst) in seq.into_iter().enumerate() {
                let inst = match offset {
                    Some((label, offset)) => patch(inst, label, offset)?,
                    None => inst,
                };
                listing.push((at + i as u64 * INSTRUCTION_BYTES, inst));
            }
        }

        debug!(
            base = self.base,
            instructions = listing.len(),
            labels = labels.len(),
            "assembled program"
        );
        Ok(Program {
            base: self.base,
            end: pc,
            labels,
            listing,
        })
    }
}

/// Writes a resolved offset into a branch or jump, checking its range.
fn patch(inst: Instruction, label: &str, offset: i64) -> Result<Instruction> {
    let out_of_range = || Error::BranchOutOfRange {
        label: label.to_string(),
        offset,
    };
    match inst {
        Instruction::Bne { rs1, rs2, .. } => {
            if !(-4096..=4094).contains(&offset) {
                return Err(out_of_range());
            }
            Ok(Instruction::Bne {
                rs1,
                rs2,
                offset: offset as i32,
            })
        }
        Instruction::Jal { rd, .. } => {
            if !(-(1 << 20)..(1 << 20)).contains(&offset) {
                return Err(out_of_range());
            }
            Ok(Instruction::Jal {
                rd,
                offset: offset as i32,
            })
        }
        other => Ok(other),
    }
}

/// An assembled program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    base: u64,
    end: u64,
    labels: BTreeMap<String, u64>,
    listing: Vec<(u64, Instruction)>,
}

impl Program {
    /// Address of the first instruction.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Address one past the last instruction; reaching it means falling through.
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Address of `name`, if defined.
    pub fn label(&self, name: &str) -> Option<u64> {
        self.labels.get(name).copied()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.listing.len()
    }

    /// Returns true if the program holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.listing.is_empty()
    }

    /// Base instructions with their addresses.
    pub fn instructions(&self) -> &[(u64, Instruction)] {
        &self.listing
    }

    /// Encoded instruction words, in address order.
    pub fn words(&self) -> Vec<u32> {
        self.listing.iter().map(|(_, inst)| inst.encode()).collect()
    }

    /// Fetches the word at `pc`, or `None` outside the program.
    pub fn fetch(&self, pc: u64) -> Option<u32> {
        if pc < self.base || pc % INSTRUCTION_BYTES != 0 {
            return None;
        }
        let idx = usize::try_from((pc - self.base) / INSTRUCTION_BYTES).ok()?;
        self.listing.get(idx).map(|(_, inst)| inst.encode())
    }
}
