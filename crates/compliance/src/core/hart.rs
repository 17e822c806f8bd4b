//! Instruction-level hart.
//!
//! Executes assembled compliance programs one word at a time. It performs the following:
//! 1. **Fetch/Decode:** Reads encoded words from the [`Program`] and decodes the supported subset.
//! 2. **Execute:** Applies XLEN-correct integer semantics (`addiw` wraps at 32 bits, RV32
//!    registers hold zero-extended 32-bit values).
//! 3. **Termination:** Stops on reaching the failure label, on falling off the end of the
//!    program, or at the configured step limit.

use tracing::{debug, trace};

use crate::common::error::{Error, Result};
use crate::common::reg::Reg;
use crate::common::regfile::RegisterFile;
use crate::config::{Config, Xlen};
use crate::isa::disasm::disassemble_at;
use crate::isa::instruction::Instruction;
use crate::sim::{Outcome, Program};

/// A single RISC-V hart with integer and floating-point state.
#[derive(Clone, Debug)]
pub struct Hart {
    /// Architectural registers.
    pub regs: RegisterFile,
    /// Program counter.
    pub pc: u64,
    xlen: Xlen,
    max_steps: u64,
    failure_label: String,
}

impl Hart {
    /// Creates a hart with zeroed registers.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: config.general.base_address,
            xlen: config.general.xlen,
            max_steps: config.general.max_steps,
            failure_label: config.assertion.failure_label.clone(),
        }
    }

    /// Register width.
    pub const fn xlen(&self) -> Xlen {
        self.xlen
    }

    /// Reads an integer register.
    pub fn reg(&self, reg: Reg) -> u64 {
        self.regs.read(reg)
    }

    /// Writes an integer register, truncating to XLEN.
    pub fn set_reg(&mut self, reg: Reg, val: u64) {
        self.regs.write(reg, self.xlen.truncate(val));
    }

    /// Runs `program` from its base address.
    ///
    /// # Returns
    ///
    /// [`Outcome::Failed`] as soon as the PC reaches the failure label, or
    /// [`Outcome::Passed`] when it reaches the end of the program. A program
    /// that does not define the failure label can only pass.
    pub fn run(&mut self, program: &Program) -> Result<Outcome> {
        let failure = program.label(&self.failure_label);
        self.pc = program.base();
        let mut steps = 0u64;
        let mut last_pc = self.pc;

        loop {
            if Some(self.pc) == failure {
                debug!(from = last_pc, steps, "reached failure label");
                return Ok(Outcome::Failed {
                    from: last_pc,
                    steps,
                });
            }
            if self.pc == program.end() {
                debug!(steps, "fell through");
                return Ok(Outcome::Passed { steps });
            }
            if steps >= self.max_steps {
                return Err(Error::StepLimit(self.max_steps));
            }

            let word = program.fetch(self.pc).ok_or(Error::FetchFault(self.pc))?;
            trace!("{}", disassemble_at(self.pc, word));
            last_pc = self.pc;
            self.step(word)?;
            steps += 1;
        }
    }

    /// Executes one encoded instruction at the current PC.
    pub fn step(&mut self, word: u32) -> Result<()> {
        let pc = self.pc;
        let illegal = move || Error::IllegalInstruction { pc, word };
        let inst = Instruction::decode(word).ok_or_else(illegal)?;
        let mut next_pc = self.pc.wrapping_add(4);

        match inst {
            Instruction::Addi { rd, rs1, imm } => {
                let val = self.reg(rs1).wrapping_add(i64::from(imm) as u64);
                self.set_reg(rd, val);
            }
            Instruction::Addiw { rd, rs1, imm } => {
                if self.xlen == Xlen::Rv32 {
                    return Err(illegal());
                }
                let sum = self.reg(rs1).wrapping_add(i64::from(imm) as u64);
                self.set_reg(rd, i64::from(sum as i32) as u64);
            }
            Instruction::Lui { rd, imm20 } => {
                self.set_reg(rd, i64::from((imm20 << 12) as i32) as u64);
            }
            Instruction::Slli { rd, rs1, shamt } => {
                if shamt >= self.xlen.bits() {
                    return Err(illegal());
                }
                self.set_reg(rd, self.reg(rs1) << shamt);
            }
            Instruction::Bne { rs1, rs2, offset } => {
                if self.reg(rs1) != self.reg(rs2) {
                    next_pc = self.target(offset);
                }
            }
            Instruction::Jal { rd, offset } => {
                self.set_reg(rd, next_pc);
                next_pc = self.target(offset);
            }
        }

        self.pc = next_pc;
        Ok(())
    }

    /// PC-relative target address.
    const fn target(&self, offset: i32) -> u64 {
        self.pc.wrapping_add(offset as i64 as u64)
    }
}
