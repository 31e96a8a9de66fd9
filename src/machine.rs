use std::collections::VecDeque;

use crate::codec::{decode, encode, is_negative, is_zero};
use crate::constants::*;
use crate::errors::{Error, Fault, Result};
use crate::hypervisor_controller::trace_line;
use crate::instruction::{Addr, Instruction};
use crate::memory::Memory;
use crate::sink::OutputSink;
use crate::stack::CallStack;
use crate::utils::{clear_bit, get_bit, set_bit};

/// Condition codes, derived from the accumulator by LDA/ADD/SUB/MUL.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Psw {
    pub zero: bool,
    pub negative: bool,
}

impl Psw {
    pub fn from_word(word:u16) -> Psw {
        Psw { zero: is_zero(word), negative: is_negative(word) }
    }
}

/// Why a run stopped normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// Opcode 0x8 with a halting sub-code.
    Instruction { sub_code: u16 },
    /// A zero opcode nibble where an instruction was expected.
    EndOfCode,
    /// Stopped from outside through [`Machine::halt`].
    Requested,
}

/// Outcome of a run, as reported to the host process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Normal,
    Fault(Fault),
    Error,
}

impl ExitStatus {
    pub fn of(result:&Result<Halt>) -> ExitStatus {
        match result {
            Ok(_) => ExitStatus::Normal,
            Err(e) => e.fault().map(ExitStatus::Fault).unwrap_or(ExitStatus::Error),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Normal => 0,
            ExitStatus::Error => 1,
            ExitStatus::Fault(Fault::MemoryInvalid(_)) => 2,
            ExitStatus::Fault(Fault::StackOverflow) => 3,
            ExitStatus::Fault(Fault::EmptyStack) => 4,
            ExitStatus::Fault(Fault::StepLimit(_)) => 5,
            ExitStatus::Fault(Fault::UnknownOpcode(_)) | ExitStatus::Fault(Fault::UnknownSubCode(_)) => 6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Machine {
    pub mem: Memory,
    pub acc: u16,
    pub pc: u16,
    pub psw: Psw,
    pub stack: CallStack,
    pub status: u16,
    pub debug: bool,
    pub recent_mem_access: VecDeque<(u16, u8)>,
    pub steps: u64,
    ir: u16,
    ir_pc: u16,
    halt_reason: Option<Halt>,
    config: MachineConfig,
}

impl Default for Machine {
    fn default() -> Self {
        Machine::new()
    }
}

impl Machine {
    pub fn new() -> Machine {
        Machine::build(MachineConfig::default())
    }

    pub fn with_config(config:MachineConfig) -> Result<Machine> {
        config.validate()?;
        Ok(Machine::build(config))
    }

    fn build(config:MachineConfig) -> Machine {
        Machine {
            mem: Memory::new(config.mem_size),
            acc: 0,
            pc: 0,
            psw: Psw::default(),
            stack: CallStack::new(config.stack_base, config.stack_limit),
            status: 0,
            debug: false,
            recent_mem_access: VecDeque::new(),
            steps: 0,
            ir: 0,
            ir_pc: 0,
            halt_reason: None,
            config,
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn set_step_limit(&mut self, limit:Option<u64>) {
        self.config.step_limit = limit;
    }

    pub fn set_strict(&mut self, strict:bool) {
        self.config.strict = strict;
    }

    /// Stops the machine. Further `step` calls execute nothing until `reset`.
    pub fn halt(&mut self) {
        if self.halt_reason.is_none() {
            self.halt_reason = Some(Halt::Requested);
        }
        set_bit(&mut self.status, HALT_BIT);
    }

    pub fn is_halted(&self) -> bool {
        get_bit(&self.status, HALT_BIT)
    }

    pub fn halt_reason(&self) -> Option<Halt> {
        self.halt_reason
    }

    /// Puts every register back to its power-on value. Memory is untouched.
    pub fn reset(&mut self) {
        self.acc = 0;
        self.pc = 0;
        self.psw = Psw::default();
        self.stack.reset();
        self.status = 0;
        self.steps = 0;
        self.ir = 0;
        self.ir_pc = 0;
        self.halt_reason = None;
        self.recent_mem_access.clear();
    }

    pub fn peek(&self, addr:u16) -> Option<u16> {
        self.mem.read_word(addr as usize).ok()
    }

    pub fn peek_number(&self, addr:u16) -> Option<i32> {
        self.peek(addr).map(decode)
    }

    pub fn poke(&mut self, addr:u16, word:u16) -> std::result::Result<(), Fault> {
        self.mem.write_word(addr as usize, word)
    }

    /// Stores a host integer at `addr` in sign-magnitude form.
    pub fn seed_number(&mut self, addr:u16, value:i32) -> std::result::Result<(), Fault> {
        self.poke(addr, encode(value))
    }

    /// Runs from `entry` until the program halts or faults.
    pub fn run<S:OutputSink + ?Sized>(&mut self, entry:u16, sink:&mut S) -> Result<Halt> {
        self.reset();
        self.pc = entry;
        loop {
            if let Some(halt) = self.step(sink)? {
                return Ok(halt);
            }
        }
    }

    /// Executes a single instruction. Returns `Some` once the machine halts.
    pub fn step<S:OutputSink + ?Sized>(&mut self, sink:&mut S) -> Result<Option<Halt>> {
        if self.is_halted() || self.halt_reason.is_some() {
            self.halt();
            return Ok(self.halt_reason);
        }
        if let Some(limit) = self.config.step_limit {
            if self.steps >= limit {
                self.ir_pc = self.pc;
                self.ir = 0;
                return Err(self.trap(Fault::StepLimit(limit)));
            }
        }

        clear_bit(&mut self.status, MEMR_BIT);
        clear_bit(&mut self.status, MEMW_BIT);
        clear_bit(&mut self.status, OUT_BIT);

        // fetch
        set_bit(&mut self.status, M1_BIT);
        self.ir_pc = self.pc;
        self.ir = 0;
        self.ir = self.mem.read_word(self.pc as usize).map_err(|f| self.trap(f))?;
        self.pc = self.pc.wrapping_add(WORD_SIZE);
        clear_bit(&mut self.status, M1_BIT);
        self.steps += 1;

        let instruction = Instruction::from(self.ir);
        let result = self.execute(instruction, sink);
        if self.debug {
            eprintln!("{}", trace_line(self, self.ir_pc, self.ir));
        }
        let halt = result?;
        if let Some(reason) = halt {
            self.halt_reason = Some(reason);
            self.halt();
        }
        Ok(halt)
    }

    fn execute<S:OutputSink + ?Sized>(&mut self, instruction:Instruction, sink:&mut S) -> Result<Option<Halt>> {
        match instruction {
            Instruction::End => return Ok(Some(Halt::EndOfCode)),
            Instruction::Lda(a) => {
                self.acc = self.read_data(a)?;
            }
            Instruction::Sta(a) => self.write_data(a, self.acc)?,
            Instruction::Add(a) => {
                let rhs = decode(self.read_data(a)?);
                self.acc = encode(decode(self.acc) + rhs);
            }
            Instruction::Sub(a) => {
                let rhs = decode(self.read_data(a)?);
                self.acc = encode(decode(self.acc) - rhs);
            }
            Instruction::Mul(a) => {
                let rhs = decode(self.read_data(a)?);
                self.acc = encode(decode(self.acc) * rhs);
            }
            Instruction::Iac => self.acc = encode(decode(self.acc) + 1),
            Instruction::Jmp(a) => self.pc = a.0,
            Instruction::Cal(a) => {
                let ret = self.pc;
                self.stack.push(&mut self.mem, ret).map_err(|f| self.trap(f))?;
                self.pc = a.0;
            }
            Instruction::Ret => self.pc = self.stack.pop(&self.mem).map_err(|f| self.trap(f))?,
            Instruction::Halt { sub_code } => {
                if self.config.strict && sub_code != SUB_HALT {
                    return Err(self.trap(Fault::UnknownSubCode(sub_code)));
                }
                return Ok(Some(Halt::Instruction { sub_code }));
            }
            Instruction::Brz(a) => {
                if self.psw.zero {
                    self.pc = a.0;
                }
            }
            Instruction::Brn(a) => {
                if self.psw.negative {
                    self.pc = a.0;
                }
            }
            Instruction::Prt(a) => {
                let value = decode(self.read_data(a)?);
                sink.emit_number(value)?;
                set_bit(&mut self.status, OUT_BIT);
            }
            Instruction::Prc(ch) => {
                sink.emit_char(ch)?;
                set_bit(&mut self.status, OUT_BIT);
            }
            Instruction::Prs(a) => {
                let bytes = self.mem.read_cstr(a.get()).map_err(|f| self.trap(f))?;
                set_bit(&mut self.status, MEMR_BIT);
                sink.emit_string(&bytes)?;
                set_bit(&mut self.status, OUT_BIT);
            }
            Instruction::Unknown(word) => {
                if self.config.strict {
                    return Err(self.trap(Fault::UnknownOpcode(word)));
                }
            }
        }
        if instruction.sets_flags() {
            self.update_flags();
        }
        Ok(None)
    }

    fn update_flags(&mut self) {
        self.psw = Psw::from_word(self.acc);
    }

    fn read_data(&mut self, addr:Addr) -> Result<u16> {
        let word = self.mem.read_word(addr.get()).map_err(|f| self.trap(f))?;
        set_bit(&mut self.status, MEMR_BIT);
        self.record_access(addr.0, RECENTMEMACCESS_READ_BIT);
        Ok(word)
    }

    fn write_data(&mut self, addr:Addr, word:u16) -> Result<()> {
        self.mem.write_word(addr.get(), word).map_err(|f| self.trap(f))?;
        set_bit(&mut self.status, MEMW_BIT);
        self.record_access(addr.0, RECENTMEMACCESS_WRITE_BIT);
        Ok(())
    }

    fn record_access(&mut self, addr:u16, kind:u8) {
        if self.recent_mem_access.len() >= MAX_RECENTMEMACCESS_SIZE as usize {
            self.recent_mem_access.pop_front();
        }
        self.recent_mem_access.push_back((addr, kind));
    }

    fn trap(&self, fault:Fault) -> Error {
        Error::Machine { fault, pc: self.ir_pc, ir: self.ir }
    }
}
