use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

pub const TOM:usize = 0x1000; // Top Of Memory, exclusive (mem: 0x0000-0x0FFF inclusive)
pub const WORD_SIZE:u16 = 2;
pub const MAX_MEM_SIZE:usize = 0x10000; // everything the 16-bit pc can reach

pub const STACK_BASE:u16 = 0x0000;
pub const STACK_LIMIT:u16 = 0x0100; // exclusive, last slot is 0x00FE

pub const OPCODE_MASK:u16 = 0xF000;
pub const OPERAND_MASK:u16 = 0x0FFF;
pub const SIGN_MASK:u16 = 0x8000;
pub const MAGNITUDE_MASK:u16 = 0x7FFF;

// sub-codes of opcode 0x8
pub const SUB_HALT:u16 = 0x000;
pub const SUB_IAC:u16 = 0x002;
pub const SUB_RET:u16 = 0x005;

// status reg
// x = undefined
// x x x OUT    MEMW MEMR M1 HLT
pub const OUT_BIT:u16 = 4;      // IO event
pub const MEMW_BIT:u16 = 3;     // mem write
pub const MEMR_BIT:u16 = 2;     // mem read
pub const M1_BIT:u16 = 1;       // M1 cycle
pub const HALT_BIT:u16 = 0;

pub const MAX_RECENTMEMACCESS_SIZE:u8 = 255; // cap on Machine::recent_mem_access
pub const RECENTMEMACCESS_READ_BIT:u8 = 1;
pub const RECENTMEMACCESS_WRITE_BIT:u8 = 2;

/// Layout and run-time policy for a [`Machine`](crate::Machine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub mem_size: usize,
    pub stack_base: u16,
    pub stack_limit: u16,
    /// Abort with a fault after this many instructions. `None` runs forever.
    pub step_limit: Option<u64>,
    /// Fault on undefined opcodes and unknown 0x8 sub-codes instead of
    /// skipping/halting.
    pub strict: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            mem_size: TOM,
            stack_base: STACK_BASE,
            stack_limit: STACK_LIMIT,
            step_limit: None,
            strict: false,
        }
    }
}

impl MachineConfig {
    /// Rejects layouts the machine cannot honour: memory the pc cannot
    /// address, an unaligned stack, or a stack outside memory.
    pub fn validate(&self) -> Result<()> {
        let word = WORD_SIZE as usize;
        if self.mem_size == 0 || self.mem_size % word != 0 {
            return Err(Error::BadConfig("mem_size must be a non-zero number of words"));
        }
        if self.mem_size > MAX_MEM_SIZE {
            return Err(Error::BadConfig("mem_size exceeds the 16-bit address space"));
        }
        if self.stack_base % WORD_SIZE != 0 || self.stack_limit % WORD_SIZE != 0 {
            return Err(Error::BadConfig("stack bounds must be word aligned"));
        }
        if self.stack_base > self.stack_limit {
            return Err(Error::BadConfig("stack_base is above stack_limit"));
        }
        if self.stack_limit as usize > self.mem_size {
            return Err(Error::BadConfig("stack does not fit in memory"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mem_size:usize, stack_base:u16, stack_limit:u16) -> MachineConfig {
        MachineConfig { mem_size, stack_base, stack_limit, ..MachineConfig::default() }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(MachineConfig::default().validate().is_ok());
        assert!(config(MAX_MEM_SIZE, 0x0200, 0x0400).validate().is_ok());
        assert!(config(0x0100, 0x0100, 0x0100).validate().is_ok()); // no stack at all
    }

    #[test]
    fn test_rejects_bad_memory_size() {
        assert!(matches!(config(0, 0, 0).validate(), Err(Error::BadConfig(_))));
        assert!(matches!(config(0x0FFF, 0, 0x0100).validate(), Err(Error::BadConfig(_))));
        assert!(matches!(config(MAX_MEM_SIZE + 2, 0, 0x0100).validate(), Err(Error::BadConfig(_))));
    }

    #[test]
    fn test_rejects_odd_stack_bounds() {
        assert!(matches!(config(TOM, 1, 0x0100).validate(), Err(Error::BadConfig("stack bounds must be word aligned"))));
        assert!(matches!(config(TOM, 0, 0x00FF).validate(), Err(Error::BadConfig("stack bounds must be word aligned"))));
    }

    #[test]
    fn test_rejects_inverted_stack() {
        assert!(matches!(config(TOM, 0x0100, 0).validate(), Err(Error::BadConfig("stack_base is above stack_limit"))));
    }

    #[test]
    fn test_rejects_stack_outside_memory() {
        assert!(matches!(config(0x0080, 0, 0x0100).validate(), Err(Error::BadConfig("stack does not fit in memory"))));
    }
}
