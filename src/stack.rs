use crate::constants::WORD_SIZE;
use crate::errors::Fault;
use crate::memory::Memory;

/// Return-address stack living in a reserved window of memory.
///
/// The cursor points at the next free slot and grows upward from `base`
/// towards `limit` (exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStack {
    base: u16,
    limit: u16,
    tos: u16,
}

impl CallStack {
    pub fn new(base:u16, limit:u16) -> CallStack {
        CallStack { base, limit, tos: base }
    }

    pub fn push(&mut self, mem:&mut Memory, addr:u16) -> Result<(), Fault> {
        if self.tos as usize + WORD_SIZE as usize > self.limit as usize {
            return Err(Fault::StackOverflow);
        }
        mem.write_word(self.tos as usize, addr)?;
        self.tos += WORD_SIZE;
        Ok(())
    }

    pub fn pop(&mut self, mem:&Memory) -> Result<u16, Fault> {
        if self.tos <= self.base {
            return Err(Fault::EmptyStack);
        }
        self.tos -= WORD_SIZE;
        mem.read_word(self.tos as usize)
    }

    pub fn depth(&self) -> usize {
        (self.tos.saturating_sub(self.base) / WORD_SIZE) as usize
    }

    pub fn capacity(&self) -> usize {
        (self.limit.saturating_sub(self.base) / WORD_SIZE) as usize
    }

    pub fn tos(&self) -> u16 {
        self.tos
    }

    pub fn reset(&mut self) {
        self.tos = self.base;
    }

    /// `(base, limit)` of the stack window, limit exclusive.
    pub fn bounds(&self) -> (usize, usize) {
        (self.base as usize, self.limit as usize)
    }
}
