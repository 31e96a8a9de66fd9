use crate::constants::{TOM, WORD_SIZE};
use crate::errors::Fault;

/// Flat byte memory. Words are big-endian, high byte first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new(TOM)
    }
}

impl Memory {
    pub fn new(size:usize) -> Memory {
        Memory { bytes: vec![0; size] }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn clear(&mut self) {
        self.bytes.iter_mut().for_each(|b| *b = 0);
    }

    fn check(&self, addr:usize, width:usize) -> Result<(), Fault> {
        match addr.checked_add(width) {
            Some(end) if end <= self.bytes.len() => Ok(()),
            _ => Err(Fault::MemoryInvalid(addr)),
        }
    }

    pub fn read_byte(&self, addr:usize) -> Result<u8, Fault> {
        self.check(addr, 1)?;
        Ok(self.bytes[addr])
    }

    pub fn read_word(&self, addr:usize) -> Result<u16, Fault> {
        self.check(addr, WORD_SIZE as usize)?;
        Ok(((self.bytes[addr] as u16) << 8) | self.bytes[addr + 1] as u16)
    }

    pub fn write_word(&mut self, addr:usize, value:u16) -> Result<(), Fault> {
        self.check(addr, WORD_SIZE as usize)?;
        self.bytes[addr] = (value >> 8) as u8;
        self.bytes[addr + 1] = (value & 0x00FF) as u8;
        Ok(())
    }

    /// Writes `words` back to back starting at `base` and returns the address
    /// just past the last one.
    pub fn load_words(&mut self, base:usize, words:&[u16]) -> Result<usize, Fault> {
        let mut addr = base;
        for word in words {
            self.write_word(addr, *word)?;
            addr += WORD_SIZE as usize;
        }
        Ok(addr)
    }

    /// Bytes from `addr` up to (not including) the first zero byte.
    pub fn read_cstr(&self, addr:usize) -> Result<Vec<u8>, Fault> {
        let mut out = Vec::new();
        let mut at = addr;
        loop {
            let byte = self.read_byte(at)?;
            if byte == 0 {
                return Ok(out);
            }
            out.push(byte);
            at += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_rw() {
        let mut mem = Memory::default();

        assert_eq!(mem.read_byte(TOM - 1), Ok(0)); // last byte in memory
        assert_eq!(mem.read_byte(0), Ok(0));

        mem.write_word(TOM - 2, 0x0F0F).unwrap();
        mem.write_word(0, 0xAA01).unwrap();

        assert_eq!(mem.read_word(TOM - 2).unwrap(), 0x0F0F);
        assert_eq!(mem.read_byte(0), Ok(0xAA));
        assert_eq!(mem.read_byte(1), Ok(0x01));
    }

    #[test]
    fn test_mem_read_invalid() {
        let mem = Memory::default();
        assert_eq!(mem.read_word(TOM - 1), Err(Fault::MemoryInvalid(TOM - 1)));
        assert_eq!(mem.read_word(TOM), Err(Fault::MemoryInvalid(TOM)));
        assert_eq!(mem.read_byte(TOM), Err(Fault::MemoryInvalid(TOM)));
    }

    #[test]
    fn test_mem_write_invalid() {
        let mut mem = Memory::default();
        assert_eq!(mem.write_word(0x0FFF, 1), Err(Fault::MemoryInvalid(0x0FFF)));
        assert_eq!(mem.read_byte(0x0FFF), Ok(0));
    }

    #[test]
    fn test_load_words() {
        let mut mem = Memory::default();
        let end = mem.load_words(0x0100, &[0x0007, 0x8005, 0x0000]).unwrap();
        assert_eq!(end, 0x0106);
        assert_eq!(mem.read_word(0x0102).unwrap(), 0x8005);
        mem.clear();
        assert_eq!(mem.read_word(0x0102).unwrap(), 0);
    }

    #[test]
    fn test_read_cstr() {
        let mut mem = Memory::default();
        mem.load_words(0x0108, &[0x583D, 0x0000]).unwrap();
        assert_eq!(mem.read_cstr(0x0108).unwrap(), b"X=".to_vec());
        assert_eq!(mem.read_cstr(0x0109).unwrap(), b"=".to_vec());

        let mut full = Memory::new(4);
        full.load_words(0, &[0x4142, 0x4344]).unwrap();
        assert_eq!(full.read_cstr(0), Err(Fault::MemoryInvalid(4)));
    }
}
