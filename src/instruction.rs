use std::fmt;

use crate::constants::{OPCODE_MASK, OPERAND_MASK, SUB_HALT, SUB_IAC, SUB_RET};

/// A 12-bit memory operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

impl Addr {
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f:&mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#05X}", self.0)
    }
}

/// A decoded instruction word. Every `u16` decodes to some variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Opcode 0x0, the end-of-code sentinel.
    End,
    Lda(Addr),
    Sta(Addr),
    Add(Addr),
    Sub(Addr),
    Jmp(Addr),
    Cal(Addr),
    Mul(Addr),
    Iac,
    Ret,
    /// Any 0x8 sub-code other than IAC and RET.
    Halt { sub_code: u16 },
    Brz(Addr),
    Brn(Addr),
    Prt(Addr),
    /// Literal character code, not an address.
    Prc(u8),
    Prs(Addr),
    /// Opcodes 0xE and 0xF.
    Unknown(u16),
}

impl From<u16> for Instruction {
    fn from(word:u16) -> Self {
        use Instruction::*;

        let operand = word & OPERAND_MASK;
        let addr = Addr(operand);
        match (word & OPCODE_MASK) >> 12 {
            0x0 => End,
            0x1 => Lda(addr),
            0x2 => Sta(addr),
            0x3 => Add(addr),
            0x4 => Sub(addr),
            0x5 => Jmp(addr),
            0x6 => Cal(addr),
            0x7 => Mul(addr),
            0x8 => match operand {
                SUB_IAC => Iac,
                SUB_RET => Ret,
                sub_code => Halt { sub_code },
            },
            0x9 => Brz(addr),
            0xA => Brn(addr),
            0xB => Prt(addr),
            0xC => Prc((operand & 0x00FF) as u8),
            0xD => Prs(addr),
            _ => Unknown(word),
        }
    }
}

impl Instruction {
    /// Re-encodes the instruction. `Prc` loses nothing since only the low
    /// byte of its operand is significant.
    pub fn encode(&self) -> u16 {
        use Instruction::*;

        let op = |opcode:u16, addr:Addr| (opcode << 12) | (addr.0 & OPERAND_MASK);
        match *self {
            End => 0x0000,
            Lda(a) => op(0x1, a),
            Sta(a) => op(0x2, a),
            Add(a) => op(0x3, a),
            Sub(a) => op(0x4, a),
            Jmp(a) => op(0x5, a),
            Cal(a) => op(0x6, a),
            Mul(a) => op(0x7, a),
            Iac => 0x8000 | SUB_IAC,
            Ret => 0x8000 | SUB_RET,
            Halt { sub_code } => 0x8000 | (sub_code & OPERAND_MASK),
            Brz(a) => op(0x9, a),
            Brn(a) => op(0xA, a),
            Prt(a) => op(0xB, a),
            Prc(c) => 0xC000 | c as u16,
            Prs(a) => op(0xD, a),
            Unknown(word) => word,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        use Instruction::*;

        match self {
            End => "end",
            Lda(_) => "lda",
            Sta(_) => "sta",
            Add(_) => "add",
            Sub(_) => "sub",
            Jmp(_) => "jmp",
            Cal(_) => "cal",
            Mul(_) => "mul",
            Iac => "iac",
            Ret => "ret",
            Halt { .. } => "hlt",
            Brz(_) => "brz",
            Brn(_) => "brn",
            Prt(_) => "prt",
            Prc(_) => "prc",
            Prs(_) => "prs",
            Unknown(_) => "???",
        }
    }

    /// True for the instructions that recompute the flags.
    pub fn sets_flags(&self) -> bool {
        matches!(self, Instruction::Lda(_) | Instruction::Add(_) | Instruction::Sub(_) | Instruction::Mul(_))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f:&mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;

        match self {
            End | Iac | Ret => write!(f, "{}", self.mnemonic()),
            Halt { sub_code } if *sub_code == SUB_HALT => write!(f, "hlt"),
            Halt { sub_code } => write!(f, "hlt\t{:#05X}", sub_code),
            Prc(c) if c.is_ascii_graphic() || *c == b' ' => write!(f, "prc\t'{}'", *c as char),
            Prc(c) => write!(f, "prc\t{:#04X}", c),
            Unknown(word) => write!(f, "???\t({:#06X})", word),
            Lda(a) | Sta(a) | Add(a) | Sub(a) | Jmp(a) | Cal(a) | Mul(a)
            | Brz(a) | Brn(a) | Prt(a) | Prs(a) => write!(f, "{}\t{}", self.mnemonic(), a),
        }
    }
}
