use crate::codec::decode;
use crate::constants::{RECENTMEMACCESS_READ_BIT, RECENTMEMACCESS_WRITE_BIT, WORD_SIZE};
use crate::instruction::Instruction;
use crate::machine::Machine;
use crate::memory::Memory;
use std::io::{self, Write};

const DUMP_COLUMNS:usize = 8;

/// Prints words in `begin..end`, eight per row, each row prefixed with its
/// address.
pub fn print_memory<W:Write>(out:&mut W, name:Option<&str>, mem:&Memory, begin:usize, end:usize) -> io::Result<()> {
    if let Some(name) = name {
        writeln!(out, "[{}]", name)?;
    }

    let mut col = 0;
    let mut addr = begin;
    while addr < end {
        if col == 0 {
            write!(out, "{:04X}:", addr)?;
        }
        match mem.read_word(addr) {
            Ok(word) => write!(out, " {:04X}", word)?,
            Err(_) => write!(out, " ????")?,
        }
        if col == DUMP_COLUMNS - 1 {
            writeln!(out)?;
        }
        col = (col + 1) % DUMP_COLUMNS;
        addr += WORD_SIZE as usize;
    }
    if col != 0 {
        writeln!(out)?;
    }
    Ok(())
}

pub fn disassemble_range<W:Write>(out:&mut W, mem:&Memory, start:usize, end:usize) -> io::Result<()> {
    let mut addr = start;
    while addr < end {
        match mem.read_word(addr) {
            Ok(word) => writeln!(out, "{:#06X}:\t{:04X}\t{}", addr, word, Instruction::from(word))?,
            Err(_) => {
                writeln!(out, "{:#06X}:\t<out of memory>", addr)?;
                break;
            }
        }
        addr += WORD_SIZE as usize;
    }
    Ok(())
}

/// One line of execution trace for the instruction `ir` fetched from `pc`,
/// showing the machine state after it ran.
pub fn trace_line(m0:&Machine, pc:u16, ir:u16) -> String {
    format!(
        "{:#06X}: {:04X}  {:<12} acc={:04X} ({:>6})  z={} n={}  depth={}",
        pc,
        ir,
        Instruction::from(ir).to_string().replace('\t', " "),
        m0.acc,
        decode(m0.acc),
        m0.psw.zero as u8,
        m0.psw.negative as u8,
        m0.stack.depth(),
    )
}

pub fn print_regs<W:Write>(out:&mut W, m0:&Machine) -> io::Result<()> {
    writeln!(out, "pc={:#06X} acc={:#06X} ({})", m0.pc, m0.acc, decode(m0.acc))?;
    writeln!(out, "psw: zero={} negative={}", m0.psw.zero, m0.psw.negative)?;
    writeln!(out, "stack: depth={} tos={:#06X}", m0.stack.depth(), m0.stack.tos())?;
    writeln!(out, "status={:#06X} steps={}", m0.status, m0.steps)
}

pub fn print_recent_access<W:Write>(out:&mut W, m0:&Machine) -> io::Result<()> {
    for (addr, kind) in m0.recent_mem_access.iter() {
        let tag = match *kind {
            RECENTMEMACCESS_READ_BIT => "R",
            RECENTMEMACCESS_WRITE_BIT => "W",
            _ => "?",
        };
        writeln!(out, "{} {:#06X}", tag, addr)?;
    }
    Ok(())
}

pub fn toggle_debug(m0:&mut Machine) {
    eprint!("toggling debug output ");
    m0.debug ^= true;
    if m0.debug {
        eprintln!("on");
    } else {
        eprintln!("off");
    }
}
