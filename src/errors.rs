use thiserror::Error;

/// Conditions that stop the machine mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("Invalid memory access at {0:#06X}")]
    MemoryInvalid(usize),
    #[error("Call stack overflow")]
    StackOverflow,
    #[error("Attempted to return with an empty call stack")]
    EmptyStack,
    #[error("Step limit of {0} instructions exhausted")]
    StepLimit(u64),
    #[error("Unknown opcode in word {0:#06X}")]
    UnknownOpcode(u16),
    #[error("Unknown control sub-code {0:#05X}")]
    UnknownSubCode(u16),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{fault} (pc={pc:#06X}, ir={ir:#06X})")]
    Machine { fault: Fault, pc: u16, ir: u16 },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed program image: {0}")]
    Image(#[from] serde_json::Error),
    #[error("Invalid {name} region {begin:#06X}..{end:#06X}: {reason}")]
    Region { name: &'static str, begin: usize, end: usize, reason: &'static str },
    #[error("Invalid word {0:?} in program image")]
    BadWord(String),
    #[error("Unknown sample program {0:?}")]
    UnknownSample(String),
    #[error("Invalid assignment {0:?}, expected ADDR=VALUE")]
    BadAssignment(String),
    #[error("Invalid machine config: {0}")]
    BadConfig(&'static str),
}

impl Error {
    pub fn fault(&self) -> Option<Fault> {
        match self {
            Error::Machine { fault, .. } => Some(*fault),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
