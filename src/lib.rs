//! Simulator for AccCom, a single-address accumulator machine with a 4 KiB
//! byte memory, sign-magnitude arithmetic and a handful of print opcodes.

pub mod codec;
pub mod constants;
pub mod errors;
pub mod hypervisor_controller;
pub mod instruction;
pub mod loader;
pub mod machine;
pub mod memory;
pub mod samples;
pub mod sink;
pub mod stack;
pub mod utils;


pub use constants::MachineConfig;
pub use errors::{Error, Fault, Result};
pub use instruction::{Addr, Instruction};
pub use loader::{LoadedProgram, ProgramImage};
pub use machine::{ExitStatus, Halt, Machine, Psw};
pub use memory::Memory;
pub use sink::{CaptureSink, Emission, OutputSink, WriterSink};
