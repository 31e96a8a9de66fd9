use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use acccom_cpu::hypervisor_controller::{disassemble_range, print_memory, print_recent_access, print_regs, toggle_debug};
use acccom_cpu::loader::{parse_assignment, InputCell, LoadedProgram};
use acccom_cpu::utils::parse_number;
use acccom_cpu::{samples, ExitStatus, Machine, ProgramImage, WriterSink};
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "acccom")]
#[command(about = "AccCom accumulator computer simulator", long_about = None)]
struct Args {
    /// Program image (JSON) to load
    image: Option<PathBuf>,

    /// Run a built-in program instead of an image file
    #[arg(long, conflicts_with = "image")]
    sample: Option<String>,

    /// List the built-in programs and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list: bool,

    /// Store a number in memory before running, e.g. --set 0x0100=-5
    #[arg(long = "set", value_name = "ADDR=VALUE")]
    assignments: Vec<String>,

    /// Prompt for every input cell the program declares
    #[arg(long, action = ArgAction::SetTrue)]
    interactive: bool,

    /// Abort after this many instructions (0 = no limit)
    #[arg(long, default_value_t = 10_000_000)]
    max_steps: u64,

    /// Fault on undefined opcodes and control sub-codes
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,

    /// Print one line per executed instruction to stderr
    #[arg(long, action = ArgAction::SetTrue)]
    trace: bool,

    /// Print the DATA and CODE regions before and after the run
    #[arg(long, action = ArgAction::SetTrue)]
    dump: bool,

    /// Disassemble the CODE region and exit
    #[arg(long, action = ArgAction::SetTrue)]
    disassemble: bool,

    /// Print the program image as JSON and exit
    #[arg(long, action = ArgAction::SetTrue)]
    emit_image: bool,
}

fn main() {
    let args = Args::parse();
    match run(args) {
        Ok(status) => process::exit(status.code()),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(ExitStatus::Error.code());
        }
    }
}

fn run(args:Args) -> Result<ExitStatus> {
    if args.list {
        for name in samples::NAMES.iter() {
            let image = samples::by_name(name)?;
            println!("{:<10} {}", name, image.description);
        }
        return Ok(ExitStatus::Normal);
    }

    let image = match (&args.image, &args.sample) {
        (Some(path), None) => ProgramImage::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        (None, Some(name)) => samples::by_name(name)?,
        _ => bail!("give a program image path or --sample NAME (see --list)"),
    };

    if args.emit_image {
        println!("{}", image.to_json()?);
        return Ok(ExitStatus::Normal);
    }

    let mut m0 = image.machine()?;
    if args.max_steps > 0 {
        m0.set_step_limit(Some(args.max_steps));
    }
    if args.strict {
        m0.set_strict(true);
    }

    eprintln!("*** Load ***");
    let loaded = image.load_into(&mut m0)?;
    if args.disassemble {
        let stdout = io::stdout();
        disassemble_range(&mut stdout.lock(), &m0.mem, loaded.code.begin, loaded.code.end)?;
        return Ok(ExitStatus::Normal);
    }
    if args.dump {
        dump_regions(&m0, &loaded)?;
    }

    eprintln!("*** Input ***");
    if !image.description.is_empty() {
        eprintln!("{}", image.description);
    }
    if args.interactive {
        prompt_inputs(&mut m0, &image.inputs)?;
    }
    for text in args.assignments.iter() {
        let (addr, value) = parse_assignment(text)?;
        m0.seed_number(addr, value)
            .map_err(|fault| anyhow::anyhow!("--set {}: {}", text, fault))?;
    }
    if args.dump {
        dump_regions(&m0, &loaded)?;
    }

    if args.trace {
        toggle_debug(&mut m0);
    }

    eprintln!("*** Run ***");
    let mut sink = WriterSink::stdout();
    let result = m0.run(loaded.entry, &mut sink);
    let status = ExitStatus::of(&result);
    if let Err(e) = &result {
        eprintln!();
        eprintln!("{}", e);
        print_regs(&mut io::stderr(), &m0)?;
        print_recent_access(&mut io::stderr(), &m0)?;
    }
    if args.dump {
        dump_regions(&m0, &loaded)?;
    }
    eprintln!();
    eprintln!("*** Exit {} ***", status.code());
    Ok(status)
}

fn dump_regions(m0:&Machine, loaded:&LoadedProgram) -> io::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    print_memory(&mut out, Some("DATA"), &m0.mem, loaded.data.begin, loaded.data.end)?;
    print_memory(&mut out, Some("CODE"), &m0.mem, loaded.code.begin, loaded.code.end)
}

fn prompt_inputs(m0:&mut Machine, inputs:&[InputCell]) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    for cell in inputs {
        loop {
            eprint!("{:04X}: {} [{}] = ", cell.addr, cell.label, cell.default);
            io::stderr().flush()?;
            let line = match lines.next() {
                Some(line) => line.context("failed to read line from stdin")?,
                None => return Ok(()),
            };
            if line.trim().is_empty() {
                break;
            }
            match parse_number(&line) {
                Some(value) if value.abs() <= 0x7FFF => {
                    m0.seed_number(cell.addr, value as i32)
                        .map_err(|fault| anyhow::anyhow!("{}: {}", cell.label, fault))?;
                    break;
                }
                _ => eprintln!("enter a number between -32767 and 32767"),
            }
        }
    }
    Ok(())
}
