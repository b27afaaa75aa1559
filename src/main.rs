//! Command line for the four bit logic unit: assemble source, run or disassemble a program.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use env_logger::Env;

use nibble::bytecode::MnemonicMode;
use nibble::config::{Config, Pacing};
use nibble::pacing::pacer_for;
use nibble::sink::ConsoleLeds;
use nibble::toolchain;
use nibble::Result;

#[derive(Parser, Debug)]
#[command(
  name = "nibble",
  version,
  about = "Assembler and stepping machine for a sixteen operation, four bit logic unit"
)]
struct Cli {
  /// JSON configuration file. Command flags take precedence over it.
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Assemble a source file into `<name>.hex` next to it.
  Assemble {
    input: PathBuf,

    /// Encode unknown mnemonics as selector 0 instead of failing.
    #[arg(long)]
    lenient: bool,
  },

  /// Load an encoded program and run it, one output line per step.
  Run {
    program: PathBuf,

    /// Wait for Enter between steps.
    #[arg(long, conflicts_with_all = ["delay", "fast"])]
    step: bool,

    /// Seconds to wait between steps.
    #[arg(long, value_name = "SECS", conflicts_with = "fast")]
    delay: Option<u64>,

    /// Do not wait between steps.
    #[arg(long)]
    fast: bool,
  },

  /// Print an encoded program as assembly source.
  Disasm {
    program: PathBuf,
  },
}

fn main() {
  env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

  #[cfg(feature = "trace_computation")]
  log::debug!("computation tracing enabled");

  let cli = Cli::parse();
  if let Err(e) = execute(cli) {
    eprintln!("error: {}", e);
    process::exit(1);
  }
}

fn execute(cli: Cli) -> Result<()> {
  let mut config = match &cli.config {
    Some(path) => Config::load(path)?,
    None       => Config::default()
  };

  match cli.command {

    Commands::Assemble { input, lenient } => {
      if lenient {
        config.assembler.mnemonics = MnemonicMode::Lenient;
      }
      let (output, _assembler) = toolchain::assemble_file(&input, &config)?;
      println!("Generated: {}", output.display());
    }

    Commands::Run { program, step, delay, fast } => {
      if step {
        config.pacing = Pacing::Step;
      } else if let Some(secs) = delay {
        config.pacing = Pacing::Delay { secs };
      } else if fast {
        config.pacing = Pacing::Unpaced;
      }

      let mut machine = toolchain::load_machine(&program, &config)?;
      if config.pacing == Pacing::Step {
        eprintln!("Press Enter to execute the next instruction.");
      }

      let mut sink  = ConsoleLeds::new(io::stdout());
      let mut pacer = pacer_for(&config.pacing);
      let steps     = machine.run(&mut sink, pacer.as_mut())?;
      println!("Halted after {} steps: {}", steps, machine.registers());
    }

    Commands::Disasm { program } => {
      for line in toolchain::disassemble_file(&program, &config)? {
        println!("{}", line);
      }
    }

  }
  Ok(())
}
