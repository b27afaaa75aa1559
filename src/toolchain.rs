//! File level operations: the three things the command line does, usable without it.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::bytecode::disasm::disassemble_program;
use crate::bytecode::Assembler;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::files;
use crate::machine::Machine;
use crate::program::Program;

/**
  Assembles the source file at `input` and writes the encoded program next to it, with the
  configured extension. Returns the path written and the assembler, which still holds the
  instructions and any diagnostics.
*/
pub fn assemble_file(input: &Path, config: &Config) -> Result<(PathBuf, Assembler)> {
  let output = files::output_path(input, &config.assembler.extension);
  if files::same_file(input, &output) {
    return Err(Error::OutputIsSource(output));
  }

  let source = files::read_to_string(input)?;

  let mut assembler = Assembler::new(config.assembler.mnemonics);
  assembler.assemble(source.lines())?;
  // Fails on programs that would not fit in memory, before anything is written.
  let program = Program::with_instructions(&config.memory, assembler.output().iter().copied())?;

  if !assembler.diagnostics().is_empty() {
    warn!("{}: {} lines skipped or defaulted", input.display(), assembler.diagnostics().len());
  }

  files::write_lines(&output, &program.lines())?;
  info!("wrote {} instructions to {}", program.len(), output.display());

  Ok((output, assembler))
}

/// Loads an encoded program into a machine in the `Ready` state.
pub fn load_machine(path: &Path, config: &Config) -> Result<Machine> {
  Ok(Machine::new(Program::load(path, &config.memory)?))
}

/// Reads an encoded program and returns it as assembly source lines.
pub fn disassemble_file(path: &Path, config: &Config) -> Result<Vec<String>> {
  let program = Program::load(path, &config.memory)?;
  disassemble_program(&program.instructions())
}
