//! An encoded program as it sits in the machine's memory.
//!
//! Memory is a fixed number of slots. The first `base` slots belong to the registers
//! (PC, W, X, Y) and are never executed; instructions are loaded from `base` upwards.
//! Every slot holds a packed `Word`: instructions are encoded when stored and decoded again
//! when fetched, so the machine only ever sees what the codec gives back.

use std::path::Path;

use log::info;

use crate::bytecode::{decode_instruction, encode_instruction, Instruction, Word};
use crate::config::MemoryConfig;
use crate::error::{Error, Result};
use crate::files;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Program {
  base     : usize,
  capacity : usize,
  words    : Vec<Word>
}

impl Program {

  pub fn new(memory: &MemoryConfig) -> Program {
    Program {
      base     : memory.base,
      capacity : memory.capacity,
      words    : vec![]
    }
  }

  pub fn with_instructions<I>(memory: &MemoryConfig, instructions: I) -> Result<Program>
    where I: IntoIterator<Item = Instruction>
  {
    let mut program = Program::new(memory);
    for instruction in instructions {
      program.push(instruction)?;
    }
    Ok(program)
  }

  /// Encodes an instruction into the next free slot.
  pub fn push(&mut self, instruction: Instruction) -> Result<()> {
    let slot = self.end();
    if slot >= self.capacity {
      return Err(Error::ProgramOverrun { pc: slot, capacity: self.capacity });
    }
    self.words.push(encode_instruction(instruction));
    Ok(())
  }

  /**
    Reads the encoded text form: one instruction of three hex digits per line. Blank lines are
    skipped. A line that is not three hex digits fails the whole load; the machine never runs
    a program it could only partly read.
  */
  pub fn parse(text: &str, memory: &MemoryConfig) -> Result<Program> {
    let mut program = Program::new(memory);
    for (index, line) in text.lines().enumerate() {
      if line.trim().is_empty() {
        continue;
      }
      let instruction = line
        .parse::<Instruction>()
        .map_err(|reason| Error::MalformedLine { line: index + 1, reason })?;
      program.push(instruction)?;
    }
    Ok(program)
  }

  pub fn load(path: &Path, memory: &MemoryConfig) -> Result<Program> {
    let text = files::read_to_string(path)?;
    let program = Program::parse(&text, memory)?;
    info!("loaded {} instructions from {}", program.len(), path.display());
    Ok(program)
  }

  /// Decodes the instruction in memory slot `index`. Register slots and slots past the end of
  /// the program hold nothing executable.
  pub fn fetch(&self, index: usize) -> Option<Instruction> {
    match index.checked_sub(self.base) {
      Some(offset) => self.words.get(offset).copied().map(decode_instruction),
      None         => None
    }
  }

  /// First executable slot.
  pub fn base(&self) -> usize {
    self.base
  }

  /// One past the last loaded slot.
  pub fn end(&self) -> usize {
    self.base + self.words.len()
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  pub fn words(&self) -> &[Word] {
    &self.words
  }

  /// Every loaded instruction, decoded, in slot order.
  pub fn instructions(&self) -> Vec<Instruction> {
    self.words.iter().copied().map(decode_instruction).collect()
  }

  /// The encoded text form, one line per instruction.
  pub fn lines(&self) -> Vec<String> {
    self.instructions().iter().map(Instruction::to_string).collect()
  }
}
