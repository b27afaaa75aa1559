/*!
  The human readable form of a program is called assembly. Each source line assigns one of
  three registers:

  ```text
  X=A        ; operand A (also written A=...)
  Y=5        ; operand B (also written B=...)
  W=AeB      ; selector, by mnemonic; completes an instruction
  ```

  Lines are independent of each other. The only state carried from line to line is the
  current value of the three fields, and operands keep their value until they are assigned
  again. Every `W=` line emits one instruction built from the current fields.

  Lines containing the `inicio`/`fim` markers are skipped, as are blank lines and lines whose
  first non-blank character is `;` or `#`. Anything else that cannot be read is recorded as a
  diagnostic and skipped.
*/

use std::str::FromStr;

use log::{debug, warn};
use nom::{
  bytes::complete::take_till,
  character::complete::{
    alpha1,
    char as one_char,
    multispace0,
    one_of
  },
  combinator::map,
  sequence::preceded,
  IResult
};
use serde::Deserialize;

use crate::bytecode::{Instruction, Operation};
use crate::error::{Error, Malformed, Result};
use crate::nibble::Nibble;

pub const START_MARKER   : &str = "inicio";
pub const END_MARKER     : &str = "fim";
pub const COMMENT_CHARS  : [char; 2] = [';', '#'];
const REGISTER_SELECTORS : &str = "XxAaYyBbWw";
const HEX_DIGITS         : &str = "0123456789abcdefABCDEF";

/// What to do with a `W=` mnemonic that is not in the name table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MnemonicMode {
  /// Fail the assembly with `UnknownMnemonic`.
  Strict,
  /// Encode selector `0x0` and carry on, recording a diagnostic.
  Lenient
}

impl Default for MnemonicMode {
  fn default() -> Self {
    MnemonicMode::Strict
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Register {
  /// `X=` or `A=`
  A,
  /// `Y=` or `B=`
  B,
  /// `W=`
  W
}

impl Register {
  fn from_selector(c: char) -> Register {
    match c.to_ascii_uppercase() {
      'X' | 'A' => Register::A,
      'Y' | 'B' => Register::B,
      _         => Register::W
    }
  }
}

/// The registers a hex digit can be assigned to. `W` only ever takes a mnemonic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operand {
  A,
  B
}

/// The reading of a single source line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParsedAssemblySyntax<'a> {
  /// Markers, comments, and blank lines.
  Ignored,
  /// `X=`/`Y=` with the first hex digit found after the `=`.
  Assign {
    operand : Operand,
    value   : Nibble
  },
  /// `W=` with the run of letters found after the `=`, not yet looked up.
  Operation(&'a str),
  Malformed(Malformed)
}
// Abbreviated name internally
use ParsedAssemblySyntax as Syntax;

fn register_p(input: &str) -> IResult<&str, Register> {
  preceded(multispace0, map(one_of(REGISTER_SELECTORS), Register::from_selector))(input)
}

fn assignment_p(input: &str) -> IResult<&str, char> {
  preceded(take_till(|c: char| c == '='), one_char('='))(input)
}

fn hex_operand_p(input: &str) -> IResult<&str, char> {
  preceded(take_till(|c: char| c.is_ascii_hexdigit()), one_of(HEX_DIGITS))(input)
}

fn mnemonic_p(input: &str) -> IResult<&str, &str> {
  preceded(take_till(|c: char| c.is_ascii_alphabetic()), alpha1)(input)
}

pub fn parse_line(text: &str) -> Syntax<'_> {
  if text.contains(START_MARKER) || text.contains(END_MARKER) {
    return Syntax::Ignored;
  }
  let body = text.trim_start();
  if body.is_empty() || body.starts_with(&COMMENT_CHARS[..]) {
    return Syntax::Ignored;
  }

  let (rest, register) = match register_p(body) {
    Ok(parsed) => parsed,
    Err(_e) => {
      // `body` is not empty, so there is a first character to report.
      let first = body.chars().next().unwrap_or_default();
      return Syntax::Malformed(Malformed::UnknownRegister(first));
    }
  };

  let rest = match assignment_p(rest) {
    Ok((rest, _)) => rest,
    Err(_e)       => return Syntax::Malformed(Malformed::MissingAssignment)
  };

  let operand = match register {

    Register::W => return match mnemonic_p(rest) {
      Ok((_, name)) => Syntax::Operation(name),
      Err(_e)       => Syntax::Malformed(Malformed::MissingMnemonic)
    },

    Register::A => Operand::A,
    Register::B => Operand::B,

  };

  match hex_operand_p(rest) {
    Ok((_, digit)) => Syntax::Assign {
      operand,
      value: Nibble::from_hex_digit(digit).unwrap_or_default()
    },
    Err(_e)        => Syntax::Malformed(Malformed::MissingOperand)
  }
}

/**
  Translates source lines into instructions, one line at a time.

  The assembler owns the three field registers (`X`, `Y`, `W`) and the instructions emitted
  so far. Malformed lines and, in lenient mode, unknown mnemonics are collected in
  `diagnostics` rather than failing the run.
*/
#[derive(Debug)]
pub struct Assembler {
  mode        : MnemonicMode,
  x           : Nibble,
  y           : Nibble,
  w           : Nibble,
  output      : Vec<Instruction>,
  diagnostics : Vec<Error>
}

impl Default for Assembler {
  fn default() -> Self {
    Assembler::new(MnemonicMode::default())
  }
}

impl Assembler {

  pub fn new(mode: MnemonicMode) -> Assembler {
    Assembler {
      mode,
      x           : Nibble::ZERO,
      y           : Nibble::ZERO,
      w           : Nibble::ZERO,
      output      : vec![],
      diagnostics : vec![]
    }
  }

  /// Assembles every line in order. Line numbers in diagnostics count from 1.
  pub fn assemble<'a, I>(&mut self, lines: I) -> Result<&[Instruction]>
    where I: IntoIterator<Item = &'a str>
  {
    for (index, line) in lines.into_iter().enumerate() {
      self.assemble_line(index + 1, line)?;
    }
    Ok(&self.output)
  }

  /// Assembles one line, returning the instruction it completed, if any.
  pub fn assemble_line(&mut self, line_number: usize, text: &str) -> Result<Option<Instruction>> {
    match parse_line(text) {

      Syntax::Ignored => Ok(None),

      Syntax::Assign { operand, value } => {
        match operand {
          Operand::A => self.x = value,
          Operand::B => self.y = value,
        }
        Ok(None)
      }

      Syntax::Operation(name) => {
        self.w = self.resolve(line_number, name)?.selector();
        let instruction = Instruction { a: self.x, b: self.y, selector: self.w };
        debug!("line {}: {} emits {}", line_number, text.trim(), instruction);
        self.output.push(instruction);
        Ok(Some(instruction))
      }

      Syntax::Malformed(reason) => {
        let diagnostic = Error::MalformedLine { line: line_number, reason };
        warn!("skipping {}", diagnostic);
        self.diagnostics.push(diagnostic);
        Ok(None)
      }

    }
  }

  fn resolve(&mut self, line: usize, name: &str) -> Result<Operation> {
    match (Operation::from_str(name), self.mode) {

      (Ok(operation), _) => Ok(operation),

      (Err(_e), MnemonicMode::Strict) => Err(Error::UnknownMnemonic { line, name: name.to_string() }),

      (Err(_e), MnemonicMode::Lenient) => {
        let diagnostic = Error::UnknownMnemonic { line, name: name.to_string() };
        warn!("{}; encoding {}", diagnostic, Operation::Zero);
        self.diagnostics.push(diagnostic);
        Ok(Operation::Zero)
      }

    }
  }

  pub fn output(&self) -> &[Instruction] {
    &self.output
  }

  pub fn diagnostics(&self) -> &[Error] {
    &self.diagnostics
  }

  /// The current `(X, Y, W)` field values.
  pub fn fields(&self) -> (Nibble, Nibble, Nibble) {
    (self.x, self.y, self.w)
  }

  /// The encoded program text, one three digit line per instruction.
  pub fn lines(&self) -> Vec<String> {
    self.output.iter().map(Instruction::to_string).collect()
  }

  pub fn into_output(self) -> Vec<Instruction> {
    self.output
  }
}

/// Assembles a whole source text in one go.
pub fn assemble(text: &str, mode: MnemonicMode) -> Result<Vec<Instruction>> {
  let mut assembler = Assembler::new(mode);
  assembler.assemble(text.lines())?;
  Ok(assembler.into_output())
}
