//! Errors raised by the assembler, the program loader, and the machine.
//!
//! Some of these are recoverable by design: a `MalformedLine` is logged and the line skipped,
//! and an `UnknownMnemonic` may be downgraded to selector `0x0` in lenient mode. The rest
//! abort whatever operation produced them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  /// A source or program line that could not be read as anything.
  #[error("line {line}: {reason}")]
  MalformedLine {
    line   : usize,
    reason : Malformed
  },

  #[error("line {line}: `{name}` is not an operation")]
  UnknownMnemonic {
    line : usize,
    name : String
  },

  /// A selector outside the sixteen entry operation table.
  #[error("unknown opcode {0:#x}")]
  UnknownOpcode(u8),

  #[error("{context}: {source}")]
  Io {
    context : String,
    #[source]
    source  : io::Error
  },

  /// The derived output path names the input file itself.
  #[error("{}: encoded output would overwrite the source file", .0.display())]
  OutputIsSource(PathBuf),

  #[error("program counter {pc} exceeds memory capacity {capacity}")]
  ProgramOverrun {
    pc       : usize,
    capacity : usize
  },

  #[error("invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("could not parse configuration: {0}")]
  ConfigParse(#[from] serde_json::Error),
}

/// Why a line was rejected.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Malformed {
  #[error("`{0}` does not select a register (expected X, Y, A, B or W)")]
  UnknownRegister(char),

  #[error("missing `=`")]
  MissingAssignment,

  #[error("no hexadecimal digit after `=`")]
  MissingOperand,

  #[error("no mnemonic after `=`")]
  MissingMnemonic,

  #[error("`{0}` is not three hexadecimal digits")]
  Encoding(String),
}

impl Error {
  pub fn io(context: impl Into<String>, source: io::Error) -> Error {
    Error::Io {
      context: context.into(),
      source
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_carry_line_numbers(){
    let error = Error::MalformedLine { line: 7, reason: Malformed::MissingAssignment };
    assert_eq!(error.to_string(), "line 7: missing `=`");

    let error = Error::UnknownMnemonic { line: 3, name: "AeBB".to_string() };
    assert_eq!(error.to_string(), "line 3: `AeBB` is not an operation");
  }

  #[test]
  fn io_keeps_its_source(){
    use std::error::Error as _;
    let error = Error::io("prog.asm", io::Error::new(io::ErrorKind::NotFound, "gone"));
    assert!(error.to_string().starts_with("prog.asm: "));
    assert!(error.source().is_some());
  }

  #[test]
  fn clash_names_the_path(){
    let error = Error::OutputIsSource(PathBuf::from("prog.hex"));
    assert_eq!(error.to_string(), "prog.hex: encoded output would overwrite the source file");
  }
}
