/*!
  Where the result register goes after every step.

  The hardware this models drives four indicator lines from the `W` register, line 0 from the
  most significant bit down to line 3 from bit 0. An `OutputSink` is refreshed exactly once per
  executed instruction and only ever reads the registers.
*/

use std::fmt::{Display, Formatter};
use std::io::Write;

use crate::error::{Error, Result};
use crate::machine::Registers;
use crate::nibble::Nibble;

pub const LINE_COUNT: usize = 4;

pub trait OutputSink {
  fn refresh(&mut self, registers: &Registers) -> Result<()>;
}

/// The state of the four output lines. `lines[0]` carries bit 3.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct LedBank {
  pub lines: [bool; LINE_COUNT]
}

impl LedBank {
  pub fn line(&self, index: usize) -> bool {
    self.lines.get(index).copied().unwrap_or(false)
  }

  pub fn value(&self) -> Nibble {
    let value = self.lines
      .iter()
      .fold(0u8, |acc, &lit| (acc << 1) | lit as u8);
    Nibble::new(value)
  }
}

impl From<Nibble> for LedBank {
  fn from(value: Nibble) -> Self {
    let mut lines = [false; LINE_COUNT];
    for (index, line) in lines.iter_mut().enumerate() {
      *line = value.bit((LINE_COUNT - 1 - index) as u8);
    }
    LedBank { lines }
  }
}

impl Display for LedBank {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    for lit in self.lines.iter() {
      match lit {
        true  => write!(f, "●")?,
        false => write!(f, "○")?,
      }
    }
    Ok(())
  }
}

/// Records every refresh, mostly for tests and for callers that want the whole trace.
impl OutputSink for Vec<LedBank> {
  fn refresh(&mut self, registers: &Registers) -> Result<()> {
    self.push(LedBank::from(registers.w));
    Ok(())
  }
}

/// Prints one line per step: the slot just executed, the result, and the lit lines.
pub struct ConsoleLeds<W: Write> {
  out: W
}

impl<W: Write> ConsoleLeds<W> {
  pub fn new(out: W) -> ConsoleLeds<W> {
    ConsoleLeds { out }
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> OutputSink for ConsoleLeds<W> {
  fn refresh(&mut self, registers: &Registers) -> Result<()> {
    // The sink is refreshed before the program counter advances.
    writeln!(
      self.out,
      "PC {:>3} | W {} ({:04b}) | {}",
      registers.pc, registers.w, registers.w, LedBank::from(registers.w)
    )
    .and_then(|_| self.out.flush())
    .map_err(|e| Error::io("output", e))
  }
}
