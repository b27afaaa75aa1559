//! A four bit value, the width of every field and register in the machine. Values are masked
//! on the way in, so a `Nibble` can never spill into a neighbouring field.

use std::fmt::{Binary, Display, Formatter, UpperHex};
use std::ops::{BitAnd, BitOr, BitXor, Not};

pub const NIBBLE_MASK: u8 = 0x0F;

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default)]
pub struct Nibble(u8);

impl Nibble {
  pub const ZERO: Nibble = Nibble(0x0);
  pub const MAX : Nibble = Nibble(0xF);

  /// Truncates `value` to its low four bits.
  pub const fn new(value: u8) -> Nibble {
    Nibble(value & NIBBLE_MASK)
  }

  pub fn value(&self) -> u8 {
    self.0
  }

  /// Reads one hexadecimal digit, either case.
  pub fn from_hex_digit(digit: char) -> Option<Nibble> {
    digit.to_digit(16).map(|value| Nibble(value as u8))
  }

  /// The upper case hexadecimal digit for this value.
  pub fn to_hex_digit(&self) -> char {
    match self.0 {
      value if value < 10 => (b'0' + value) as char,
      value               => (b'A' + value - 10) as char
    }
  }

  /// Tests a single bit, `0` being the least significant.
  pub fn bit(&self, index: u8) -> bool {
    index < 4 && (self.0 >> index) & 1 == 1
  }
}

impl From<u8> for Nibble {
  fn from(value: u8) -> Nibble {
    Nibble::new(value)
  }
}

impl From<Nibble> for u8 {
  fn from(nibble: Nibble) -> u8 {
    nibble.0
  }
}

impl Display for Nibble {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.to_hex_digit())
  }
}

impl UpperHex for Nibble {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    UpperHex::fmt(&self.0, f)
  }
}

impl Binary for Nibble {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Binary::fmt(&self.0, f)
  }
}

// Complement restricted to four bits.
impl Not for Nibble {
  type Output = Nibble;
  fn not(self) -> Nibble {
    Nibble::new(!self.0)
  }
}

impl BitAnd for Nibble {
  type Output = Nibble;
  fn bitand(self, rhs: Nibble) -> Nibble {
    Nibble(self.0 & rhs.0)
  }
}

impl BitOr for Nibble {
  type Output = Nibble;
  fn bitor(self, rhs: Nibble) -> Nibble {
    Nibble(self.0 | rhs.0)
  }
}

impl BitXor for Nibble {
  type Output = Nibble;
  fn bitxor(self, rhs: Nibble) -> Nibble {
    Nibble(self.0 ^ rhs.0)
  }
}
