use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use strum_macros::{Display as StrumDisplay, IntoStaticStr, EnumString, EnumIter};
use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::error::{Error, Malformed, Result};
use crate::nibble::Nibble;

/**
  The sixteen operations of the logic unit, one per selector value.

  The discriminant is the selector as it appears in the `S` field of an instruction, and the
  `strum` serialization is the mnemonic accepted after `W=` in source text. Mnemonics are
  matched exactly, including case. Every operation is a pure function of the two operands;
  `'` below is the complement restricted to four bits.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq,         PartialEq, Debug,            Hash
)]
#[repr(u8)]
pub enum Operation {
  #[strum(to_string = "zeroL")]  Zero         = 0x0, // 0
  #[strum(to_string = "umL")]    One          = 0x1, // 1111
  #[strum(to_string = "AonB")]   AOrNotB      = 0x2, // A + B'
  #[strum(to_string = "nAonB")]  NotAOrNotB   = 0x3, // A' + B'
  #[strum(to_string = "AeBn")]   Nand         = 0x4, // (A.B)'
  #[strum(to_string = "nB")]     NotB         = 0x5, // B'
  #[strum(to_string = "nA")]     NotA         = 0x6, // A'
  #[strum(to_string = "nAxnB")]  NotAXorNotB  = 0x7, // A' ^ B'
  #[strum(to_string = "AxB")]    Xor          = 0x8, // A ^ B
  #[strum(to_string = "copiaA")] CopyA        = 0x9, // A
  #[strum(to_string = "copiaB")] CopyB        = 0xA, // B
  #[strum(to_string = "AeB")]    And          = 0xB, // A.B
  #[strum(to_string = "AenB")]   AAndNotB     = 0xC, // A.B'
  #[strum(to_string = "nAeB")]   NotAAndB     = 0xD, // A'.B
  #[strum(to_string = "AoB")]    Or           = 0xE, // A + B
  #[strum(to_string = "nAeBn")]  NandNotAB    = 0xF, // (A'.B)'
}

pub const OPERATION_COUNT: usize = 16;

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  pub fn selector(&self) -> Nibble {
    Nibble::new(self.code())
  }

  pub fn mnemonic(&self) -> &'static str {
    (*self).into()
  }

  /// Looks up a mnemonic in the name table. The match is exact and case-sensitive.
  pub fn from_mnemonic(name: &str) -> Option<Operation> {
    Operation::from_str(name).ok()
  }

  /// Evaluates the operation. The result is always a valid four bit value.
  pub fn apply(self, a: Nibble, b: Nibble) -> Nibble {
    match self {
      Operation::Zero        => Nibble::ZERO,
      Operation::One         => Nibble::MAX,
      Operation::AOrNotB     => a | !b,
      Operation::NotAOrNotB  => !a | !b,
      Operation::Nand        => !(a & b),
      Operation::NotB        => !b,
      Operation::NotA        => !a,
      Operation::NotAXorNotB => !a ^ !b,
      Operation::Xor         => a ^ b,
      Operation::CopyA       => a,
      Operation::CopyB       => b,
      Operation::And         => a & b,
      Operation::AAndNotB    => a & !b,
      Operation::NotAAndB    => !a & b,
      Operation::Or          => a | b,
      Operation::NandNotAB   => !(!a & b),
    }
  }
}

impl TryFrom<Nibble> for Operation {
  type Error = Error;

  fn try_from(selector: Nibble) -> Result<Operation> {
    Operation::try_from(selector.value()).map_err(|_| Error::UnknownOpcode(selector.value()))
  }
}

/**
  Evaluates the operation table for a raw selector. Selectors outside `0x0..=0xF` cannot come
  out of a decoded instruction, but a raw byte can still be handed in here, in which case the
  result is `UnknownOpcode`.
*/
pub fn evaluate(selector: u8, a: Nibble, b: Nibble) -> Result<Nibble> {
  Operation::try_from(selector)
    .map(|operation| operation.apply(a, b))
    .map_err(|_| Error::UnknownOpcode(selector))
}

/// The three independent fields of an instruction: operand `A`, operand `B`, and selector `S`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Instruction {
  pub a        : Nibble,
  pub b        : Nibble,
  pub selector : Nibble
}

impl Instruction {
  /// Builds an instruction from raw field values, each truncated to four bits.
  pub fn new(a: u8, b: u8, selector: u8) -> Instruction {
    Instruction {
      a        : Nibble::new(a),
      b        : Nibble::new(b),
      selector : Nibble::new(selector)
    }
  }

  pub fn with_operation(a: Nibble, b: Nibble, operation: Operation) -> Instruction {
    Instruction {
      a,
      b,
      selector: operation.selector()
    }
  }

  pub fn fields(&self) -> (u8, u8, u8) {
    (self.a.value(), self.b.value(), self.selector.value())
  }

  pub fn operation(&self) -> Result<Operation> {
    Operation::try_from(self.selector)
  }
}

/// The encoded program form: `A`, `B`, `S` as three upper case hex digits, no separator.
impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}{}{}", self.a, self.b, self.selector)
  }
}

impl FromStr for Instruction {
  type Err = Malformed;

  fn from_str(text: &str) -> std::result::Result<Instruction, Malformed> {
    let text = text.trim();
    let digits: Vec<Nibble> = text.chars().filter_map(Nibble::from_hex_digit).collect();

    match (digits.len(), text.chars().count()) {
      (3, 3) => Ok(Instruction { a: digits[0], b: digits[1], selector: digits[2] }),
      _      => Err(Malformed::Encoding(text.to_string()))
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use strum::IntoEnumIterator;

  fn n(value: u8) -> Nibble {
    Nibble::new(value)
  }

  #[test]
  fn spot_checks(){
    assert_eq!(evaluate(0xB, n(0b1010), n(0b0110)).unwrap(), n(0b0010));
    assert_eq!(evaluate(0xE, n(0b1010), n(0b0110)).unwrap(), n(0b1110));
    assert_eq!(evaluate(0x8, n(0b1100), n(0b1010)).unwrap(), n(0b0110));
  }

  #[test]
  fn constants_ignore_operands(){
    for a in 0..16 {
      for b in 0..16 {
        assert_eq!(Operation::Zero.apply(n(a), n(b)), Nibble::ZERO);
        assert_eq!(Operation::One.apply(n(a), n(b)), n(0b1111));
      }
    }
  }

  #[test]
  fn table_matches_masked_integer_arithmetic(){
    let reference: [fn(u8, u8) -> u8; OPERATION_COUNT] = [
      |_, _| 0,
      |_, _| 15,
      |a, b| (a | !b) & 0xF,
      |a, b| (!a | !b) & 0xF,
      |a, b| !(a & b) & 0xF,
      |_, b| !b & 0xF,
      |a, _| !a & 0xF,
      |a, b| (!a ^ !b) & 0xF,
      |a, b| (a ^ b) & 0xF,
      |a, _| a,
      |_, b| b,
      |a, b| a & b,
      |a, b| (a & !b) & 0xF,
      |a, b| (!a & b) & 0xF,
      |a, b| a | b,
      |a, b| !(!a & b) & 0xF,
    ];
    for operation in Operation::iter() {
      for a in 0..16u8 {
        for b in 0..16u8 {
          let result = operation.apply(n(a), n(b));
          assert!(result.value() <= 0xF);
          assert_eq!(
            result.value(), reference[operation.code() as usize](a, b),
            "{} with A={:X} B={:X}", operation, a, b
          );
        }
      }
    }
  }

  #[test]
  fn every_selector_is_defined(){
    assert_eq!(Operation::iter().count(), OPERATION_COUNT);
    for selector in 0..16u8 {
      let operation = Operation::try_from(selector).unwrap();
      assert_eq!(operation.code(), selector);
    }
    assert!(matches!(evaluate(0x10, n(1), n(2)), Err(Error::UnknownOpcode(0x10))));
  }

  #[test]
  fn mnemonic_table(){
    let table = [
      ("zeroL", 0x0), ("umL", 0x1), ("AonB", 0x2), ("nAonB", 0x3),
      ("AeBn", 0x4), ("nB", 0x5), ("nA", 0x6), ("nAxnB", 0x7),
      ("AxB", 0x8), ("copiaA", 0x9), ("copiaB", 0xA), ("AeB", 0xB),
      ("AenB", 0xC), ("nAeB", 0xD), ("AoB", 0xE), ("nAeBn", 0xF),
    ];
    for (name, code) in table.iter() {
      let operation = Operation::from_mnemonic(name).unwrap();
      assert_eq!(operation.code(), *code);
      assert_eq!(operation.mnemonic(), *name);
      assert_eq!(operation.to_string(), *name);
    }
    assert_eq!(Operation::from_mnemonic("aeb"), None);
    assert_eq!(Operation::from_mnemonic("AEB"), None);
    assert_eq!(Operation::from_mnemonic(""), None);
  }

  #[test]
  fn text_form(){
    let instruction = Instruction::with_operation(Nibble::new(0xA), Nibble::new(0x5), Operation::And);
    assert_eq!(instruction, Instruction::new(0xA, 0x5, 0xB));
    assert_eq!(instruction.to_string(), "A5B");
    assert_eq!("A5B".parse::<Instruction>(), Ok(instruction));
    assert_eq!(" a5b \r".parse::<Instruction>(), Ok(instruction));
    assert_eq!(instruction.operation().unwrap(), Operation::And);
  }

  #[test]
  fn rejects_bad_encodings(){
    for text in ["", "A5", "A5BC", "A5G", "A 5B"].iter() {
      assert!(text.parse::<Instruction>().is_err(), "{:?}", text);
    }
  }

  #[test]
  fn fields_are_truncated(){
    assert_eq!(Instruction::new(0x1A, 0xF5, 0x3B).fields(), (0xA, 0x5, 0xB));
  }
}
