/*!
  This module is responsible for packing instructions into machine words and unpacking them
  again. The assembler encodes and the machine decodes, so the two directions here are the
  only place the field layout is written down.

*/

use super::Instruction;
use crate::nibble::{Nibble, NIBBLE_MASK};

// If you change this you must also change `encode_instruction` and `decode_instruction`.
pub type Word = u16;

/// Bit offsets of the fields within a `Word`: `[Reserved:4][A:4][B:4][S:4]`.
pub const A_SHIFT        : u32 = 8;
pub const B_SHIFT        : u32 = 4;
pub const SELECTOR_SHIFT : u32 = 0;

/// Mask of the bits `encode_instruction` can ever set.
pub const INSTRUCTION_MASK: Word = 0x0FFF;

pub fn encode_instruction(instruction: Instruction) -> Word {
  // [Reserved:4][A:4][B:4][S:4]
    ((instruction.a.value()        as Word) << A_SHIFT)
  | ((instruction.b.value()        as Word) << B_SHIFT)
  | ((instruction.selector.value() as Word) << SELECTOR_SHIFT)
}

/**
  Decodes a packed word. Decoding never fails: every selector value names an operation, and
  the reserved high bits are ignored. Reading a word does not change it, so decoding the same
  word twice gives the same fields.
*/
pub fn decode_instruction(word: Word) -> Instruction {
  Instruction {
    a        : field(word, A_SHIFT),
    b        : field(word, B_SHIFT),
    selector : field(word, SELECTOR_SHIFT)
  }
}

fn field(word: Word, shift: u32) -> Nibble {
  Nibble::new(((word >> shift) & NIBBLE_MASK as Word) as u8)
}


#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  fn encode_fields(a: u8, b: u8, s: u8) -> Word {
    encode_instruction(Instruction::new(a, b, s))
  }

  fn decode_fields(word: Word) -> (u8, u8, u8) {
    decode_instruction(word).fields()
  }

  #[test]
  fn round_trip_all_fields(){
    for a in 0..16u8 {
      for b in 0..16u8 {
        for s in 0..16u8 {
          assert_eq!(decode_fields(encode_fields(a, b, s)), (a, b, s));
        }
      }
    }
  }

  #[test]
  fn layout(){
    assert_eq!(encode_fields(0xA, 0x5, 0xB), 0x0A5B);
    assert_eq!(decode_instruction(0x0C6B), Instruction::new(0xC, 0x6, 0xB));
    // The reserved nibble is not part of any field.
    assert_eq!(decode_instruction(0xFC6B), decode_instruction(0x0C6B));
  }

  #[test]
  fn decode_is_idempotent(){
    let word = encode_fields(0x3, 0xE, 0x7);
    let first = decode_instruction(word);
    let second = decode_instruction(word);
    assert_eq!(first, second);
    assert_eq!(first.fields(), (0x3, 0xE, 0x7));
  }

  proptest! {
    #[test]
    fn oversized_fields_never_spill(a: u8, b: u8, s: u8) {
      let word = encode_fields(a, b, s);
      prop_assert_eq!(word & !INSTRUCTION_MASK, 0);
      prop_assert_eq!(decode_fields(word), (a & 0xF, b & 0xF, s & 0xF));
    }

    #[test]
    fn word_survives_decode_encode(word in 0..=INSTRUCTION_MASK) {
      prop_assert_eq!(encode_instruction(decode_instruction(word)), word);
    }
  }
}
