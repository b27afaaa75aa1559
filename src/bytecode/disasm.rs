//! Instruction disassembler.
//!
//! Turns encoded instructions back into source lines the assembler accepts, so a program
//! read from a `.hex` file can be inspected or edited as mnemonics. Assembling the output of
//! `disassemble_program` gives back the same instructions.

use crate::bytecode::assembly::{END_MARKER, START_MARKER};
use crate::bytecode::Instruction;
use crate::error::Result;

/// Renders one instruction as its three assignment lines, e.g. `["X=A", "Y=5", "W=AeB"]`.
pub fn disassemble(instruction: &Instruction) -> Result<[String; 3]> {
  let operation = instruction.operation()?;
  Ok([
    format!("X={}", instruction.a),
    format!("Y={}", instruction.b),
    format!("W={}", operation),
  ])
}

/// Renders a whole program between the start and end markers.
pub fn disassemble_program<'a, I>(instructions: I) -> Result<Vec<String>>
  where I: IntoIterator<Item = &'a Instruction>
{
  let mut lines = vec![START_MARKER.to_string()];
  for instruction in instructions {
    lines.extend(disassemble(instruction)?.iter().cloned());
  }
  lines.push(END_MARKER.to_string());
  Ok(lines)
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::bytecode::assembly::{assemble, MnemonicMode};

  #[test]
  fn single_instruction(){
    let lines = disassemble(&Instruction::new(0xA, 0x5, 0xB)).unwrap();
    assert_eq!(lines, ["X=A".to_string(), "Y=5".to_string(), "W=AeB".to_string()]);
  }

  #[test]
  fn reassembles_to_the_same_program(){
    let program: Vec<Instruction> = (0..16u8)
      .map(|s| Instruction::new(15 - s, s.wrapping_mul(7), s))
      .collect();
    let source = disassemble_program(&program).unwrap().join("\n");
    assert!(source.starts_with("inicio\n"));
    assert!(source.ends_with("\nfim"));
    assert_eq!(assemble(&source, MnemonicMode::Strict).unwrap(), program);
  }

  #[test]
  fn empty_program(){
    assert_eq!(disassemble_program(&[]).unwrap(), vec!["inicio", "fim"]);
  }
}
