//! Source file to LEDs: assemble, persist, load, and run, through the public API only.

use std::fs;

use proptest::prelude::*;

use nibble::bytecode::disasm::disassemble_program;
use nibble::bytecode::{assemble, Instruction, MnemonicMode, Operation};
use nibble::config::{Config, MemoryConfig};
use nibble::pacing::Unpaced;
use nibble::sink::LedBank;
use nibble::toolchain::{assemble_file, disassemble_file, load_machine};
use nibble::{Error, Nibble, Program, State};

const SOURCE: &str = "\
inicio:
; A=C, B=A through AND, OR and XOR, then B=3
X=C
Y=A
W=AeB
W=AoB
W=AxB
Y=3
W=nAeB
fim.
";

#[test]
fn assemble_then_run(){
  let dir = tempfile::tempdir().unwrap();
  let input = dir.path().join("demo.asm");
  fs::write(&input, SOURCE).unwrap();

  let config = Config::default();
  let (output, _) = assemble_file(&input, &config).unwrap();
  assert_eq!(fs::read_to_string(&output).unwrap(), "CAB\nCAE\nCA8\nC3D\n");

  let mut machine = load_machine(&output, &config).unwrap();
  assert_eq!(machine.state(), State::Ready);

  let mut trace: Vec<LedBank> = vec![];
  let steps = machine.run(&mut trace, &mut Unpaced).unwrap();
  assert_eq!(steps, 4);
  assert_eq!(machine.state(), State::Halted);
  assert_eq!(machine.registers().pc, config.memory.base + 4);

  let results: Vec<u8> = trace.iter().map(|bank| bank.value().value()).collect();
  assert_eq!(results, vec![0b1000, 0b1110, 0b0110, 0b0011]);
  assert_eq!(trace[0].lines, [true, false, false, false]);
}

#[test]
fn disassembly_reassembles(){
  let dir = tempfile::tempdir().unwrap();
  let input = dir.path().join("demo.asm");
  fs::write(&input, SOURCE).unwrap();
  let (output, assembler) = assemble_file(&input, &Config::default()).unwrap();

  let source = disassemble_file(&output, &Config::default()).unwrap().join("\n");
  assert_eq!(assemble(&source, MnemonicMode::Strict).unwrap(), assembler.output());
}

#[test]
fn config_file_changes_the_layout(){
  let dir = tempfile::tempdir().unwrap();
  let config_path = dir.path().join("nibble.json");
  fs::write(&config_path, r#"{ "memory": { "capacity": 8, "base": 6 }, "assembler": { "extension": "nib" } }"#)
    .unwrap();
  let config = Config::load(&config_path).unwrap();

  let input = dir.path().join("demo.asm");
  fs::write(&input, "X=1\nY=2\nW=AoB\nW=AeB\n").unwrap();
  let (output, _) = assemble_file(&input, &config).unwrap();
  assert_eq!(output, dir.path().join("demo.nib"));

  let machine = load_machine(&output, &config).unwrap();
  assert_eq!(machine.registers().pc, 6);

  // Three instructions do not fit in the two free slots.
  fs::write(&input, "W=AoB\nW=AoB\nW=AoB\n").unwrap();
  assert!(matches!(
    assemble_file(&input, &config),
    Err(Error::ProgramOverrun { pc: 8, capacity: 8 })
  ));
}

#[test]
fn unreadable_input_is_an_io_error(){
  let dir = tempfile::tempdir().unwrap();
  let missing = dir.path().join("nothing.asm");
  assert!(matches!(assemble_file(&missing, &Config::default()), Err(Error::Io { .. })));
  assert!(matches!(load_machine(&missing, &Config::default()), Err(Error::Io { .. })));
}

fn instruction() -> impl Strategy<Value = Instruction> {
  (0..16u8, 0..16u8, 0..16u8).prop_map(|(a, b, s)| Instruction::new(a, b, s))
}

proptest! {
  #[test]
  fn text_form_survives_the_loader(program in proptest::collection::vec(instruction(), 0..32)) {
    let text = program.iter().map(Instruction::to_string).collect::<Vec<_>>().join("\n");
    let loaded = Program::parse(&text, &MemoryConfig::default()).unwrap();
    prop_assert_eq!(loaded.instructions(), program);
  }

  #[test]
  fn machine_agrees_with_the_table(program in proptest::collection::vec(instruction(), 1..32)) {
    let source = disassemble_program(&program).unwrap().join("\n");
    let assembled = assemble(&source, MnemonicMode::Strict).unwrap();
    prop_assert_eq!(&assembled, &program);

    let loaded = Program::with_instructions(&MemoryConfig::default(), assembled).unwrap();
    let mut machine = nibble::Machine::new(loaded);
    let mut trace: Vec<LedBank> = vec![];
    prop_assert_eq!(machine.run(&mut trace, &mut Unpaced).unwrap(), program.len());

    for (instruction, bank) in program.iter().zip(trace.iter()) {
      let expected: Nibble = instruction.operation().unwrap().apply(instruction.a, instruction.b);
      prop_assert_eq!(bank.value(), expected);
    }
    let last = program[program.len() - 1];
    prop_assert_eq!(machine.registers().x, last.a);
    prop_assert_eq!(machine.registers().y, last.b);
  }
}

#[test]
fn every_mnemonic_assembles(){
  use strum::IntoEnumIterator;
  for operation in Operation::iter() {
    let source = format!("X=5\nY=3\nW={}\n", operation);
    let program = assemble(&source, MnemonicMode::Strict).unwrap();
    assert_eq!(program, vec![Instruction::with_operation(Nibble::new(5), Nibble::new(3), operation)]);
  }
}
