//! The execution engine: a program counter stepping through a loaded `Program`, one
//! instruction per step, with the result of each step pushed to an `OutputSink`.

use std::fmt::{Display, Formatter};

use log::{debug, warn};
use prettytable::{format as TableFormat, Table};

use crate::bytecode::evaluate;
use crate::error::{Error, Result};
use crate::nibble::Nibble;
use crate::pacing::Pacer;
use crate::program::Program;
use crate::sink::OutputSink;

/// The register set. Only the machine writes it; sinks get a shared view after every step.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Registers {
  pub pc : usize,  // Memory slot of the next instruction
  pub w  : Nibble, // Result of the last instruction
  pub x  : Nibble, // Operand A of the last instruction
  pub y  : Nibble, // Operand B of the last instruction
}

impl Display for Registers {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "PC={} W={} X={} Y={}", self.pc, self.w, self.x, self.y)
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
  /// Program counter at the base offset, nothing executed yet.
  Ready,
  Running,
  /// Program counter past the last loaded instruction.
  Halted
}

impl Display for State {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      State::Ready   => write!(f, "Ready"),
      State::Running => write!(f, "Running"),
      State::Halted  => write!(f, "Halted"),
    }
  }
}

pub struct Machine {
  program   : Program,
  registers : Registers,
  state     : State
}

impl Machine {

  // region Display methods

  fn make_register_table(registers: &Registers) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Register", ubl->"Contents"]);

    table.add_row(row![r->"PC =", format!("{}", registers.pc)]);
    table.add_row(row![r->"W =", format!("{} ({:04b})", registers.w, registers.w)]);
    table.add_row(row![r->"X =", format!("{}", registers.x)]);
    table.add_row(row![r->"Y =", format!("{}", registers.y)]);
    table
  }

  fn make_memory_table(program: &Program, highlight: usize) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    for (i, instruction) in program.instructions().iter().enumerate() {
      let slot = i + program.base();
      match slot == highlight {

        true  => {
          table.add_row(
            row![r->format!("* --> mem[{}] =", slot), format!("{}", instruction)]
          );
        }

        false => {
          table.add_row(
            row![r->format!("mem[{}] =", slot), format!("{}", instruction)]
          );
        }

      } // end match on highlight
    } // end for
    table
  }

  // endregion

  pub fn new(program: Program) -> Machine {
    let registers = Registers {
      pc: program.base(),
      ..Registers::default()
    };
    Machine {
      program,
      registers,
      state: State::Ready
    }
  }

  pub fn registers(&self) -> &Registers {
    &self.registers
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn program(&self) -> &Program {
    &self.program
  }

  /// Back to `Ready`: registers cleared, program counter at the base offset.
  pub fn reset(&mut self) {
    self.registers = Registers {
      pc: self.program.base(),
      ..Registers::default()
    };
    self.state = State::Ready;
  }

  /**
    Executes the instruction at the program counter: loads both operands into `X` and `Y`,
    evaluates the selected operation into `W`, refreshes the sink, and advances the program
    counter. Stepping a halted machine does nothing.

    A selector outside the operation table is reported and yields `W = 0`; the step still
    completes.
  */
  pub fn step(&mut self, sink: &mut dyn OutputSink) -> Result<State> {
    if self.state == State::Halted {
      return Ok(State::Halted);
    }

    let pc = self.registers.pc;
    if pc >= self.program.capacity() {
      return Err(Error::ProgramOverrun { pc, capacity: self.program.capacity() });
    }

    let instruction = match self.program.fetch(pc) {
      Some(instruction) => instruction,
      None              => {
        self.state = State::Halted;
        return Ok(State::Halted);
      }
    };

    self.state = State::Running;
    self.registers.x = instruction.a;
    self.registers.y = instruction.b;
    self.registers.w =
      match evaluate(instruction.selector.value(), instruction.a, instruction.b) {
        Ok(result) => result,
        Err(e)     => {
          warn!("mem[{}] = {}: {}; result is 0", pc, instruction, e);
          Nibble::ZERO
        }
      };
    debug!("mem[{}] = {} -> {}", pc, instruction, self.registers);

    sink.refresh(&self.registers)?;
    self.registers.pc += 1;

    if self.registers.pc >= self.program.end() {
      self.state = State::Halted;
    }

    #[cfg(feature = "trace_computation")]
    debug!("\n{}", self);

    Ok(self.state)
  }

  /// Steps until halted, pausing between steps but not after the last one. Returns the number
  /// of instructions executed.
  pub fn run(&mut self, sink: &mut dyn OutputSink, pacer: &mut dyn Pacer) -> Result<usize> {
    let mut steps = 0;
    while self.state != State::Halted {
      if steps > 0 {
        pacer.pause()?;
      }
      let pc = self.registers.pc;
      self.step(sink)?;
      if self.registers.pc != pc {
        steps += 1;
      }
    }
    debug!("halted after {} steps with {}", steps, self.registers);
    Ok(steps)
  }
}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for Machine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let register_table = Machine::make_register_table(&self.registers);
    let memory_table   = Machine::make_memory_table(&self.program, self.registers.pc);

    let mut combined_table = table!([register_table, memory_table]);

    combined_table.set_titles(row![ub->"Registers", ub->"Memory"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(f, "State: {}\n{}", self.state, combined_table)
  }
}
