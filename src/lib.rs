/*!
  A four bit logic unit and the tools around it.

  Source text is assembled into instructions of three four bit fields, written out one
  instruction per line as three hex digits, and run on a machine that evaluates one of sixteen
  logic operations per step:

  ```text
  source --[Assembler]--> Instructions --[files]--> prog.hex --[Program::load]--> Machine
                                                                                    │
                                                       OutputSink <--[step/run]-----┘
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod bytecode;
pub mod config;
pub mod error;
pub mod files;
pub mod machine;
pub mod nibble;
pub mod pacing;
pub mod program;
pub mod sink;
pub mod toolchain;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::machine::{Machine, Registers, State};
pub use crate::nibble::Nibble;
pub use crate::program::Program;
