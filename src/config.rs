//! Configuration for the assembler and the machine.
//!
//! Every field has a default, so an empty JSON object is a complete configuration and a file
//! only needs to name what it changes:
//!
//! ```json
//! { "pacing": { "mode": "step" }, "assembler": { "mnemonics": "lenient" } }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::bytecode::MnemonicMode;
use crate::error::{Error, Result};
use crate::files;

/// Default configuration constants.
mod defaults {
  /// Memory slots, register slots included.
  pub const CAPACITY: usize = 100;

  /// Slots reserved for PC, W, X and Y. Execution starts here.
  pub const BASE: usize = 4;

  /// Seconds between instructions when pacing by delay.
  pub const DELAY_SECS: u64 = 4;

  pub fn delay_secs() -> u64 {
    DELAY_SECS
  }

  /// Extension of the encoded program written by the assembler.
  pub const EXTENSION: &str = "hex";
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
  pub memory    : MemoryConfig,
  pub pacing    : Pacing,
  pub assembler : AssemblerConfig,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct MemoryConfig {
  pub capacity : usize,
  pub base     : usize,
}

impl Default for MemoryConfig {
  fn default() -> Self {
    MemoryConfig {
      capacity : defaults::CAPACITY,
      base     : defaults::BASE,
    }
  }
}

/// How the machine waits between two instructions.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Pacing {
  /// Sleep for a fixed time.
  Delay {
    #[serde(default = "defaults::delay_secs")]
    secs: u64
  },
  /// Wait for an external trigger (a line on standard input from the CLI).
  Step,
  /// Do not wait at all.
  Unpaced,
}

impl Default for Pacing {
  fn default() -> Self {
    Pacing::Delay { secs: defaults::DELAY_SECS }
  }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct AssemblerConfig {
  pub mnemonics : MnemonicMode,
  pub extension : String,
}

impl Default for AssemblerConfig {
  fn default() -> Self {
    AssemblerConfig {
      mnemonics : MnemonicMode::default(),
      extension : defaults::EXTENSION.to_string(),
    }
  }
}

impl Config {

  pub fn from_json(text: &str) -> Result<Config> {
    let config: Config = serde_json::from_str(text)?;
    config.validate()?;
    Ok(config)
  }

  pub fn load(path: &Path) -> Result<Config> {
    Config::from_json(&files::read_to_string(path)?)
  }

  pub fn validate(&self) -> Result<()> {
    if self.memory.base >= self.memory.capacity {
      return Err(Error::InvalidConfig(format!(
        "memory.base ({}) leaves no room for instructions in memory.capacity ({})",
        self.memory.base, self.memory.capacity
      )));
    }
    if self.assembler.extension.is_empty() {
      return Err(Error::InvalidConfig("assembler.extension is empty".to_string()));
    }
    Ok(())
  }
}
