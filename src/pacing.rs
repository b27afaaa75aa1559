//! Pacing policies: what the run loop does between two steps.

use std::io::{self, BufRead};
use std::thread;
use std::time::Duration;

use log::trace;

use crate::config::Pacing;
use crate::error::{Error, Result};

pub trait Pacer {
  /// Called between two steps, never after the last one.
  fn pause(&mut self) -> Result<()>;
}

/// Sleeps for a fixed time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Delay(pub Duration);

impl Pacer for Delay {
  fn pause(&mut self) -> Result<()> {
    trace!("sleeping {:?}", self.0);
    thread::sleep(self.0);
    Ok(())
  }
}

/**
  Waits for an external trigger: one line read from `input` per step. End of input releases
  the remaining steps, so a closed trigger never blocks the machine forever.
*/
pub struct StepTrigger<R: BufRead> {
  input     : R,
  exhausted : bool
}

impl<R: BufRead> StepTrigger<R> {
  pub fn new(input: R) -> StepTrigger<R> {
    StepTrigger {
      input,
      exhausted: false
    }
  }
}

impl<R: BufRead> Pacer for StepTrigger<R> {
  fn pause(&mut self) -> Result<()> {
    if self.exhausted {
      return Ok(());
    }
    let mut line = String::new();
    match self.input.read_line(&mut line) {
      Ok(0)  => {
        trace!("step trigger closed");
        self.exhausted = true;
        Ok(())
      }
      Ok(_)  => Ok(()),
      Err(e) => Err(Error::io("step trigger", e))
    }
  }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Unpaced;

impl Pacer for Unpaced {
  fn pause(&mut self) -> Result<()> {
    Ok(())
  }
}

/// Builds the pacer a configuration asks for. The step trigger reads standard input.
pub fn pacer_for(pacing: &Pacing) -> Box<dyn Pacer> {
  match pacing {
    Pacing::Delay { secs } => Box::new(Delay(Duration::from_secs(*secs))),
    Pacing::Step           => Box::new(StepTrigger::new(io::BufReader::new(io::stdin()))),
    Pacing::Unpaced        => Box::new(Unpaced),
  }
}
