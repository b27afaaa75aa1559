//! Reading and writing program files. Every I/O failure is reported with the path involved.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub fn read_to_string(path: &Path) -> Result<String> {
  fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), e))
}

/// Whether two paths name the same file, either literally or once resolved.
pub fn same_file(a: &Path, b: &Path) -> bool {
  if a == b {
    return true;
  }
  match (fs::canonicalize(a), fs::canonicalize(b)) {
    (Ok(a), Ok(b)) => a == b,
    _              => false
  }
}

/// Writes each line followed by a newline, replacing the file if it exists.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
  let context = || path.display().to_string();
  let mut file = fs::File::create(path).map_err(|e| Error::io(context(), e))?;
  for line in lines {
    writeln!(file, "{}", line.as_ref()).map_err(|e| Error::io(context(), e))?;
  }
  file.flush().map_err(|e| Error::io(context(), e))
}

/// The input path with its extension replaced, e.g. `prog.asm` becomes `prog.hex`.
pub fn output_path(input: &Path, extension: &str) -> PathBuf {
  input.with_extension(extension)
}
