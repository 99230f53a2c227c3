//! GNU ld script builder.
//!
//! Accumulates symbol assignments for C++ declarations:
//!
//! ```text
//! _Z3foov = 0x80003100;
//! PROVIDE(_ZN6ClassAC1Ev = 0x80004000);
//! ```
//!
//! See the ld manual, "Simple Assignments" and "PROVIDE".

use std::fmt;
use std::path::Path;

use crate::{mangle_all, Abi, MangleError, Result};

/// How a symbol is bound to its address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Binding {
    /// `S = A;`
    Assign,
    /// `PROVIDE(S = A);`, only used if nothing else defines `S`.
    Provide,
}

impl Binding {
    fn write_line(self, out: &mut String, symbol: &str, address: u64) {
        match self {
            Binding::Assign => out.push_str(&format!("{symbol} = {address:#x};\n")),
            Binding::Provide => out.push_str(&format!("PROVIDE({symbol} = {address:#x});\n")),
        }
    }
}

/// Text of a linker script, built one declaration at a time.
#[derive(Clone, Debug)]
pub struct LinkerScript {
    abi: Abi,
    buffer: String,
    lines: usize,
}

impl LinkerScript {
    /// An empty script whose symbols are mangled for `abi`.
    pub fn new(abi: Abi) -> Self {
        LinkerScript {
            abi,
            buffer: String::new(),
            lines: 0,
        }
    }

    pub fn abi(&self) -> Abi {
        self.abi
    }

    /// Append `symbol = address;`. On error nothing is appended.
    pub fn assign(&mut self, prototype: &str, address: u64) -> Result<()> {
        self.push(Binding::Assign, prototype, address)
    }

    /// Append `PROVIDE(symbol = address);`. On error nothing is appended.
    pub fn provide(&mut self, prototype: &str, address: u64) -> Result<()> {
        self.push(Binding::Provide, prototype, address)
    }

    /// Batch form of [`LinkerScript::assign`].
    ///
    /// Prototypes are mangled in parallel; lines are appended in input
    /// order. Failed entries are skipped, logged, and returned with their
    /// index.
    pub fn assign_all(&mut self, entries: &[(&str, u64)]) -> Vec<(usize, MangleError)> {
        self.push_all(Binding::Assign, entries)
    }

    /// Batch form of [`LinkerScript::provide`].
    pub fn provide_all(&mut self, entries: &[(&str, u64)]) -> Vec<(usize, MangleError)> {
        self.push_all(Binding::Provide, entries)
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Number of lines written so far.
    pub fn len(&self) -> usize {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    /// Write the script to `path`, replacing any existing file.
    ///
    /// An unwritable path is not an error for callers generating many
    /// scripts: it is logged and reported as `false`.
    pub fn save(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match std::fs::write(path, &self.buffer) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), lines = self.lines, "linker script saved");
                true
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "could not write linker script");
                false
            }
        }
    }

    fn push(&mut self, binding: Binding, prototype: &str, address: u64) -> Result<()> {
        let symbol = crate::mangle(prototype, self.abi)?;
        binding.write_line(&mut self.buffer, &symbol, address);
        self.lines += 1;
        Ok(())
    }

    fn push_all(&mut self, binding: Binding, entries: &[(&str, u64)]) -> Vec<(usize, MangleError)> {
        let prototypes: Vec<&str> = entries.iter().map(|&(prototype, _)| prototype).collect();
        let symbols = mangle_all(&prototypes, self.abi);

        let mut failures = Vec::new();
        let results = symbols.into_iter().zip(entries).enumerate();
        for (index, (symbol, &(prototype, address))) in results {
            match symbol {
                Ok(symbol) => {
                    binding.write_line(&mut self.buffer, &symbol, address);
                    self.lines += 1;
                }
                Err(error) => {
                    tracing::warn!(index, prototype, %error, "skipping prototype");
                    failures.push((index, error));
                }
            }
        }
        failures
    }
}

impl fmt::Display for LinkerScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}
