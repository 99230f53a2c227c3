//! Mangling scheme selector.

use std::fmt;
use std::str::FromStr;

use crate::MangleError;

/// The name-mangling scheme a symbol is produced for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Abi {
    /// Itanium C++ ABI (GCC, Clang).
    #[default]
    Itanium,
    /// Legacy Macintosh scheme (Metrowerks `CodeWarrior`).
    Macintosh,
}

impl Abi {
    /// Every selectable ABI.
    pub const ALL: [Abi; 2] = [Abi::Itanium, Abi::Macintosh];

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Abi::Itanium => "itanium",
            Abi::Macintosh => "macintosh",
        }
    }
}

impl fmt::Display for Abi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Abi {
    type Err = MangleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "itanium" | "gnu" | "gcc" | "clang" => Ok(Abi::Itanium),
            "macintosh" | "mwcc" | "codewarrior" => Ok(Abi::Macintosh),
            _ => Err(MangleError::UnknownAbi(s.to_owned())),
        }
    }
}
