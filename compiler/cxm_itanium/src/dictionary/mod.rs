//! Substitution dictionary.
//!
//! Maps the canonical rendering of a sub-expression to the back-reference
//! code that replaces its later occurrences. Codes are handed out in
//! registration order: `S_`, `S0_`, `S1_`, ..., `S9_`, `SA_`, ..., `SZ_`,
//! `S10_`, ... A handful of standard library names have fixed codes that
//! exist before anything is registered and do not consume an index.

use rustc_hash::FxHashMap;

const STD_STRING: &str =
    "std :: basic_string < char, std :: char_traits < char >, std :: allocator < char > >";

/// Standard abbreviations available in every dictionary.
const PRESEEDED: [(&str, &str); 8] = [
    ("std", "St"),
    ("std :: nullptr_t", "Dn"),
    ("std :: allocator", "Sa"),
    ("std :: basic_string", "Sb"),
    (STD_STRING, "Ss"),
    (
        "std :: basic_istream < char, std :: char_traits < char > >",
        "Si",
    ),
    (
        "std :: basic_ostream < char, std :: char_traits < char > >",
        "So",
    ),
    (
        "std :: basic_iostream < char, std :: char_traits < char > >",
        "Sd",
    ),
];

/// Per-symbol substitution table.
///
/// One dictionary serves exactly one symbol. Sharing it between symbols
/// would number back-references against sub-expressions the second symbol
/// never contained.
#[derive(Clone, Debug)]
pub struct CompressionDictionary {
    codes: FxHashMap<String, String>,
    /// Keys in registration order, preseeded entries excluded.
    registered: Vec<String>,
}

impl Default for CompressionDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressionDictionary {
    /// A dictionary holding only the standard abbreviations.
    pub fn new() -> Self {
        let codes = PRESEEDED
            .iter()
            .map(|&(key, code)| (key.to_owned(), code.to_owned()))
            .collect();
        CompressionDictionary {
            codes,
            registered: Vec::new(),
        }
    }

    /// The back-reference code for `key`, if it has one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.codes.get(key).map(String::as_str)
    }

    /// Whether `key` has a code, preseeded or registered. Lets callers
    /// inspect what an encoder compressed.
    pub fn contains(&self, key: &str) -> bool {
        self.codes.contains_key(key)
    }

    /// Assign the next code to `key`. A key that already has a code keeps
    /// it, and no index is consumed.
    pub fn register(&mut self, key: String) {
        if self.codes.contains_key(&key) {
            return;
        }
        let code = substitution_code(self.registered.len());
        tracing::trace!(%key, %code, "substitution registered");
        self.registered.push(key.clone());
        self.codes.insert(key, code);
    }

    /// Number of registered keys, preseeded entries excluded.
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Registered `(key, code)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.registered.iter().filter_map(|key| {
            self.codes
                .get(key)
                .map(|code| (key.as_str(), code.as_str()))
        })
    }
}

/// Code of the `index`-th registration (0-based).
pub fn substitution_code(index: usize) -> String {
    let Some(seq) = index.checked_sub(1) else {
        return "S_".to_owned();
    };
    let mut digits = Vec::new();
    let mut rest = seq;
    loop {
        digits.push(base36_digit(rest % 36));
        rest /= 36;
        if rest == 0 {
            break;
        }
    }
    let mut code = String::with_capacity(digits.len() + 2);
    code.push('S');
    code.extend(digits.iter().rev());
    code.push('_');
    code
}

fn base36_digit(value: usize) -> char {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    char::from(DIGITS[value % 36])
}
