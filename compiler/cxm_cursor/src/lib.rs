//! Owned character queue over a prototype string.
//!
//! The parser consumes its input destructively: it tests prefixes, pops
//! characters off the front, and recurses into nested argument lists with
//! the same cursor. [`CharCursor`] is that queue and nothing more. It knows
//! nothing about C++ beyond which characters count as whitespace and which
//! may appear in an identifier.
//!
//! # Character Classes
//!
//! - **Whitespace**: ASCII whitespace (space, tab, newline, carriage return).
//! - **Identifier**: ASCII alphanumerics, `_`, and `$`. The `$` admits the
//!   `$$ctor`-style pseudo-tokens as ordinary words.

use std::collections::VecDeque;
use std::fmt;

/// Returns `true` if `c` may appear inside an identifier or pseudo-token.
#[inline]
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Returns `true` if `c` is skipped between tokens.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    c.is_ascii_whitespace()
}

/// Owned, mutable character queue.
///
/// Created fresh for every parse and consumed destructively. Cloning is
/// cheap enough for snapshots in tests but the parser never backtracks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharCursor {
    chars: VecDeque<char>,
}

impl CharCursor {
    /// Create a cursor positioned at the first character of `source`.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
        }
    }

    /// Number of characters left in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` once every character has been consumed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The next character, without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.chars.front().copied()
    }

    /// Consume and return the next character.
    #[inline]
    pub fn pop(&mut self) -> Option<char> {
        self.chars.pop_front()
    }

    /// Returns `true` if the remaining input begins with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        let mut remaining = self.chars.iter();
        prefix
            .chars()
            .all(|expected| remaining.next() == Some(&expected))
    }

    /// Remove up to `n` characters from the front, returned in source order.
    pub fn pop_front(&mut self, n: usize) -> String {
        let n = n.min(self.chars.len());
        self.chars.drain(..n).collect()
    }

    /// Remove up to `n` characters from the back, returned in source order.
    pub fn pop_back(&mut self, n: usize) -> String {
        let start = self.chars.len().saturating_sub(n);
        self.chars.drain(start..).collect()
    }

    /// Consume `prefix` if the remaining input begins with it.
    pub fn eat(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.pop_front(prefix.chars().count());
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds, returning them.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let end = self
            .chars
            .iter()
            .position(|&c| !pred(c))
            .unwrap_or(self.chars.len());
        self.chars.drain(..end).collect()
    }

    /// Skip leading whitespace, returning how many characters were skipped.
    pub fn skip_whitespace(&mut self) -> usize {
        let before = self.chars.len();
        while self.peek().is_some_and(is_whitespace) {
            self.chars.pop_front();
        }
        before - self.chars.len()
    }
}

impl fmt::Display for CharCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.chars {
            fmt::Write::write_char(f, c)?;
        }
        Ok(())
    }
}
