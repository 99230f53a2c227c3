//! Prototype parser.
//!
//! Turns a C++ declaration written the way a header would write it
//! (`"void a::S::foo() const"`, `"int* const bar"`, `"ClassA::$$vtable"`)
//! into a resolved [`Signature`].
//!
//! Parsing runs in two stages:
//!
//! 1. **Tokenize** ([`lexer`]): words are classified, `(...)` and `<...>`
//!    lists are parsed recursively into nodes.
//! 2. **Resolve** ([`resolve`]): four ordered passes fold the flat sequence
//!    into trees following C++ declarator precedence.
//!
//! The grammar is a restricted subset of C++. Function pointer types,
//! lambdas, `noexcept` and attributes are not understood.

mod lexer;
mod resolve;

use cxm_cursor::CharCursor;
use cxm_ir::{MangleError, Result, Signature};

/// Parse one prototype.
///
/// # Errors
///
/// Returns the first [`MangleError`] met while tokenizing or resolving.
/// A stray `)`, `>` or `,` after the prototype is
/// [`MangleError::UnexpectedCloser`].
#[tracing::instrument(level = "debug", skip_all, fields(prototype = %prototype))]
pub fn parse_signature(prototype: &str) -> Result<Signature> {
    let mut cursor = CharCursor::new(prototype);
    let tokens = lexer::tokenize(&mut cursor)?;
    if let Some(c) = cursor.peek() {
        return Err(MangleError::UnexpectedCloser(c));
    }
    tracing::trace!(tokens = tokens.len(), "tokenized");

    let signature = Signature::new(resolve::resolve(tokens)?);
    tracing::debug!(nodes = signature.len(), "resolved");
    Ok(signature)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
