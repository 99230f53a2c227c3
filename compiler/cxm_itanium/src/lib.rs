//! Itanium C++ ABI symbol encoder.
//!
//! Produces `_Z`-prefixed symbols as emitted by GCC and Clang:
//!
//! | Declaration | Symbol |
//! |-------------|--------|
//! | `void foo()` | `_Z3foov` |
//! | `void foo(void *, void *)` | `_Z3fooPvS_` |
//! | `void a::S::foo()` | `_ZN1a1S3fooEv` |
//! | `void a::S::const_foo() const` | `_ZNK1a1S9const_fooEv` |
//! | `int* const bar` | `_ZL3bar` |
//! | `ClassA::$$vtable` | `_ZTV6ClassA` |
//!
//! Repeated sub-expressions within one symbol are replaced by
//! back-references from a [`CompressionDictionary`] created for that symbol
//! alone.
//!
//! # Reference
//!
//! - Itanium C++ ABI, section 5.1 "External Names"

mod dictionary;
mod encoder;

use cxm_ir::{Result, Signature};

pub use dictionary::{substitution_code, CompressionDictionary};
pub use encoder::ItaniumEncoder;

/// Encode `signature` with a fresh dictionary.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = signature.len()))]
pub fn mangle(signature: &Signature) -> Result<String> {
    let mut encoder = ItaniumEncoder::new();
    let symbol = encoder.encode_signature(signature)?;
    tracing::debug!(
        %symbol,
        substitutions = encoder.dictionary().len(),
        "encoded"
    );
    Ok(symbol)
}
