//! Shared vocabulary of the symbol mangler.
//!
//! The parser (`cxm_parse`) produces a [`Signature`] made of [`Node`] trees;
//! the encoders (`cxm_itanium`, `cxm_macintosh`) walk those trees. Nothing in
//! this crate knows how any ABI spells a symbol. It only defines *what* a
//! declaration is.
//!
//! # Contents
//!
//! - [`Node`] and its leaf vocabularies ([`Builtin`], [`Combinator`],
//!   [`Indirection`], [`SpecialName`], [`Operator`])
//! - [`Signature`] and the [`Shape`] view encoders dispatch on
//! - [`Abi`], the mangling scheme selector
//! - [`MangleError`], the single error type of the whole pipeline

mod abi;
mod error;
mod node;
mod signature;

pub use abi::Abi;
pub use error::{MangleError, Result};
pub use node::{
    Builtin, Combinator, CtorVariant, DtorVariant, Indirection, Node, Operator, SpecialName,
};
pub use signature::{Shape, Signature};
