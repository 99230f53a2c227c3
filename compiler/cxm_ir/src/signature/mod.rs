//! A fully resolved declaration and the shapes it can take.

use std::fmt;

use smallvec::SmallVec;

use crate::{MangleError, Node, Result};

/// A prototype after all resolution passes.
///
/// A well-formed signature has one to three top-level nodes; [`Signature::shape`]
/// decides what kind of declaration they describe. Other lengths are kept so
/// the error surfaces at dispatch with the offending nodes still visible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    nodes: SmallVec<[Node; 3]>,
}

/// What a [`Signature`] declares.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape<'a> {
    /// A lone special name: `ClassA::$$vtable`.
    Special(&'a Node),
    /// `type name`: a global or static data member.
    Variable { ty: &'a Node, name: &'a Node },
    /// A function. `ret` is absent for constructors and destructors
    /// (`ClassA::$$ctor()`) and for other prototypes written without one.
    Function {
        ret: Option<&'a Node>,
        name: &'a Node,
        params: &'a [Node],
        is_const: bool,
    },
}

impl Signature {
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Self {
        Signature {
            nodes: nodes.into_iter().collect(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Classify the signature by its length and its last node.
    pub fn shape(&self) -> Result<Shape<'_>> {
        match self.nodes.as_slice() {
            [special] => Ok(Shape::Special(special)),
            [name, tail] => Ok(match tail.as_function() {
                Some((params, is_const)) => Shape::Function {
                    ret: None,
                    name,
                    params,
                    is_const,
                },
                None => Shape::Variable {
                    ty: name,
                    name: tail,
                },
            }),
            [ret, name, tail] => match tail.as_function() {
                Some((params, is_const)) => Ok(Shape::Function {
                    ret: Some(ret),
                    name,
                    params,
                    is_const,
                }),
                None => Err(MangleError::MalformedSignature(format!(
                    "expected an argument list, found {}",
                    tail.describe()
                ))),
            },
            [] => Err(MangleError::MalformedSignature("empty prototype".into())),
            _ => Err(MangleError::MalformedSignature(format!(
                "too much stuff: {} top-level elements in '{self}'",
                self.nodes.len()
            ))),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
