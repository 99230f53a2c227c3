//! Declaration tree.
//!
//! A [`Node`] is one resolved piece of a prototype: a name, a builtin type,
//! a decorated type, a qualified name, an argument list, or a special
//! compiler-generated name. Children are owned; trees never share or cycle.
//!
//! # Canonical rendering
//!
//! `Display` renders the canonical textual form of a node. Two subtrees are
//! the same sub-expression exactly when their renderings are equal, which is
//! what the Itanium substitution dictionary keys on:
//!
//! | Node | Rendering |
//! |------|-----------|
//! | `Name` | `foo` |
//! | `Combined` | `unsigned int` |
//! | `Const` | `int const` |
//! | `Indirect` | `int *`, `int &`, `int &&` |
//! | `Scope` | `a :: b` |
//! | `Template` | `A < int, char >` |
//! | `Function` | `( int, char )` |
//! | `Special` | `$$ctor1`, `$$vtable` |
//! | `Operator` | `operator +=` |
//!
//! Rendering recurses once per nesting level and grows the stack as it
//! goes, so arbitrarily deep template nests render without overflow.

mod operator;

use std::fmt;

use cxm_stack::ensure_sufficient_stack;

pub use operator::Operator;

/// A fundamental type spelled by a keyword.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Void,
    Bool,
    Char,
    Short,
    Int,
    Int64,
    Int128,
    Float,
    Double,
    Float80,
    Float128,
    /// `...`
    Ellipsis,
}

impl Builtin {
    /// Look up the builtin spelled by `word`.
    pub fn from_keyword(word: &str) -> Option<Builtin> {
        Some(match word {
            "void" => Builtin::Void,
            "bool" => Builtin::Bool,
            "char" => Builtin::Char,
            "short" => Builtin::Short,
            "int" => Builtin::Int,
            "__int64" => Builtin::Int64,
            "__int128" => Builtin::Int128,
            "float" => Builtin::Float,
            "double" => Builtin::Double,
            "__float80" => Builtin::Float80,
            "__float128" => Builtin::Float128,
            "..." => Builtin::Ellipsis,
            _ => return None,
        })
    }

    pub const fn spelling(self) -> &'static str {
        match self {
            Builtin::Void => "void",
            Builtin::Bool => "bool",
            Builtin::Char => "char",
            Builtin::Short => "short",
            Builtin::Int => "int",
            Builtin::Int64 => "__int64",
            Builtin::Int128 => "__int128",
            Builtin::Float => "float",
            Builtin::Double => "double",
            Builtin::Float80 => "__float80",
            Builtin::Float128 => "__float128",
            Builtin::Ellipsis => "...",
        }
    }
}

/// `unsigned`, `signed` and `long`: keywords that modify the type to their
/// right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    Unsigned,
    Signed,
    Long,
}

impl Combinator {
    pub fn from_keyword(word: &str) -> Option<Combinator> {
        match word {
            "unsigned" => Some(Combinator::Unsigned),
            "signed" => Some(Combinator::Signed),
            "long" => Some(Combinator::Long),
            _ => None,
        }
    }

    pub const fn spelling(self) -> &'static str {
        match self {
            Combinator::Unsigned => "unsigned",
            Combinator::Signed => "signed",
            Combinator::Long => "long",
        }
    }
}

/// Pointer-like declarators, which apply to the type on their left.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Indirection {
    /// `*`
    Pointer,
    /// `&`
    Reference,
    /// `&&`
    RvalueReference,
}

impl Indirection {
    pub const fn symbol(self) -> &'static str {
        match self {
            Indirection::Pointer => "*",
            Indirection::Reference => "&",
            Indirection::RvalueReference => "&&",
        }
    }

    /// Returns `true` for `&` and `&&`.
    pub const fn is_reference(self) -> bool {
        matches!(self, Indirection::Reference | Indirection::RvalueReference)
    }
}

/// Constructor variants (`C1`, `C2`, `C3`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CtorVariant {
    Complete = 1,
    Base = 2,
    Allocating = 3,
}

impl CtorVariant {
    pub const fn number(self) -> u8 {
        self as u8
    }
}

/// Destructor variants (`D0`, `D1`, `D2`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DtorVariant {
    Deleting = 0,
    Complete = 1,
    Base = 2,
}

impl DtorVariant {
    pub const fn number(self) -> u8 {
        self as u8
    }
}

/// A compiler-generated entity requested with a `$$` pseudo-token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpecialName {
    Constructor(CtorVariant),
    Destructor(DtorVariant),
    VTable,
    Rtti,
    VttStructure,
    RttiName,
}

impl SpecialName {
    /// Look up a `$$` pseudo-token. `$$unary` is not a name and returns `None`.
    pub fn from_token(word: &str) -> Option<SpecialName> {
        Some(match word {
            "$$ctor" | "$$ctor1" => SpecialName::Constructor(CtorVariant::Complete),
            "$$ctor2" => SpecialName::Constructor(CtorVariant::Base),
            "$$ctor3" => SpecialName::Constructor(CtorVariant::Allocating),
            "$$dtor0" => SpecialName::Destructor(DtorVariant::Deleting),
            "$$dtor" | "$$dtor1" => SpecialName::Destructor(DtorVariant::Complete),
            "$$dtor2" => SpecialName::Destructor(DtorVariant::Base),
            "$$vtable" => SpecialName::VTable,
            "$$rtti" => SpecialName::Rtti,
            "$$vtt_structure" => SpecialName::VttStructure,
            "$$rtti_name" => SpecialName::RttiName,
            _ => return None,
        })
    }

    /// Returns `true` for the table-like entities that name a whole class
    /// rather than a member: vtable, RTTI, VTT and RTTI name.
    pub const fn is_class_data(self) -> bool {
        !matches!(
            self,
            SpecialName::Constructor(_) | SpecialName::Destructor(_)
        )
    }
}

impl fmt::Display for SpecialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialName::Constructor(v) => write!(f, "$$ctor{}", v.number()),
            SpecialName::Destructor(v) => write!(f, "$$dtor{}", v.number()),
            SpecialName::VTable => f.write_str("$$vtable"),
            SpecialName::Rtti => f.write_str("$$rtti"),
            SpecialName::VttStructure => f.write_str("$$vtt_structure"),
            SpecialName::RttiName => f.write_str("$$rtti_name"),
        }
    }
}

/// One resolved element of a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    /// A plain identifier.
    Name(String),
    Builtin(Builtin),
    /// `unsigned int`, `long double`, ...
    Combined {
        combinator: Combinator,
        operand: Box<Node>,
    },
    /// `T const`
    Const(Box<Node>),
    /// `T *`, `T &`, `T &&`
    Indirect {
        kind: Indirection,
        operand: Box<Node>,
    },
    /// `scope :: member`
    Scope {
        scope: Box<Node>,
        /// A name, operator or special name.
        member: Box<Node>,
    },
    /// `anchor < args >`
    Template {
        anchor: Box<Node>,
        /// Never empty.
        args: Vec<Node>,
    },
    /// `( args )`, never empty (`()` holds a single `void`).
    Function(Vec<Node>),
    Special(SpecialName),
    Operator(Operator),
    /// `operator[]` after it has claimed the node on its left. The claimed
    /// node takes no part in rendering or encoding.
    Subscript(Box<Node>),
}

impl Node {
    pub fn name(text: impl Into<String>) -> Node {
        Node::Name(text.into())
    }

    pub fn combined(combinator: Combinator, operand: Node) -> Node {
        Node::Combined {
            combinator,
            operand: Box::new(operand),
        }
    }

    pub fn constant(operand: Node) -> Node {
        Node::Const(Box::new(operand))
    }

    pub fn indirect(kind: Indirection, operand: Node) -> Node {
        Node::Indirect {
            kind,
            operand: Box::new(operand),
        }
    }

    pub fn scope(scope: Node, member: Node) -> Node {
        Node::Scope {
            scope: Box::new(scope),
            member: Box::new(member),
        }
    }

    pub fn template(anchor: Node, args: Vec<Node>) -> Node {
        Node::Template {
            anchor: Box::new(anchor),
            args,
        }
    }

    /// Returns `true` for `T const`.
    pub fn is_const(&self) -> bool {
        matches!(self, Node::Const(_))
    }

    /// Builtins and combined builtins: the nodes a combinator may claim,
    /// and the nodes that never enter the substitution dictionary.
    pub fn is_fundamental(&self) -> bool {
        matches!(self, Node::Builtin(_) | Node::Combined { .. })
    }

    /// Whether an occurrence of this node may later be referred back to.
    pub fn is_substitutable(&self) -> bool {
        !self.is_fundamental()
    }

    /// Returns `true` for `T &` and `T &&`.
    pub fn is_reference(&self) -> bool {
        matches!(self, Node::Indirect { kind, .. } if kind.is_reference())
    }

    /// The argument list of a function node, looking through a trailing
    /// `const` (`( ) const`). The flag reports whether the `const` was there.
    pub fn as_function(&self) -> Option<(&[Node], bool)> {
        match self {
            Node::Function(params) => Some((params, false)),
            Node::Const(inner) => match inner.as_ref() {
                Node::Function(params) => Some((params, true)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Node::Name(text) => format!("name '{text}'"),
            Node::Builtin(b) => format!("type '{}'", b.spelling()),
            Node::Combined { .. } | Node::Const(_) | Node::Indirect { .. } => {
                format!("type '{self}'")
            }
            Node::Scope { .. } => format!("qualified name '{self}'"),
            Node::Template { .. } => format!("template '{self}'"),
            Node::Function(_) => "an argument list".to_owned(),
            Node::Special(special) => format!("'{special}'"),
            Node::Operator(_) | Node::Subscript(_) => format!("'{self}'"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Node]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.render(f))
    }
}

impl Node {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Name(text) => f.write_str(text),
            Node::Builtin(b) => f.write_str(b.spelling()),
            Node::Combined {
                combinator,
                operand,
            } => write!(f, "{} {operand}", combinator.spelling()),
            Node::Const(operand) => write!(f, "{operand} const"),
            Node::Indirect { kind, operand } => write!(f, "{operand} {}", kind.symbol()),
            Node::Scope { scope, member } => write!(f, "{scope} :: {member}"),
            Node::Template { anchor, args } => {
                write!(f, "{anchor} < ")?;
                write_list(f, args)?;
                f.write_str(" >")
            }
            Node::Function(params) => {
                f.write_str("( ")?;
                write_list(f, params)?;
                f.write_str(" )")
            }
            Node::Special(special) => write!(f, "{special}"),
            Node::Operator(op) => write!(f, "{op}"),
            Node::Subscript(_) => write!(f, "{}", Operator::Subscript),
        }
    }
}

#[cfg(test)]
mod tests;
