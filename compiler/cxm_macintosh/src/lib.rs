//! Legacy Macintosh C++ symbol encoder.
//!
//! The scheme used by Metrowerks `CodeWarrior` and the console toolchains
//! derived from it. Symbols put the unqualified name first and the class
//! after a `__` separator:
//!
//! | Declaration | Symbol |
//! |-------------|--------|
//! | `void foo()` | `foo__Fv` |
//! | `ActCrowd::procWallMsg(Piki*, MsgWall*)` | `procWallMsg__8ActCrowdFP4PikiP7MsgWall` |
//! | `void name::Test::MethodB() const` | `MethodB__Q24name4TestCFv` |
//! | `ClassA::$$vtable` | `__vt__6ClassA` |
//!
//! There is no substitution: every occurrence of a type is spelled out.
//! Constructs the scheme has no spelling for (`&&`, 64/128-bit extended
//! builtins, numbered constructor and destructor variants, `<=>`,
//! `co_await`, VTT and RTTI name symbols) fail with
//! [`MangleError::Unsupported`].
//!
//! # Known limitation
//!
//! A `const` global is emitted as its bare member name with the scope
//! dropped, which is wrong for namespaced objects.

use cxm_ir::{
    Abi, Builtin, Combinator, CtorVariant, DtorVariant, Indirection, MangleError, Node, Operator,
    Result, Shape, Signature, SpecialName,
};
use cxm_stack::ensure_sufficient_stack;

/// Stateless Macintosh encoder.
#[derive(Copy, Clone, Debug, Default)]
pub struct MacintoshEncoder;

/// Encode `signature` under the Macintosh scheme.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = signature.len()))]
pub fn mangle(signature: &Signature) -> Result<String> {
    let symbol = MacintoshEncoder.encode_signature(signature)?;
    tracing::debug!(%symbol, "encoded");
    Ok(symbol)
}

fn unsupported(feature: impl Into<String>) -> MangleError {
    MangleError::unsupported(Abi::Macintosh, feature)
}

/// Class data the Macintosh ABI has no symbol for.
const fn lacks_encoding(special: SpecialName) -> bool {
    matches!(special, SpecialName::VttStructure | SpecialName::RttiName)
}

/// Split `a::b::name` into `name` and the `a::b` qualifier.
fn split_qualified(name: &Node) -> (&Node, Option<&Node>) {
    match name {
        Node::Scope { scope, member } => (member, Some(scope)),
        other => (other, None),
    }
}

impl MacintoshEncoder {
    /// Encode a whole declaration.
    pub fn encode_signature(self, signature: &Signature) -> Result<String> {
        match signature.shape()? {
            Shape::Special(node) => self.encode_class_data(node),
            Shape::Variable { ty, name } => {
                let (member, qualifier) = split_qualified(name);
                let member = self.unqualified_name(member)?;
                match qualifier {
                    // Scope dropped: the documented limitation.
                    _ if ty.is_const() => Ok(member),
                    Some(scope) => Ok(format!("{member}__{}", self.type_code(scope)?)),
                    None => Ok(member),
                }
            }
            Shape::Function {
                name,
                params,
                is_const,
                ..
            } => {
                let (member, qualifier) = split_qualified(name);
                let mut symbol = self.unqualified_name(member)?;
                symbol.push_str("__");
                if let Some(scope) = qualifier {
                    symbol.push_str(&self.type_code(scope)?);
                }
                if is_const {
                    symbol.push('C');
                }
                symbol.push('F');
                for param in params {
                    symbol.push_str(&self.type_code(param)?);
                }
                Ok(symbol)
            }
        }
    }

    /// `__vt__<class>` and `__RTTI__<class>`.
    fn encode_class_data(self, node: &Node) -> Result<String> {
        let (member, qualifier) = split_qualified(node);
        let prefix = match member {
            Node::Special(SpecialName::VTable) => "__vt__",
            Node::Special(SpecialName::Rtti) => "__RTTI__",
            Node::Special(special) if lacks_encoding(*special) => {
                return Err(unsupported(special.to_string()));
            }
            other => {
                return Err(MangleError::MalformedSignature(format!(
                    "{} is not a complete declaration",
                    other.describe()
                )));
            }
        };
        let Some(class) = qualifier else {
            return Err(MangleError::MalformedSignature(format!(
                "'{member}' needs a class"
            )));
        };
        Ok(format!("{prefix}{}", self.type_code(class)?))
    }

    /// The name part before `__`.
    fn unqualified_name(self, node: &Node) -> Result<String> {
        match node {
            Node::Name(text) => Ok(text.clone()),
            Node::Template { anchor, args } => self.template_text(anchor, args),
            Node::Special(SpecialName::Constructor(CtorVariant::Complete)) => Ok("__ct".to_owned()),
            Node::Special(SpecialName::Destructor(DtorVariant::Complete)) => Ok("__dt".to_owned()),
            Node::Special(SpecialName::Constructor(variant)) => Err(unsupported(format!(
                "constructor variant {}",
                variant.number()
            ))),
            Node::Special(SpecialName::Destructor(variant)) => Err(unsupported(format!(
                "destructor variant {}",
                variant.number()
            ))),
            Node::Special(special) if lacks_encoding(*special) => {
                Err(unsupported(special.to_string()))
            }
            Node::Operator(op) => operator_name(*op)
                .map(str::to_owned)
                .ok_or_else(|| unsupported(op.to_string())),
            Node::Subscript(_) => Ok("__vc".to_owned()),
            other => Err(MangleError::MalformedSignature(format!(
                "{} cannot name a declaration",
                other.describe()
            ))),
        }
    }

    /// Type code of a parameter, qualifier or template argument.
    fn type_code(self, node: &Node) -> Result<String> {
        ensure_sufficient_stack(|| self.type_code_inner(node))
    }

    fn type_code_inner(self, node: &Node) -> Result<String> {
        match node {
            Node::Name(text) => Ok(format!("{}{text}", text.len())),
            Node::Builtin(builtin) => builtin_code(*builtin)
                .map(str::to_owned)
                .ok_or_else(|| unsupported(builtin.spelling())),
            Node::Combined {
                combinator,
                operand,
            } => {
                let inner = self.type_code(operand)?;
                combine(*combinator, &inner)
                    .map(str::to_owned)
                    .ok_or_else(|| MangleError::IncompatibleCombinator {
                        combinator: combinator.spelling(),
                        operand: operand.to_string(),
                    })
            }
            Node::Const(operand) => self.type_code(operand),
            Node::Indirect { kind, operand } => {
                let prefix = match kind {
                    Indirection::Pointer => 'P',
                    Indirection::Reference => 'R',
                    Indirection::RvalueReference => return Err(unsupported("rvalue reference")),
                };
                let inner = self.type_code(operand)?;
                let mut out = String::with_capacity(inner.len() + 2);
                out.push(prefix);
                if operand.is_const() {
                    out.push('C');
                }
                out.push_str(&inner);
                Ok(out)
            }
            Node::Scope { .. } => {
                let mut segments = Vec::new();
                collect_segments(node, &mut segments);
                let mut out = String::new();
                if segments.len() > 1 {
                    out.push('Q');
                    out.push_str(&segments.len().to_string());
                }
                for segment in segments {
                    out.push_str(&self.type_code(segment)?);
                }
                Ok(out)
            }
            Node::Template { anchor, args } => {
                let text = self.template_text(anchor, args)?;
                Ok(format!("{}{text}", text.len()))
            }
            Node::Function(params) => {
                let mut out = String::from("F");
                for param in params {
                    out.push_str(&self.type_code(param)?);
                }
                Ok(out)
            }
            Node::Special(_) | Node::Operator(_) | Node::Subscript(_) => {
                Err(MangleError::MalformedSignature(format!(
                    "{} used as a type",
                    node.describe()
                )))
            }
        }
    }

    /// `name<arg,arg>` with each argument as a type code.
    fn template_text(self, anchor: &Node, args: &[Node]) -> Result<String> {
        let Node::Name(name) = anchor else {
            return Err(MangleError::MalformedSignature(format!(
                "template anchored on {}",
                anchor.describe()
            )));
        };
        let mut text = format!("{name}<");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                text.push(',');
            }
            text.push_str(&self.type_code(arg)?);
        }
        text.push('>');
        Ok(text)
    }
}

/// Flatten a scope chain, outermost first.
fn collect_segments<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    let start = out.len();
    let mut current = node;
    while let Node::Scope { scope, member } = current {
        out.push(member);
        current = scope;
    }
    out.push(current);
    out[start..].reverse();
}

fn builtin_code(builtin: Builtin) -> Option<&'static str> {
    match builtin {
        Builtin::Void => Some("v"),
        Builtin::Bool => Some("b"),
        Builtin::Char => Some("c"),
        Builtin::Short => Some("s"),
        Builtin::Int => Some("i"),
        Builtin::Float => Some("f"),
        Builtin::Double => Some("d"),
        Builtin::Ellipsis => Some("e"),
        Builtin::Int64 | Builtin::Int128 | Builtin::Float80 | Builtin::Float128 => None,
    }
}

fn combine(combinator: Combinator, operand: &str) -> Option<&'static str> {
    match (combinator, operand) {
        (Combinator::Unsigned, "c") => Some("Uc"),
        (Combinator::Unsigned, "s") => Some("Us"),
        (Combinator::Unsigned, "i") => Some("Ui"),
        (Combinator::Unsigned, "l") => Some("Ul"),
        (Combinator::Unsigned, "x") => Some("Ux"),
        (Combinator::Signed, "c") => Some("Sc"),
        (Combinator::Signed, "s") => Some("s"),
        (Combinator::Signed, "i") => Some("i"),
        (Combinator::Signed, "l") => Some("l"),
        (Combinator::Signed, "x") => Some("x"),
        (Combinator::Long, "i") => Some("l"),
        (Combinator::Long, "l") => Some("x"),
        (Combinator::Long, "d") => Some("r"),
        _ => None,
    }
}

fn operator_name(op: Operator) -> Option<&'static str> {
    Some(match op {
        Operator::New => "__nw",
        Operator::NewArray => "__nwa",
        Operator::Delete => "__dl",
        Operator::DeleteArray => "__dla",
        Operator::Add | Operator::Positive => "__pl",
        Operator::Sub | Operator::Negative => "__mi",
        Operator::Mul | Operator::Dereference => "__ml",
        Operator::BitAnd | Operator::AddressOf => "__ad",
        Operator::Div => "__dv",
        Operator::Rem => "__md",
        Operator::BitOr => "__or",
        Operator::BitXor => "__er",
        Operator::BitNot => "__co",
        Operator::Not => "__nt",
        Operator::Assign => "__as",
        Operator::AddAssign => "__apl",
        Operator::SubAssign => "__ami",
        Operator::MulAssign => "__amu",
        Operator::DivAssign => "__adv",
        Operator::RemAssign => "__amd",
        Operator::BitAndAssign => "__aad",
        Operator::BitOrAssign => "__aor",
        Operator::BitXorAssign => "__aer",
        Operator::Shl => "__ls",
        Operator::Shr => "__rs",
        Operator::ShlAssign => "__als",
        Operator::ShrAssign => "__ars",
        Operator::Eq => "__eq",
        Operator::Ne => "__ne",
        Operator::Lt => "__lt",
        Operator::Gt => "__gt",
        Operator::Le => "__le",
        Operator::Ge => "__ge",
        Operator::LogicalAnd => "__aa",
        Operator::LogicalOr => "__oo",
        Operator::Increment => "__pp",
        Operator::Decrement => "__mm",
        Operator::Subscript => "__vc",
        Operator::Comma => "__cm",
        Operator::ArrowStar => "__rm",
        Operator::Arrow => "__rf",
        Operator::Call => "__cl",
        Operator::Spaceship | Operator::CoAwait => return None,
    })
}
