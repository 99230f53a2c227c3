//! Recursive Itanium encoder.
//!
//! # Substitution
//!
//! Operands of decorators, template anchors and arguments, function
//! parameters and the scope side of a nested name are encoded through
//! [`ItaniumEncoder::encode_compressed`]: if the operand's canonical rendering
//! already has a back-reference, the code is emitted instead; otherwise the
//! operand is encoded and, unless it is a (combined) builtin, registered.
//! The member side of a qualified name and the declared name itself are
//! never looked up.

use cxm_ir::{
    Builtin, Combinator, Indirection, MangleError, Node, Operator, Result, Shape, Signature,
    SpecialName,
};
use cxm_stack::ensure_sufficient_stack;

use crate::CompressionDictionary;

/// Stateful encoder for one symbol.
///
/// The dictionary lives as long as the encoder. Encode one signature per
/// encoder; [`crate::mangle`] does exactly that.
#[derive(Debug, Default)]
pub struct ItaniumEncoder {
    dictionary: CompressionDictionary,
}

impl ItaniumEncoder {
    pub fn new() -> Self {
        ItaniumEncoder {
            dictionary: CompressionDictionary::new(),
        }
    }

    /// The substitutions registered so far.
    pub fn dictionary(&self) -> &CompressionDictionary {
        &self.dictionary
    }

    /// Give up the encoder and keep its substitutions, for inspecting which
    /// sub-expressions got back-references.
    pub fn into_dictionary(self) -> CompressionDictionary {
        self.dictionary
    }

    /// Encode a whole declaration, `_Z` prefix included.
    pub fn encode_signature(&mut self, signature: &Signature) -> Result<String> {
        let mut symbol = String::with_capacity(64);
        symbol.push_str("_Z");
        match signature.shape()? {
            Shape::Special(node) => {
                symbol.push_str(&self.encode(node)?);
            }
            Shape::Variable { ty, name } => {
                // Namespace-scope const objects have internal linkage.
                if ty.is_const() {
                    symbol.push('L');
                }
                symbol.push_str(&self.encode(name)?);
            }
            Shape::Function {
                ret: Some(_),
                name,
                params,
                is_const: true,
            } => {
                let Node::Scope { scope, member } = name else {
                    return Err(MangleError::MalformedSignature(format!(
                        "'const' on {}, which is not a member function",
                        name.describe()
                    )));
                };
                symbol.push_str("NK");
                symbol.push_str(&self.encode_nested(scope, member)?);
                symbol.push('E');
                symbol.push_str(&self.encode_params(params)?);
            }
            // Constructors and destructors ignore a trailing const.
            Shape::Function { name, params, .. } => {
                symbol.push_str(&self.encode(name)?);
                symbol.push_str(&self.encode_params(params)?);
            }
        }
        Ok(symbol)
    }

    /// Encode `node` without consulting the dictionary for `node` itself.
    pub fn encode(&mut self, node: &Node) -> Result<String> {
        ensure_sufficient_stack(|| self.encode_inner(node))
    }

    fn encode_inner(&mut self, node: &Node) -> Result<String> {
        Ok(match node {
            Node::Name(text) => format!("{}{text}", text.len()),
            Node::Builtin(builtin) => builtin_code(*builtin).to_owned(),
            Node::Combined {
                combinator,
                operand,
            } => {
                let inner = self.encode(operand)?;
                combine(*combinator, &inner)
                    .ok_or_else(|| MangleError::IncompatibleCombinator {
                        combinator: combinator.spelling(),
                        operand: operand.to_string(),
                    })?
                    .to_owned()
            }
            // Constness only shows through an indirection.
            Node::Const(operand) => self.encode_compressed(operand)?,
            Node::Indirect { kind, operand } => {
                let inner = self.encode_compressed(operand)?;
                let mut out = String::with_capacity(inner.len() + 2);
                out.push(indirection_code(*kind));
                if operand.is_const() {
                    out.push('K');
                }
                out.push_str(&inner);
                out
            }
            Node::Scope { scope, member } => self.encode_scope(scope, member)?,
            Node::Template { anchor, args } => {
                let anchor_code = self.encode_compressed(anchor)?;
                let mut arg_codes = String::new();
                for arg in args {
                    arg_codes.push_str(&self.encode_compressed(arg)?);
                }
                let key = node.to_string();
                if let Some(code) = self.dictionary.get(&key) {
                    return Ok(code.to_owned());
                }
                self.dictionary.register(key);
                format!("{anchor_code}I{arg_codes}E")
            }
            Node::Function(params) => self.encode_params(params)?,
            Node::Special(special) => special_code(*special),
            Node::Operator(op) => operator_code(*op).to_owned(),
            Node::Subscript(_) => operator_code(Operator::Subscript).to_owned(),
        })
    }

    /// Emit the back-reference for `node` if there is one; otherwise encode
    /// it and make it available for later occurrences.
    pub fn encode_compressed(&mut self, node: &Node) -> Result<String> {
        let key = node.to_string();
        if let Some(code) = self.dictionary.get(&key) {
            return Ok(code.to_owned());
        }
        let code = self.encode(node)?;
        if node.is_substitutable() {
            self.dictionary.register(key);
        }
        Ok(code)
    }

    fn encode_params(&mut self, params: &[Node]) -> Result<String> {
        let mut out = String::new();
        for param in params {
            out.push_str(&self.encode_compressed(param)?);
        }
        Ok(out)
    }

    fn encode_scope(&mut self, scope: &Node, member: &Node) -> Result<String> {
        if matches!(scope, Node::Name(name) if name == "std") {
            return Ok(format!("St{}", self.encode(member)?));
        }
        // Class data names put the special prefix before the class.
        if matches!(member, Node::Special(special) if special.is_class_data()) {
            let prefix = self.encode(member)?;
            return Ok(prefix + &self.encode(scope)?);
        }
        Ok(format!("N{}E", self.encode_nested(scope, member)?))
    }

    /// The inside of an `N...E` nested name.
    fn encode_nested(&mut self, scope: &Node, member: &Node) -> Result<String> {
        ensure_sufficient_stack(|| {
            let key = scope.to_string();
            if let Some(code) = self.dictionary.get(&key) {
                let prefix = code.to_owned();
                return Ok(prefix + &self.encode(member)?);
            }
            let prefix = match scope {
                Node::Scope {
                    scope: outer,
                    member: inner,
                } => self.encode_nested(outer, inner)?,
                other => self.encode(other)?,
            };
            if scope.is_substitutable() {
                self.dictionary.register(key);
            }
            Ok(prefix + &self.encode(member)?)
        })
    }
}

fn builtin_code(builtin: Builtin) -> &'static str {
    match builtin {
        Builtin::Void => "v",
        Builtin::Bool => "b",
        Builtin::Char => "c",
        Builtin::Short => "s",
        Builtin::Int => "i",
        Builtin::Int64 => "x",
        Builtin::Int128 => "n",
        Builtin::Float => "f",
        Builtin::Double => "d",
        Builtin::Float80 => "e",
        Builtin::Float128 => "g",
        Builtin::Ellipsis => "z",
    }
}

/// Apply a combinator to the code of its operand.
fn combine(combinator: Combinator, operand: &str) -> Option<&'static str> {
    match (combinator, operand) {
        (Combinator::Unsigned, "c") => Some("h"),
        (Combinator::Unsigned, "s") => Some("t"),
        (Combinator::Unsigned, "i") => Some("j"),
        (Combinator::Unsigned, "l") => Some("m"),
        (Combinator::Unsigned, "x") => Some("y"),
        (Combinator::Unsigned, "n") => Some("o"),
        (Combinator::Signed, "c") => Some("a"),
        (Combinator::Signed, "s") => Some("s"),
        (Combinator::Signed, "i") => Some("i"),
        (Combinator::Signed, "l") => Some("l"),
        (Combinator::Signed, "x") => Some("x"),
        (Combinator::Signed, "n") => Some("n"),
        (Combinator::Long, "i") => Some("l"),
        (Combinator::Long, "l") => Some("x"),
        (Combinator::Long, "d") => Some("e"),
        _ => None,
    }
}

fn indirection_code(kind: Indirection) -> char {
    match kind {
        Indirection::Pointer => 'P',
        Indirection::Reference => 'R',
        Indirection::RvalueReference => 'O',
    }
}

fn special_code(special: SpecialName) -> String {
    match special {
        SpecialName::Constructor(variant) => format!("C{}", variant.number()),
        SpecialName::Destructor(variant) => format!("D{}", variant.number()),
        SpecialName::VTable => "TV".to_owned(),
        SpecialName::Rtti => "TI".to_owned(),
        SpecialName::VttStructure => "TT".to_owned(),
        SpecialName::RttiName => "TS".to_owned(),
    }
}

/// Two-letter `<operator-name>` codes.
fn operator_code(op: Operator) -> &'static str {
    match op {
        Operator::New => "nw",
        Operator::NewArray => "na",
        Operator::Delete => "dl",
        Operator::DeleteArray => "da",
        Operator::CoAwait => "aw",
        Operator::Positive => "ps",
        Operator::Negative => "ng",
        Operator::AddressOf => "ad",
        Operator::Dereference => "de",
        Operator::BitNot => "co",
        Operator::Add => "pl",
        Operator::Sub => "mi",
        Operator::Mul => "ml",
        Operator::Div => "dv",
        Operator::Rem => "rm",
        Operator::BitAnd => "an",
        Operator::BitOr => "or",
        Operator::BitXor => "eo",
        Operator::Assign => "aS",
        Operator::AddAssign => "pL",
        Operator::SubAssign => "mI",
        Operator::MulAssign => "mL",
        Operator::DivAssign => "dV",
        Operator::RemAssign => "rM",
        Operator::BitAndAssign => "aN",
        Operator::BitOrAssign => "oR",
        Operator::BitXorAssign => "eO",
        Operator::Shl => "ls",
        Operator::Shr => "rs",
        Operator::ShlAssign => "lS",
        Operator::ShrAssign => "rS",
        Operator::Eq => "eq",
        Operator::Ne => "ne",
        Operator::Lt => "lt",
        Operator::Gt => "gt",
        Operator::Le => "le",
        Operator::Ge => "ge",
        Operator::Spaceship => "ss",
        Operator::Not => "nt",
        Operator::LogicalAnd => "aa",
        Operator::LogicalOr => "oo",
        Operator::Increment => "pp",
        Operator::Decrement => "mm",
        Operator::Subscript => "ix",
        Operator::Comma => "cm",
        Operator::ArrowStar => "pm",
        Operator::Arrow => "pt",
        Operator::Call => "cl",
    }
}
