//! Overloadable operator names.

use std::fmt;

/// An `operator` function name.
///
/// The four unary forms (`Positive`, `Negative`, `AddressOf`, `Dereference`)
/// share their spelling with a binary operator and only arise from a
/// `$$unary` marker in the prototype; see [`Operator::to_unary`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    New,
    NewArray,
    Delete,
    DeleteArray,
    CoAwait,

    // Unary forms
    Positive,
    Negative,
    AddressOf,
    Dereference,

    // Arithmetic and bitwise
    BitNot,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,

    // Assignment
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,

    // Shifts
    Shl,
    Shr,
    ShlAssign,
    ShrAssign,

    // Comparison
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Spaceship,

    // Logical
    Not,
    LogicalAnd,
    LogicalOr,

    Increment,
    Decrement,
    Subscript,
    Comma,
    ArrowStar,
    Arrow,
    Call,
}

impl Operator {
    /// The text after `operator ` in the canonical rendering.
    pub const fn spelling(self) -> &'static str {
        match self {
            Operator::New => "new",
            Operator::NewArray => "new[]",
            Operator::Delete => "delete",
            Operator::DeleteArray => "delete[]",
            Operator::CoAwait => "co_await",
            Operator::Positive => "+ (unary)",
            Operator::Negative => "- (unary)",
            Operator::AddressOf => "& (unary)",
            Operator::Dereference => "* (unary)",
            Operator::BitNot => "~",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
            Operator::BitAnd => "&",
            Operator::BitOr => "|",
            Operator::BitXor => "^",
            Operator::Assign => "=",
            Operator::AddAssign => "+=",
            Operator::SubAssign => "-=",
            Operator::MulAssign => "*=",
            Operator::DivAssign => "/=",
            Operator::RemAssign => "%=",
            Operator::BitAndAssign => "&=",
            Operator::BitOrAssign => "|=",
            Operator::BitXorAssign => "^=",
            Operator::Shl => "<<",
            Operator::Shr => ">>",
            Operator::ShlAssign => "<<=",
            Operator::ShrAssign => ">>=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Spaceship => "<=>",
            Operator::Not => "!",
            Operator::LogicalAnd => "&&",
            Operator::LogicalOr => "||",
            Operator::Increment => "++",
            Operator::Decrement => "--",
            Operator::Subscript => "[]",
            Operator::Comma => ",",
            Operator::ArrowStar => "->*",
            Operator::Arrow => "->",
            Operator::Call => "()",
        }
    }

    /// The unary variant of `+`, `-`, `&` and `*`; `None` for everything else.
    pub const fn to_unary(self) -> Option<Operator> {
        match self {
            Operator::Add => Some(Operator::Positive),
            Operator::Sub => Some(Operator::Negative),
            Operator::BitAnd => Some(Operator::AddressOf),
            Operator::Mul => Some(Operator::Dereference),
            _ => None,
        }
    }

}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operator {}", self.spelling())
    }
}
