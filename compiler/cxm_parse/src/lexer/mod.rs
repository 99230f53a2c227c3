//! Tokenizer: prototype text to a flat token sequence.
//!
//! Leaf words are classified as soon as they are read (builtins, keywords,
//! `$$` pseudo-tokens, operator names), and bracketed argument lists are
//! parsed recursively into finished nodes, so the token stream handed to
//! the resolution passes is already free of brackets.

use cxm_cursor::{is_ident_char, CharCursor};
use cxm_ir::{
    Builtin, Combinator, Indirection, MangleError, Node, Operator, Result, SpecialName,
};
use cxm_stack::ensure_sufficient_stack;

/// An element of the flat sequence before resolution.
///
/// Only [`Token::Node`] survives resolution; every other variant is a
/// binding instruction that the passes consume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    Node(Node),
    /// `< args >`, waiting for its anchor on the left.
    Template(Vec<Node>),
    /// `::`
    Scope,
    /// `$$unary`
    Unary,
    Const,
    Combinator(Combinator),
    Indirection(Indirection),
}

impl Token {
    /// Source spelling, for error messages.
    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            Token::Node(_) => "name",
            Token::Template(_) => "<...>",
            Token::Scope => "::",
            Token::Unary => "$$unary",
            Token::Const => "const",
            Token::Combinator(c) => c.spelling(),
            Token::Indirection(kind) => kind.symbol(),
        }
    }
}

/// Symbolic operator spellings, longest first so that `<<=` wins over `<<`
/// and `<`.
const SYMBOLIC_OPERATORS: [(&str, Operator); 39] = [
    ("<<=", Operator::ShlAssign),
    (">>=", Operator::ShrAssign),
    ("<=>", Operator::Spaceship),
    ("->*", Operator::ArrowStar),
    ("+=", Operator::AddAssign),
    ("-=", Operator::SubAssign),
    ("*=", Operator::MulAssign),
    ("/=", Operator::DivAssign),
    ("%=", Operator::RemAssign),
    ("&=", Operator::BitAndAssign),
    ("|=", Operator::BitOrAssign),
    ("^=", Operator::BitXorAssign),
    ("<<", Operator::Shl),
    (">>", Operator::Shr),
    ("==", Operator::Eq),
    ("!=", Operator::Ne),
    ("<=", Operator::Le),
    (">=", Operator::Ge),
    ("&&", Operator::LogicalAnd),
    ("||", Operator::LogicalOr),
    ("++", Operator::Increment),
    ("--", Operator::Decrement),
    ("[]", Operator::Subscript),
    ("->", Operator::Arrow),
    ("()", Operator::Call),
    ("~", Operator::BitNot),
    ("+", Operator::Add),
    ("-", Operator::Sub),
    ("*", Operator::Mul),
    ("/", Operator::Div),
    ("%", Operator::Rem),
    ("&", Operator::BitAnd),
    ("|", Operator::BitOr),
    ("^", Operator::BitXor),
    ("=", Operator::Assign),
    ("<", Operator::Lt),
    (">", Operator::Gt),
    ("!", Operator::Not),
    (",", Operator::Comma),
];

/// Read tokens until the input ends or a list closer (`)`, `>`, `,`) is
/// reached. The closer is left in the cursor for the caller.
pub(crate) fn tokenize(cursor: &mut CharCursor) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    loop {
        cursor.skip_whitespace();
        let Some(c) = cursor.peek() else {
            break;
        };

        if cursor.eat("*") {
            tokens.push(Token::Indirection(Indirection::Pointer));
            continue;
        }
        if cursor.eat("&&") {
            tokens.push(Token::Indirection(Indirection::RvalueReference));
            continue;
        }
        if cursor.eat("&") {
            tokens.push(Token::Indirection(Indirection::Reference));
            continue;
        }
        if cursor.eat("::") {
            tokens.push(Token::Scope);
            continue;
        }
        if cursor.eat("...") {
            tokens.push(Token::Node(Node::Builtin(Builtin::Ellipsis)));
            continue;
        }

        match c {
            '(' => {
                cursor.pop();
                tokens.push(Token::Node(Node::Function(function_args(cursor)?)));
                continue;
            }
            '<' => {
                cursor.pop();
                tokens.push(Token::Template(template_args(cursor)?));
                continue;
            }
            ')' | '>' | ',' => break,
            _ => {}
        }

        let word = cursor.eat_while(is_ident_char);
        if word.is_empty() {
            return Err(MangleError::UnexpectedChar(c));
        }
        tokens.push(classify(word, cursor)?);
    }
    Ok(tokens)
}

/// Turn a scanned word into a token, reading the rest of an operator name
/// when the word is `operator`.
fn classify(word: String, cursor: &mut CharCursor) -> Result<Token> {
    if word == "const" {
        return Ok(Token::Const);
    }
    if let Some(combinator) = Combinator::from_keyword(&word) {
        return Ok(Token::Combinator(combinator));
    }
    if let Some(builtin) = Builtin::from_keyword(&word) {
        return Ok(Token::Node(Node::Builtin(builtin)));
    }
    if word == "$$unary" {
        return Ok(Token::Unary);
    }
    if let Some(special) = SpecialName::from_token(&word) {
        return Ok(Token::Node(Node::Special(special)));
    }
    if word.starts_with("$$") {
        return Err(MangleError::UnknownSpecialToken(word));
    }
    if word == "operator" {
        return operator_name(cursor).map(|op| Token::Node(Node::Operator(op)));
    }
    Ok(Token::Node(Node::Name(word)))
}

/// Scan the operator following the `operator` keyword.
fn operator_name(cursor: &mut CharCursor) -> Result<Operator> {
    cursor.skip_whitespace();
    for (spelling, op) in SYMBOLIC_OPERATORS {
        if cursor.eat(spelling) {
            return Ok(op);
        }
    }

    let word = cursor.eat_while(is_ident_char);
    match word.as_str() {
        "new" | "delete" => {
            cursor.skip_whitespace();
            let array = cursor.eat("[]");
            Ok(match (word.as_str(), array) {
                ("new", false) => Operator::New,
                ("new", true) => Operator::NewArray,
                (_, false) => Operator::Delete,
                (_, true) => Operator::DeleteArray,
            })
        }
        "co_await" => Ok(Operator::CoAwait),
        "" => Err(MangleError::UnknownOperator(
            cursor.peek().map(String::from).unwrap_or_default(),
        )),
        _ => Err(MangleError::UnknownOperator(word)),
    }
}

/// Body of `( ... )` after the opening parenthesis. `()` means `(void)`.
fn function_args(cursor: &mut CharCursor) -> Result<Vec<Node>> {
    let mut args = argument_list(cursor, ')')?;
    if args.is_empty() {
        args.push(Node::Builtin(Builtin::Void));
    }
    Ok(args)
}

/// Body of `< ... >` after the opening angle bracket.
fn template_args(cursor: &mut CharCursor) -> Result<Vec<Node>> {
    let args = argument_list(cursor, '>')?;
    if args.is_empty() {
        return Err(MangleError::EmptyTemplateArgs);
    }
    Ok(args)
}

/// Comma-separated arguments up to and including `close`.
fn argument_list(cursor: &mut CharCursor, close: char) -> Result<Vec<Node>> {
    let mut args = Vec::new();
    loop {
        let arg = argument(cursor)?;
        cursor.skip_whitespace();
        match cursor.pop() {
            None => return Err(MangleError::Unterminated(close)),
            Some(',') => args.push(arg.ok_or(MangleError::EmptyArgument)?),
            Some(c) if c == close => {
                match arg {
                    Some(arg) => args.push(arg),
                    None if !args.is_empty() => return Err(MangleError::EmptyArgument),
                    None => {}
                }
                return Ok(args);
            }
            Some(c) => return Err(MangleError::UnexpectedCloser(c)),
        }
    }
}

/// One argument: a nested prototype of which only the type is kept, so a
/// parameter name (`int count`) is accepted and dropped. `None` when the
/// argument is empty.
fn argument(cursor: &mut CharCursor) -> Result<Option<Node>> {
    ensure_sufficient_stack(|| {
        let tokens = tokenize(cursor)?;
        let nodes = crate::resolve::resolve(tokens)?;
        Ok(nodes.into_iter().next())
    })
}
