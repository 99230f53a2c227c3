//! Resolution passes: flat token sequence to declaration trees.
//!
//! Four passes run in a fixed order, one precedence level each. Each pass
//! consumes its input sequence and builds a new one on an output stack;
//! nodes are never mutated in place.
//!
//! 1. [`bind_postfix`]: `<...>` and `operator[]` claim their left neighbor.
//! 2. [`bind_scopes`]: `::` claims both neighbors; `$$unary` rewrites the
//!    operator before it.
//! 3. [`bind_combinators`]: `unsigned`, `signed`, `long` claim their right
//!    neighbor, scanned right to left so chains compose.
//! 4. [`bind_indirections`]: `*`, `&`, `&&` claim their left neighbor;
//!    `const` claims its left neighbor, or its right one when nothing
//!    precedes it.
//!
//! Reordering the passes changes which operand a decorator attaches to.

use cxm_ir::{Builtin, MangleError, Node, Operator, Result};

use crate::lexer::Token;

/// Run all four passes.
pub(crate) fn resolve(tokens: Vec<Token>) -> Result<Vec<Node>> {
    let tokens = bind_postfix(tokens)?;
    let tokens = bind_scopes(tokens)?;
    let tokens = bind_combinators(tokens);
    bind_indirections(tokens)
}

/// Pop the top of `stack` if it is a finished node.
fn pop_node(stack: &mut Vec<Token>) -> Option<Node> {
    match stack.pop() {
        Some(Token::Node(node)) => Some(node),
        Some(other) => {
            stack.push(other);
            None
        }
        None => None,
    }
}

/// Pass 1: template argument lists and `operator[]`.
///
/// `operator[]` only claims a finished node; after a `::` it stays an
/// ordinary operator name for the scope pass to pick up as a member.
pub(crate) fn bind_postfix(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token {
            Token::Template(args) => {
                let Some(anchor) = pop_node(&mut out) else {
                    return Err(MangleError::MissingOperand("<...>"));
                };
                out.push(Token::Node(Node::template(anchor, args)));
            }
            Token::Node(Node::Operator(Operator::Subscript))
                if matches!(out.last(), Some(Token::Node(_))) =>
            {
                if let Some(lhand) = pop_node(&mut out) {
                    out.push(Token::Node(Node::Subscript(Box::new(lhand))));
                }
            }
            other => out.push(other),
        }
    }
    tracing::trace!(tokens = out.len(), "postfix bound");
    Ok(out)
}

/// Pass 2: `::` and `$$unary`.
pub(crate) fn bind_scopes(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut input = tokens.into_iter();
    while let Some(token) = input.next() {
        match token {
            Token::Scope => {
                let Some(scope) = pop_node(&mut out) else {
                    return Err(MangleError::MissingOperand("::"));
                };
                let Some(Token::Node(member)) = input.next() else {
                    return Err(MangleError::MissingOperand("::"));
                };
                out.push(Token::Node(Node::scope(scope, member)));
            }
            Token::Unary => {
                let Some(target) = pop_node(&mut out) else {
                    return Err(MangleError::MissingOperand("$$unary"));
                };
                out.push(Token::Node(make_unary(target)?));
            }
            other => out.push(other),
        }
    }
    tracing::trace!(tokens = out.len(), "scopes bound");
    Ok(out)
}

/// Rewrite `operator+` and friends into their unary form, also when the
/// operator is the member of a qualified name (`Vec::operator-`).
fn make_unary(node: Node) -> Result<Node> {
    match node {
        Node::Operator(op) => op
            .to_unary()
            .map(Node::Operator)
            .ok_or_else(|| not_unary(op)),
        Node::Scope { scope, member } => match *member {
            Node::Operator(op) => match op.to_unary() {
                Some(unary) => Ok(Node::Scope {
                    scope,
                    member: Box::new(Node::Operator(unary)),
                }),
                None => Err(not_unary(op)),
            },
            member => Err(MangleError::MisplacedUnary(member.describe())),
        },
        other => Err(MangleError::MisplacedUnary(other.describe())),
    }
}

fn not_unary(op: Operator) -> MangleError {
    MangleError::MisplacedUnary(Node::Operator(op).describe())
}

/// Pass 3: `unsigned`, `signed`, `long`, right to left.
///
/// A combinator claims a builtin (or an already combined builtin) on its
/// right. With anything else there, it stands for `int`.
pub(crate) fn bind_combinators(tokens: Vec<Token>) -> Vec<Token> {
    let mut reversed = Vec::with_capacity(tokens.len());
    for token in tokens.into_iter().rev() {
        match token {
            Token::Combinator(combinator) => {
                let claims = matches!(reversed.last(), Some(Token::Node(n)) if n.is_fundamental());
                let operand = if claims {
                    pop_node(&mut reversed)
                } else {
                    None
                };
                let operand = operand.unwrap_or(Node::Builtin(Builtin::Int));
                reversed.push(Token::Node(Node::combined(combinator, operand)));
            }
            other => reversed.push(other),
        }
    }
    reversed.reverse();
    tracing::trace!(tokens = reversed.len(), "combinators bound");
    reversed
}

/// Pass 4: indirections and `const`, left to right.
pub(crate) fn bind_indirections(tokens: Vec<Token>) -> Result<Vec<Node>> {
    let mut out: Vec<Node> = Vec::with_capacity(tokens.len());
    let mut input = tokens.into_iter();
    while let Some(token) = input.next() {
        match token {
            Token::Node(node) => out.push(node),
            Token::Indirection(kind) => {
                let Some(operand) = out.pop() else {
                    return Err(MangleError::MissingOperand(kind.symbol()));
                };
                out.push(Node::indirect(kind, operand));
            }
            Token::Const => {
                let operand = match out.pop() {
                    Some(node) => node,
                    // West const with nothing before it.
                    None => match input.next() {
                        Some(Token::Node(node)) => node,
                        Some(Token::Const) => return Err(MangleError::DuplicateConst),
                        _ => return Err(MangleError::MissingOperand("const")),
                    },
                };
                if operand.is_reference() {
                    return Err(MangleError::ConstReference);
                }
                if operand.is_const() {
                    return Err(MangleError::DuplicateConst);
                }
                out.push(Node::constant(operand));
            }
            other => return Err(MangleError::MissingOperand(other.symbol())),
        }
    }
    tracing::trace!(nodes = out.len(), "indirections bound");
    Ok(out)
}
