use super::*;
use cxm_ir::{Builtin, Combinator, CtorVariant, Indirection, Node, Operator, SpecialName};
use pretty_assertions::assert_eq;

fn nodes(prototype: &str) -> Vec<Node> {
    parse_signature(prototype).unwrap().nodes().to_vec()
}

fn void_args() -> Node {
    Node::Function(vec![Node::Builtin(Builtin::Void)])
}

#[test]
fn free_function() {
    assert_eq!(
        nodes("void foo()"),
        vec![Node::Builtin(Builtin::Void), Node::name("foo"), void_args()]
    );
}

#[test]
fn const_global_pointer() {
    assert_eq!(
        nodes("int* const bar"),
        vec![
            Node::constant(Node::indirect(
                Indirection::Pointer,
                Node::Builtin(Builtin::Int),
            )),
            Node::name("bar"),
        ]
    );
}

#[test]
fn east_and_west_const_agree() {
    assert_eq!(nodes("void f(const int *)"), nodes("void f(int const *)"));
}

#[test]
fn constructor() {
    assert_eq!(
        nodes("ClassA::$$ctor()"),
        vec![
            Node::scope(
                Node::name("ClassA"),
                Node::Special(SpecialName::Constructor(CtorVariant::Complete)),
            ),
            void_args(),
        ]
    );
}

#[test]
fn templated_scope() {
    assert_eq!(
        nodes("void A<int>::foo(A<int>)"),
        vec![
            Node::Builtin(Builtin::Void),
            Node::scope(
                Node::template(Node::name("A"), vec![Node::Builtin(Builtin::Int)]),
                Node::name("foo"),
            ),
            Node::Function(vec![Node::template(
                Node::name("A"),
                vec![Node::Builtin(Builtin::Int)],
            )]),
        ]
    );
}

#[test]
fn operator_new() {
    assert_eq!(
        nodes("void* operator new(unsigned int)"),
        vec![
            Node::indirect(Indirection::Pointer, Node::Builtin(Builtin::Void)),
            Node::Operator(Operator::New),
            Node::Function(vec![Node::combined(
                Combinator::Unsigned,
                Node::Builtin(Builtin::Int),
            )]),
        ]
    );
}

#[test]
fn scoped_subscript_operator() {
    assert_eq!(
        nodes("int& Vec::operator[](int)"),
        vec![
            Node::indirect(Indirection::Reference, Node::Builtin(Builtin::Int)),
            Node::scope(Node::name("Vec"), Node::Operator(Operator::Subscript)),
            Node::Function(vec![Node::Builtin(Builtin::Int)]),
        ]
    );
}

#[test]
fn unary_marker_on_scoped_operator() {
    assert_eq!(
        nodes("Vec Vec::operator- $$unary ()")[1],
        Node::scope(Node::name("Vec"), Node::Operator(Operator::Negative))
    );
}

#[test]
fn whitespace_is_insignificant() {
    assert_eq!(
        nodes("  void\ta :: foo ( int ,char )  "),
        nodes("void a::foo(int,char)")
    );
}

#[test]
fn trailing_closer_is_rejected() {
    assert_eq!(
        parse_signature("void foo())"),
        Err(MangleError::UnexpectedCloser(')'))
    );
    assert_eq!(
        parse_signature("int bar,"),
        Err(MangleError::UnexpectedCloser(','))
    );
}

#[test]
fn errors_propagate_from_lists() {
    assert_eq!(
        parse_signature("void foo(int const & const)"),
        Err(MangleError::ConstReference)
    );
    assert_eq!(
        parse_signature("void foo(A<>)"),
        Err(MangleError::EmptyTemplateArgs)
    );
    assert_eq!(
        parse_signature("void foo(int"),
        Err(MangleError::Unterminated(')'))
    );
}

#[test]
fn deeply_nested_templates_parse() {
    let depth = 2_000;
    let prototype = format!("void f({}int{})", "A<".repeat(depth), ">".repeat(depth));
    let sig = parse_signature(&prototype).unwrap();
    assert_eq!(sig.len(), 3);
}
