use super::*;
use crate::{Builtin, CtorVariant, SpecialName};
use pretty_assertions::assert_eq;

fn void() -> Node {
    Node::Builtin(Builtin::Void)
}

#[test]
fn single_node_is_special() {
    let vtable = Node::scope(Node::name("A"), Node::Special(SpecialName::VTable));
    let sig = Signature::new([vtable.clone()]);
    assert_eq!(sig.shape(), Ok(Shape::Special(&vtable)));
}

#[test]
fn two_nodes_with_arguments_is_returnless_function() {
    let ctor = Node::scope(
        Node::name("A"),
        Node::Special(SpecialName::Constructor(CtorVariant::Complete)),
    );
    let sig = Signature::new([ctor.clone(), Node::Function(vec![void()])]);
    assert_eq!(
        sig.shape(),
        Ok(Shape::Function {
            ret: None,
            name: &ctor,
            params: &[void()],
            is_const: false,
        })
    );
}

#[test]
fn two_nodes_without_arguments_is_variable() {
    let ty = Node::constant(Node::Builtin(Builtin::Int));
    let name = Node::name("bar");
    let sig = Signature::new([ty.clone(), name.clone()]);
    let expected = Shape::Variable {
        ty: &ty,
        name: &name,
    };
    assert_eq!(sig.shape(), Ok(expected));
}

#[test]
fn three_nodes_is_function() {
    let name = Node::scope(Node::name("S"), Node::name("get"));
    let sig = Signature::new([
        void(),
        name.clone(),
        Node::constant(Node::Function(vec![void()])),
    ]);
    assert_eq!(
        sig.shape(),
        Ok(Shape::Function {
            ret: Some(&void()),
            name: &name,
            params: &[void()],
            is_const: true,
        })
    );
}

#[test]
fn three_nodes_without_arguments_is_malformed() {
    let sig = Signature::new([void(), Node::name("a"), Node::name("b")]);
    assert!(matches!(
        sig.shape(),
        Err(MangleError::MalformedSignature(_))
    ));
}

#[test]
fn too_many_nodes_is_malformed() {
    let sig = Signature::new(std::iter::repeat(void()).take(4));
    assert_eq!(sig.len(), 4);
    let Err(MangleError::MalformedSignature(message)) = sig.shape() else {
        panic!("expected a malformed signature");
    };
    assert!(message.starts_with("too much stuff"));
}

#[test]
fn empty_is_malformed() {
    let sig = Signature::new([]);
    assert!(sig.is_empty());
    assert_eq!(
        sig.shape(),
        Err(MangleError::MalformedSignature("empty prototype".into()))
    );
}

#[test]
fn display_joins_nodes() {
    let sig = Signature::new([
        Node::indirect(crate::Indirection::Pointer, void()),
        Node::name("foo"),
        Node::Function(vec![void()]),
    ]);
    assert_eq!(sig.to_string(), "void * foo ( void )");
    assert_eq!(sig.nodes().len(), 3);
}
