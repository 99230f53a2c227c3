use super::*;
use pretty_assertions::assert_eq;

fn int() -> Node {
    Node::Builtin(Builtin::Int)
}

// === Canonical rendering ===

#[test]
fn renders_decorated_types() {
    let node = Node::indirect(
        Indirection::Pointer,
        Node::constant(Node::indirect(Indirection::Pointer, Node::constant(int()))),
    );
    assert_eq!(node.to_string(), "int const * const *");

    let node = Node::combined(
        Combinator::Unsigned,
        Node::combined(Combinator::Long, int()),
    );
    assert_eq!(node.to_string(), "unsigned long int");
}

#[test]
fn renders_scopes_and_templates() {
    let node = Node::scope(
        Node::name("std"),
        Node::template(
            Node::name("basic_string"),
            vec![
                Node::Builtin(Builtin::Char),
                Node::scope(
                    Node::name("std"),
                    Node::template(
                        Node::name("char_traits"),
                        vec![Node::Builtin(Builtin::Char)],
                    ),
                ),
            ],
        ),
    );
    assert_eq!(
        node.to_string(),
        "std :: basic_string < char, std :: char_traits < char > >"
    );
}

#[test]
fn renders_argument_lists() {
    let node = Node::Function(vec![int(), Node::Builtin(Builtin::Ellipsis)]);
    assert_eq!(node.to_string(), "( int, ... )");
    assert_eq!(
        Node::constant(Node::Function(vec![Node::Builtin(Builtin::Void)])).to_string(),
        "( void ) const"
    );
}

#[test]
fn renders_special_names_and_operators() {
    assert_eq!(
        Node::Special(SpecialName::Constructor(CtorVariant::Complete)).to_string(),
        "$$ctor1"
    );
    assert_eq!(
        Node::Special(SpecialName::Destructor(DtorVariant::Deleting)).to_string(),
        "$$dtor0"
    );
    assert_eq!(
        Node::Operator(Operator::RemAssign).to_string(),
        "operator %="
    );
    assert_eq!(
        Node::Operator(Operator::Negative).to_string(),
        "operator - (unary)"
    );
    assert_eq!(
        Node::Subscript(Box::new(Node::name("Vec"))).to_string(),
        "operator []"
    );
}

// === Keyword tables ===

#[test]
fn keyword_lookups() {
    assert_eq!(Builtin::from_keyword("__float128"), Some(Builtin::Float128));
    assert_eq!(Builtin::from_keyword("Int"), None);
    assert_eq!(Combinator::from_keyword("long"), Some(Combinator::Long));
    assert_eq!(Combinator::from_keyword("const"), None);
    assert_eq!(
        SpecialName::from_token("$$ctor"),
        SpecialName::from_token("$$ctor1")
    );
    assert_eq!(
        SpecialName::from_token("$$dtor"),
        Some(SpecialName::Destructor(DtorVariant::Complete))
    );
    assert_eq!(SpecialName::from_token("$$unary"), None);
    assert_eq!(SpecialName::from_token("$$ctor4"), None);
}

#[test]
fn class_data_special_names() {
    assert!(SpecialName::VTable.is_class_data());
    assert!(SpecialName::RttiName.is_class_data());
    assert!(!SpecialName::Constructor(CtorVariant::Base).is_class_data());
    assert!(!SpecialName::Destructor(DtorVariant::Base).is_class_data());
}

#[test]
fn unary_rewrites() {
    assert_eq!(Operator::Add.to_unary(), Some(Operator::Positive));
    assert_eq!(Operator::Sub.to_unary(), Some(Operator::Negative));
    assert_eq!(Operator::BitAnd.to_unary(), Some(Operator::AddressOf));
    assert_eq!(Operator::Mul.to_unary(), Some(Operator::Dereference));
    assert_eq!(Operator::Div.to_unary(), None);
    assert_eq!(Operator::Positive.to_unary(), None);
}

#[test]
fn renders_deep_template_nest() {
    let depth = 2_000;
    let mut node = int();
    for _ in 0..depth {
        node = Node::template(Node::name("A"), vec![node]);
    }
    let rendered = node.to_string();
    assert_eq!(rendered.len(), "int".len() + depth * "A <  >".len());
    assert!(rendered.starts_with("A < A < "));
    assert!(rendered.ends_with("int > >"));
}

// === Predicates ===

#[test]
fn substitutability() {
    assert!(!int().is_substitutable());
    assert!(
        !Node::combined(Combinator::Signed, Node::Builtin(Builtin::Char)).is_substitutable()
    );
    assert!(Node::constant(int()).is_substitutable());
    assert!(Node::name("A").is_substitutable());
    assert!(
        Node::indirect(Indirection::Pointer, int()).is_substitutable()
    );
}

#[test]
fn function_view_looks_through_const() {
    let params = vec![Node::Builtin(Builtin::Void)];
    let plain = Node::Function(params.clone());
    let qualified = Node::constant(Node::Function(params.clone()));

    assert_eq!(plain.as_function(), Some((params.as_slice(), false)));
    assert_eq!(qualified.as_function(), Some((params.as_slice(), true)));
    assert_eq!(Node::constant(int()).as_function(), None);
    assert_eq!(int().as_function(), None);
}

#[test]
fn reference_predicate() {
    assert!(Node::indirect(Indirection::Reference, int()).is_reference());
    assert!(
        Node::indirect(Indirection::RvalueReference, int()).is_reference()
    );
    assert!(!Node::indirect(Indirection::Pointer, int()).is_reference());
    assert!(!int().is_reference());
}
