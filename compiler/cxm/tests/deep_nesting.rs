//! Deeply nested prototypes must grow the stack, never overflow it.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use cxm::{mangle, parse_signature, Abi};
use pretty_assertions::assert_eq;

const DEPTH: usize = 2_000;

fn template_nest(depth: usize) -> String {
    format!("void f({}int{})", "A<".repeat(depth), ">".repeat(depth))
}

fn scope_chain(depth: usize) -> (String, Vec<String>) {
    let segments: Vec<String> = (0..depth).map(|i| format!("n{i}")).collect();
    (format!("void {}::f()", segments.join("::")), segments)
}

#[test]
fn itanium_template_nest() {
    let symbol = mangle(&template_nest(DEPTH), Abi::Itanium).unwrap();
    // The anchor becomes `S_` after its first occurrence.
    let expected = format!("_Z1f1AI{}i{}", "S_I".repeat(DEPTH - 1), "E".repeat(DEPTH));
    assert_eq!(symbol, expected);
}

#[test]
fn macintosh_template_nest() {
    let symbol = mangle(&template_nest(DEPTH), Abi::Macintosh).unwrap();
    let mut expected = "i".to_owned();
    for _ in 0..DEPTH {
        let text = format!("A<{expected}>");
        expected = format!("{}{text}", text.len());
    }
    assert_eq!(symbol, format!("f__F{expected}"));
}

#[test]
fn template_nest_renders() {
    let signature = parse_signature(&template_nest(DEPTH)).unwrap();
    let rendered = signature.to_string();
    assert!(rendered.starts_with("void f ( A < A < "));
    assert!(rendered.ends_with("int > > )"));
}

#[test]
fn itanium_scope_chain() {
    let (prototype, segments) = scope_chain(DEPTH);
    let symbol = mangle(&prototype, Abi::Itanium).unwrap();
    let nested: String = segments
        .iter()
        .map(|segment| format!("{}{segment}", segment.len()))
        .collect();
    assert_eq!(symbol, format!("_ZN{nested}1fEv"));
}

#[test]
fn macintosh_scope_chain() {
    let (prototype, segments) = scope_chain(DEPTH);
    let symbol = mangle(&prototype, Abi::Macintosh).unwrap();
    let qualifier: String = segments
        .iter()
        .map(|segment| format!("{}{segment}", segment.len()))
        .collect();
    assert_eq!(symbol, format!("f__Q{DEPTH}{qualifier}Fv"));
}

#[test]
fn template_nest_with_tracing_enabled() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(std::io::sink)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        for abi in Abi::ALL {
            let symbol = mangle(&template_nest(DEPTH), abi).unwrap();
            let closer = match abi {
                Abi::Itanium => "E",
                Abi::Macintosh => ">",
            };
            assert!(symbol.ends_with(&closer.repeat(DEPTH)), "{abi}");
        }
    });
}
