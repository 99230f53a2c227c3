//! Property-based tests for the mangler.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use cxm::{mangle, mangle_all, Abi};
use proptest::prelude::*;

const KEYWORDS: &[&str] = &[
    "const",
    "unsigned",
    "signed",
    "long",
    "void",
    "bool",
    "char",
    "short",
    "int",
    "__int64",
    "__int128",
    "float",
    "double",
    "__float80",
    "__float128",
    "operator",
];

fn identifier() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,15}")
        .expect("valid regex")
        .prop_filter("not a keyword", |s| !KEYWORDS.contains(&s.as_str()))
}

fn param_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("int".to_string()),
        Just("unsigned char".to_string()),
        Just("double".to_string()),
        Just("const char *".to_string()),
        Just("void *".to_string()),
        identifier(),
        identifier().prop_map(|name| format!("{name} const &")),
    ]
}

fn free_function() -> impl Strategy<Value = (String, String)> {
    (identifier(), prop::collection::vec(param_type(), 0..5)).prop_map(|(name, params)| {
        let prototype = format!("void {name}({})", params.join(", "));
        (name, prototype)
    })
}

fn abi() -> impl Strategy<Value = Abi> {
    prop_oneof![Just(Abi::Itanium), Just(Abi::Macintosh)]
}

proptest! {
    #[test]
    fn mangling_is_deterministic((_, prototype) in free_function(), abi in abi()) {
        let first = mangle(&prototype, abi).unwrap();
        let second = mangle(&prototype, abi).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn batch_matches_single(
        functions in prop::collection::vec(free_function(), 1..16),
        abi in abi(),
    ) {
        let prototypes: Vec<String> = functions.into_iter().map(|(_, p)| p).collect();
        let batch = mangle_all(&prototypes, abi);
        for (prototype, result) in prototypes.iter().zip(batch) {
            prop_assert_eq!(result, mangle(prototype, abi));
        }
    }

    #[test]
    fn itanium_free_function_prefix((name, prototype) in free_function()) {
        let symbol = mangle(&prototype, Abi::Itanium).unwrap();
        let prefix = format!("_Z{}{}", name.len(), name);
        prop_assert!(symbol.starts_with(&prefix), "{} -> {}", prototype, symbol);
    }

    #[test]
    fn macintosh_free_function_prefix((name, prototype) in free_function()) {
        let symbol = mangle(&prototype, Abi::Macintosh).unwrap();
        let prefix = format!("{name}__F");
        prop_assert!(symbol.starts_with(&prefix), "{} -> {}", prototype, symbol);
    }
}
