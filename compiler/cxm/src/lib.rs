//! C++ prototype to linker symbol mangler.
//!
//! Converts a declaration such as `"void a::S::foo() const"` into the
//! symbol a C++ compiler would emit for it, so linker scripts can bind
//! addresses to C++ entities without compiling anything:
//!
//! ```ignore
//! use cxm::{mangle, Abi};
//!
//! assert_eq!(mangle("void a::S::foo()", Abi::Itanium)?, "_ZN1a1S3fooEv");
//! assert_eq!(mangle("void foo()", Abi::Macintosh)?, "foo__Fv");
//! ```
//!
//! # Pipeline
//!
//! ```text
//! &str ──parse_signature──▶ Signature ──cxm_itanium::mangle───▶ String
//!                                     └─cxm_macintosh::mangle─▶ String
//! ```
//!
//! Every call parses afresh and, for Itanium, encodes with its own
//! substitution dictionary, so independent prototypes can be mangled on
//! any number of threads ([`mangle_all`]).
//!
//! # Prototype syntax
//!
//! A whitespace-tolerant subset of C++ declarations: builtins and
//! `unsigned`/`signed`/`long`/`const` decorators, `::` qualified names,
//! `<...>` template arguments, `(...)` parameter lists, `*`/`&`/`&&`, and
//! `operator` names. Compiler-generated entities are written with
//! pseudo-tokens in place of a name:
//!
//! | Token | Entity |
//! |-------|--------|
//! | `$$ctor`, `$$ctor1`..`$$ctor3` | constructor variants |
//! | `$$dtor`, `$$dtor0`..`$$dtor2` | destructor variants |
//! | `$$vtable`, `$$rtti` | virtual table, type info |
//! | `$$vtt_structure`, `$$rtti_name` | VTT, type info name |
//! | `$$unary` | marks the preceding `+ - & *` operator as unary |

pub mod ldscript;

use std::sync::Once;

use rayon::prelude::*;

pub use cxm_ir::{Abi, MangleError, Node, Result, Shape, Signature};
pub use cxm_itanium::{CompressionDictionary, ItaniumEncoder};
pub use cxm_macintosh::MacintoshEncoder;
pub use cxm_parse::parse_signature;
pub use ldscript::LinkerScript;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for diagnostic output.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=cxm_parse=trace,cxm_itanium=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Mangle one prototype.
#[tracing::instrument(level = "debug", skip_all, fields(abi = %abi))]
pub fn mangle(prototype: &str, abi: Abi) -> Result<String> {
    let signature = parse_signature(prototype)?;
    mangle_signature(&signature, abi)
}

/// Mangle an already parsed signature.
pub fn mangle_signature(signature: &Signature, abi: Abi) -> Result<String> {
    match abi {
        Abi::Itanium => cxm_itanium::mangle(signature),
        Abi::Macintosh => cxm_macintosh::mangle(signature),
    }
}

/// Mangle a batch in parallel. Results are in input order; one failure
/// does not affect the others.
pub fn mangle_all<S>(prototypes: &[S], abi: Abi) -> Vec<Result<String>>
where
    S: AsRef<str> + Sync,
{
    prototypes
        .par_iter()
        .map(|prototype| mangle(prototype.as_ref(), abi))
        .collect()
}
