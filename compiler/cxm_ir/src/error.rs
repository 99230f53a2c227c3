//! Error type for parsing and mangling.

use crate::Abi;

/// Result alias used across the mangler crates.
pub type Result<T, E = MangleError> = std::result::Result<T, E>;

/// Why a prototype could not be turned into a symbol.
///
/// Every failure is deterministic and input-dependent: retrying the same
/// prototype fails the same way. No partial symbol is ever produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MangleError {
    // Malformed input
    /// The input ended inside an argument or template list.
    #[error("no closing brace found, expected '{0}'")]
    Unterminated(char),
    /// A closer that does not match the list being parsed.
    #[error("'{0}' was unexpected at this time")]
    UnexpectedCloser(char),
    /// A character that starts no token.
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    /// `<>` with nothing inside.
    #[error("empty template argument list")]
    EmptyTemplateArgs,
    /// `(int,)` or `<,int>`: a separator with no argument before it.
    #[error("empty argument in argument list")]
    EmptyArgument,
    /// `operator` followed by something that is not an overloadable operator.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
    /// A `$$` pseudo-token that is not recognized.
    #[error("unknown special token '{0}'")]
    UnknownSpecialToken(String),
    /// `$$unary` placed after something other than `+`, `-`, `&` or `*`.
    #[error("special token \"$$unary\" can't be used after {0}")]
    MisplacedUnary(String),
    /// A binding token with no neighbor to bind to.
    #[error("'{0}' has nothing to apply to")]
    MissingOperand(&'static str),
    /// `const const`.
    #[error("duplicate 'const' qualifiers")]
    DuplicateConst,
    /// `int & const`.
    #[error("'const' qualifiers cannot be applied to references")]
    ConstReference,

    // Invalid decorator combination
    /// `unsigned float`, `long char`, ...
    #[error("type '{operand}' is incompatible with the '{combinator}' decorator")]
    IncompatibleCombinator {
        combinator: &'static str,
        operand: String,
    },

    // ABI limitations
    /// A construct the selected ABI cannot express.
    #[error("{feature} is not supported by the {abi} ABI")]
    Unsupported { abi: Abi, feature: String },

    // Shape
    /// The resolved declaration is not a variable, function or special name.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    // Configuration
    /// An ABI selector string that names no known ABI.
    #[error("unknown ABI '{0}'")]
    UnknownAbi(String),
}

impl MangleError {
    /// Shorthand for [`MangleError::Unsupported`].
    pub fn unsupported(abi: Abi, feature: impl Into<String>) -> Self {
        MangleError::Unsupported {
            abi,
            feature: feature.into(),
        }
    }
}
