//! Stack growth guard for recursive descent over prototype trees.
//!
//! Argument lists and template argument lists nest arbitrarily
//! (`A<B<C<...>>>`), and both the tokenizer and the two encoders recurse
//! once per nesting level. Each recursive step goes through
//! [`ensure_sufficient_stack`] so adversarially deep prototypes grow the
//! stack instead of overflowing it.
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: direct call.

/// Grow when less than this much stack remains (64KB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment (1MB).
const GROWTH: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
