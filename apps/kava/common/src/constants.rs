//! Compile-time limits of the review core.
//!
//! Every buffer the core writes into has one of these capacities; none of
//! them grows at runtime.

/// Maximum number of tokens a session can hold.
pub const MAX_TOKENS: usize = 256;

/// Key buffer used by the validation pass.
pub const KEY_BUFFER_LEN: usize = 40;

/// Value buffer used by the validation pass.
pub const VALUE_BUFFER_LEN: usize = 40;

/// Unpaged `"<value> <symbol>"` amount string.
pub const AMOUNT_BUFFER_LEN: usize = 160;

/// Scratch space for the numeric part of an amount.
pub const AMOUNT_SCRATCH_LEN: usize = 50;

/// Longest slash-separated key path.
pub const MAX_PATH_LEN: usize = 64;

/// Maximum nesting depth walked below the root object.
pub const MAX_DEPTH: usize = 8;

/// Display items are addressed with a single byte.
pub const MAX_DISPLAY_ITEMS: usize = u8::MAX as usize;

/// Placeholder shown for an empty coin list.
pub const EMPTY_AMOUNT: &str = "Empty";
