//! Transaction review core for the Kava signing app.
//!
//! Given an untrusted transaction and its tokens, this crate produces the
//! exact key/value pairs shown to the user, paginated for a small display,
//! and refuses approval unless every field renders.
//!
//! # Security Model
//!
//! - Raw bytes and tokens are adversarial; every span is bounds-checked
//! - Values are never truncated: they fit a page exactly or are paged
//! - All buffers are fixed-capacity, no heap allocation
//! - Fail closed: any rendering error blocks signing
//!
//! # Flow
//!
//! ```text
//! parse -> validate -> (num_items -> get_item*)
//! ```

#![cfg_attr(not(test), no_std)]

pub mod amount;
pub mod buffer;
pub mod denom;
pub mod integrity;
pub mod paging;
pub mod parser;
pub mod schema;
pub mod tokens;

pub use buffer::DisplayBuf;
pub use common::{Error, ReviewSettings, Token, TokenKind, Tokenizer};
pub use parser::ReviewSession;
pub use schema::{PathSchema, TxSchema};
pub use tokens::TokenView;
