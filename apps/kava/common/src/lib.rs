//! Common types for the Kava transaction review core.
//!
//! This crate provides the types shared by the review core and the
//! collaborators that feed it: the token model produced by a tokenizer,
//! the error taxonomy and the display settings.
//!
//! # Security Note
//!
//! Tokens cross a trust boundary. Nothing here validates spans; all
//! bounds checks happen in the review core before any byte is read.

#![no_std]

pub mod constants;
pub mod error;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::Error;
pub use types::{ReviewSettings, Token, TokenKind, Tokenizer};
