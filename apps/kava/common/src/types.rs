//! Core types for the Kava review core.
//!
//! A transaction arrives as raw JSON bytes plus a flat array of tokens,
//! each one a typed span over those bytes. Tokens are stored in document
//! order; a container's children follow it and lie inside its span.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kind of a token span.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenKind {
    /// Slot never filled by the tokenizer.
    #[default]
    Undefined,
    /// `{ ... }`, span includes the braces.
    Object,
    /// `[ ... ]`, span includes the brackets.
    Array,
    /// String contents, span excludes the quotes.
    String,
    /// Number, boolean or null.
    Primitive,
}

/// A typed span over the raw transaction bytes.
///
/// Offsets are signed because the producer is not trusted: a negative or
/// inverted span must be representable so that it can be rejected.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Token {
    pub kind: TokenKind,
    pub start: i32,
    pub end: i32,
}

impl Token {
    /// Creates a token.
    pub const fn new(kind: TokenKind, start: i32, end: i32) -> Self {
        Self { kind, start, end }
    }

    /// Returns true for objects and arrays.
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self.kind, TokenKind::Object | TokenKind::Array)
    }

    /// Returns true for strings and primitives.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, TokenKind::String | TokenKind::Primitive)
    }
}

/// Turns raw transaction bytes into tokens.
///
/// Implementations write at most `tokens.len()` tokens and return how many
/// were written.
pub trait Tokenizer {
    fn tokenize(&self, raw: &[u8], tokens: &mut [Token]) -> Result<usize, Error>;
}

/// Display settings that affect how values are rendered.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewSettings {
    /// Show raw on-chain amounts and denominations, no symbol translation.
    pub expert_mode: bool,
}

impl ReviewSettings {
    /// Settings with expert mode enabled.
    pub const fn expert() -> Self {
        Self { expert_mode: true }
    }
}
