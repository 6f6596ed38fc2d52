//! Minimal JSON span tokenizer for tests.
//!
//! Produces tokens in the layout the review core expects: document order,
//! string spans without quotes, container spans including their brackets.
//! It is deliberately lax (no escape decoding, no number validation) and
//! must never be used on device.

use crate::error::Error;
use crate::types::{Token, TokenKind, Tokenizer};

/// Deepest container nesting the tokenizer tracks.
const MAX_NESTING: usize = 32;

/// Tokenizer for JSON test fixtures.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonTokenizer;

impl Tokenizer for JsonTokenizer {
    fn tokenize(&self, raw: &[u8], tokens: &mut [Token]) -> Result<usize, Error> {
        let mut open = [0usize; MAX_NESTING];
        let mut depth = 0usize;
        let mut count = 0usize;
        let mut pos = 0usize;

        while pos < raw.len() {
            match raw[pos] {
                b'{' | b'[' => {
                    let kind = if raw[pos] == b'{' {
                        TokenKind::Object
                    } else {
                        TokenKind::Array
                    };
                    if depth == MAX_NESTING {
                        return Err(Error::UnexpectedError);
                    }
                    open[depth] = count;
                    depth += 1;
                    push(tokens, &mut count, Token::new(kind, pos as i32, -1))?;
                    pos += 1;
                }
                b'}' | b']' => {
                    let expected = if raw[pos] == b'}' {
                        TokenKind::Object
                    } else {
                        TokenKind::Array
                    };
                    if depth == 0 {
                        return Err(Error::UnexpectedField);
                    }
                    depth -= 1;
                    let container = &mut tokens[open[depth]];
                    if container.kind != expected {
                        return Err(Error::UnexpectedField);
                    }
                    container.end = pos as i32 + 1;
                    pos += 1;
                }
                b'"' => {
                    let start = pos + 1;
                    let mut end = start;
                    loop {
                        match raw.get(end) {
                            None => return Err(Error::UnexpectedBufferEnd),
                            Some(b'\\') => end += 2,
                            Some(b'"') => break,
                            Some(_) => end += 1,
                        }
                    }
                    push(
                        tokens,
                        &mut count,
                        Token::new(TokenKind::String, start as i32, end as i32),
                    )?;
                    pos = end + 1;
                }
                b' ' | b'\t' | b'\r' | b'\n' | b':' | b',' => pos += 1,
                _ => {
                    let start = pos;
                    while pos < raw.len()
                        && !matches!(
                            raw[pos],
                            b',' | b']' | b'}' | b':' | b' ' | b'\t' | b'\r' | b'\n'
                        )
                    {
                        pos += 1;
                    }
                    push(
                        tokens,
                        &mut count,
                        Token::new(TokenKind::Primitive, start as i32, pos as i32),
                    )?;
                }
            }
        }

        if depth != 0 {
            return Err(Error::UnexpectedBufferEnd);
        }
        Ok(count)
    }
}

fn push(tokens: &mut [Token], count: &mut usize, token: Token) -> Result<(), Error> {
    let slot = tokens.get_mut(*count).ok_or(Error::UnexpectedBufferEnd)?;
    *slot = token;
    *count += 1;
    Ok(())
}
