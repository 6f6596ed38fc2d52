//! Bounds-checked access to the token buffer.
//!
//! Tokens come from a tokenizer that is not trusted to have produced sane
//! spans. Every read through `TokenView` checks that the index exists and
//! that `0 <= start <= end <= raw.len()` before touching any byte.

use common::{Error, Token, TokenKind};

/// Read-only view over raw transaction bytes and their tokens.
#[derive(Debug, Clone, Copy)]
pub struct TokenView<'a> {
    raw: &'a [u8],
    tokens: &'a [Token],
}

impl<'a> TokenView<'a> {
    pub fn new(raw: &'a [u8], tokens: &'a [Token]) -> Self {
        Self { raw, tokens }
    }

    /// Number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the token at `idx`.
    pub fn token(&self, idx: usize) -> Result<Token, Error> {
        self.tokens
            .get(idx)
            .copied()
            .ok_or(Error::UnexpectedBufferEnd)
    }

    pub fn kind(&self, idx: usize) -> Result<TokenKind, Error> {
        Ok(self.token(idx)?.kind)
    }

    /// Validated `(start, end)` of a token, if its span lies inside the buffer.
    fn span(&self, token: &Token) -> Option<(usize, usize)> {
        let start = usize::try_from(token.start).ok()?;
        let end = usize::try_from(token.end).ok()?;
        if start > end || end > self.raw.len() {
            return None;
        }
        Some((start, end))
    }

    /// Returns the bytes covered by the token at `idx`.
    ///
    /// Zero-length spans are valid here; callers that need content check
    /// for emptiness themselves.
    pub fn bytes(&self, idx: usize) -> Result<&'a [u8], Error> {
        let token = self.token(idx)?;
        let (start, end) = self.span(&token).ok_or(Error::UnexpectedBufferEnd)?;
        Ok(&self.raw[start..end])
    }

    /// Checked `(start, end)` byte offsets of the token at `idx`.
    pub fn range(&self, idx: usize) -> Result<(usize, usize), Error> {
        let token = self.token(idx)?;
        self.span(&token).ok_or(Error::UnexpectedBufferEnd)
    }

    /// The raw transaction bytes.
    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// Returns true if the token at `idx` is a string equal to `literal`.
    ///
    /// Never fails: a missing token, a non-string token or a malformed span
    /// all compare unequal.
    pub fn equals(&self, idx: usize, literal: &str) -> bool {
        let Ok(token) = self.token(idx) else {
            return false;
        };
        if token.kind != TokenKind::String {
            return false;
        }
        let Some((start, end)) = self.span(&token) else {
            return false;
        };
        let expected = literal.as_bytes();
        if end - start != expected.len() {
            return false;
        }
        &self.raw[start..end] == expected
    }

    /// Iterates over the direct children of the token at `idx`.
    ///
    /// For an object the children alternate key, value.
    pub fn children(&self, idx: usize) -> Result<Children<'a>, Error> {
        let parent = self.token(idx)?;
        let (start, end) = self.span(&parent).ok_or(Error::UnexpectedBufferEnd)?;
        Ok(Children {
            view: *self,
            next: idx + 1,
            parent_end: end,
            prev_end: start,
            done: false,
        })
    }

    /// Number of direct children of the token at `idx`.
    pub fn element_count(&self, idx: usize) -> Result<usize, Error> {
        self.children(idx)?
            .try_fold(0usize, |count, child| child.map(|_| count + 1))
    }
}

/// Direct children of a token, in document order.
///
/// A child is the first token starting after the previous child ended;
/// tokens nested deeper start inside a sibling's span and are skipped.
#[derive(Debug)]
pub struct Children<'a> {
    view: TokenView<'a>,
    next: usize,
    parent_end: usize,
    prev_end: usize,
    done: bool,
}

impl Iterator for Children<'_> {
    type Item = Result<usize, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done && self.next < self.view.len() {
            let idx = self.next;
            let token = self.view.tokens[idx];
            self.next += 1;

            let Some((start, end)) = self.view.span(&token) else {
                self.done = true;
                return Some(Err(Error::UnexpectedBufferEnd));
            };
            if start >= self.parent_end {
                break;
            }
            if start <= self.prev_end {
                continue;
            }
            if end > self.parent_end {
                self.done = true;
                return Some(Err(Error::UnexpectedBufferEnd));
            }
            self.prev_end = end;
            return Some(Ok(idx));
        }
        self.done = true;
        None
    }
}
