//! Fixed-capacity display buffers.
//!
//! Every string the core produces lives in a `DisplayBuf<N>`. Writes are
//! all-or-nothing: a write that would not fit fails and leaves the buffer
//! unchanged. The only lossy write is `push_truncating`, reserved for
//! cosmetic key suffixes.

use core::fmt;

use common::Error;
use zeroize::Zeroize;

use crate::integrity::Intact;

/// Sentinel stored after the data of every buffer.
const GUARD: u32 = 0x5AFE_C0DE;

/// Byte buffer with a fixed capacity of `N`.
pub struct DisplayBuf<const N: usize> {
    data: [u8; N],
    len: usize,
    guard: u32,
}

impl<const N: usize> DisplayBuf<N> {
    /// Creates an empty, zeroed buffer.
    pub const fn new() -> Self {
        Self {
            data: [0; N],
            len: 0,
            guard: GUARD,
        }
    }

    /// Total capacity in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes still available.
    #[inline]
    pub fn remaining(&self) -> usize {
        N.saturating_sub(self.len)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len.min(N)]
    }

    /// Returns the contents as text, or `None` if they are not UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }

    /// Zeroes the whole buffer, not just the used part.
    pub fn clear(&mut self) {
        self.data.zeroize();
        self.len = 0;
    }

    /// Appends `bytes`, or fails without writing anything.
    pub fn try_push(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if bytes.len() > self.remaining() {
            return Err(Error::UnexpectedBufferEnd);
        }
        self.data[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }

    /// Appends as much of `bytes` as fits and returns how many were written.
    pub fn push_truncating(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.remaining());
        self.data[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
        n
    }

    /// Replaces the contents with `bytes`.
    pub fn set(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if bytes.len() > N {
            return Err(Error::UnexpectedBufferEnd);
        }
        self.clear();
        self.try_push(bytes)
    }

    /// Shortens the contents to `len` bytes, zeroing the dropped tail.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.data[len..self.len].zeroize();
            self.len = len;
        }
    }
}

impl<const N: usize> Intact for DisplayBuf<N> {
    fn is_intact(&self) -> bool {
        self.guard == GUARD && self.len <= N
    }
}

impl<const N: usize> Default for DisplayBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Zeroize for DisplayBuf<N> {
    fn zeroize(&mut self) {
        self.clear();
    }
}

impl<const N: usize> Drop for DisplayBuf<N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<const N: usize> fmt::Write for DisplayBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.try_push(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

impl<const N: usize> fmt::Debug for DisplayBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(text) => write!(f, "{:?}", text),
            None => write!(f, "{:?}", self.as_bytes()),
        }
    }
}
