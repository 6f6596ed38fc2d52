//! Pagination of display values.
//!
//! A value longer than one screen is split into pages of at most `width`
//! bytes, the width being the capacity of the output buffer. A break never
//! falls inside a UTF-8 multi-byte sequence, so every page of a UTF-8 value
//! is itself UTF-8; ASCII values get exactly `ceil(len / width)` pages. The
//! page count is always at least one, even for an empty value.

use common::Error;

use crate::buffer::DisplayBuf;

/// Returns true for UTF-8 continuation bytes (`10xx_xxxx`).
#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// End offset of the page starting at `start`.
///
/// Backs off to the last character boundary that fits. A single character
/// wider than the page is cut, so every page makes progress.
fn page_end(value: &[u8], start: usize, width: usize) -> usize {
    let end = value.len().min(start + width);
    if end == value.len() {
        return end;
    }
    let mut cut = end;
    while cut > start && is_continuation(value[cut]) {
        cut -= 1;
    }
    if cut == start {
        end
    } else {
        cut
    }
}

/// Byte range of page `page_idx` and the total page count.
fn locate(value: &[u8], page_idx: u8, width: usize) -> Result<((usize, usize), u8), Error> {
    if width == 0 {
        return Err(Error::UnexpectedBufferEnd);
    }

    let mut range = (0, 0);
    let mut start = 0;
    let mut pages = 0u8;
    loop {
        let end = page_end(value, start, width);
        if pages == page_idx {
            range = (start, end);
        }
        pages = pages.checked_add(1).ok_or(Error::UnexpectedBufferEnd)?;
        if end == value.len() {
            return Ok((range, pages));
        }
        start = end;
    }
}

/// Number of pages `value` takes at `width` bytes per page.
pub fn page_count(value: &[u8], width: usize) -> Result<u8, Error> {
    locate(value, 0, width).map(|(_, pages)| pages)
}

/// Writes page `page_idx` of `value` into `out` and returns the page count.
///
/// `out` is cleared first. Asking for a page past the end fails with
/// `IndexOutOfRange` and leaves `out` empty.
pub fn page_into<const N: usize>(
    value: &[u8],
    page_idx: u8,
    out: &mut DisplayBuf<N>,
) -> Result<u8, Error> {
    out.clear();
    let ((start, end), count) = locate(value, page_idx, N)?;
    if page_idx >= count {
        return Err(Error::IndexOutOfRange);
    }
    out.try_push(&value[start..end])?;
    Ok(count)
}
