//! Transaction schema: which fields are shown, in what order, and how.
//!
//! The review core does not know the transaction format. A `TxSchema`
//! maps display indices to a key and a value token, renders non-amount
//! values and may post-process what is shown. `PathSchema` is a generic
//! implementation that flattens a JSON sign document into key paths.

use core::ops::ControlFlow;

use common::constants::{MAX_DEPTH, MAX_DISPLAY_ITEMS, MAX_PATH_LEN};
use common::{Error, TokenKind};

use crate::amount;
use crate::buffer::DisplayBuf;
use crate::paging;
use crate::tokens::TokenView;

/// Display mapping of a transaction format.
pub trait TxSchema {
    /// Structural checks, independent of whether items render.
    fn validate(&self, view: &TokenView<'_>) -> Result<(), Error>;

    /// Number of display items.
    fn num_items(&self, view: &TokenView<'_>) -> u8;

    /// Writes the key of item `display_idx` and returns its value token.
    ///
    /// The order must be stable across calls for the same transaction.
    fn query<const K: usize>(
        &self,
        view: &TokenView<'_>,
        display_idx: u8,
        key: &mut DisplayBuf<K>,
    ) -> Result<usize, Error>;

    /// Returns true if the value under `key` is a coin amount.
    fn is_amount_key(&self, key: &[u8]) -> bool {
        amount::is_amount(key)
    }

    /// Renders a non-amount value: the raw token bytes, paged.
    fn render_token<const V: usize>(
        &self,
        view: &TokenView<'_>,
        token_idx: usize,
        page_idx: u8,
        out: &mut DisplayBuf<V>,
    ) -> Result<u8, Error> {
        paging::page_into(view.bytes(token_idx)?, page_idx, out)
    }

    /// Cosmetic post-processing of a rendered item.
    fn make_friendly<const K: usize, const V: usize>(
        &self,
        _key: &mut DisplayBuf<K>,
        _value: &mut DisplayBuf<V>,
    ) -> Result<(), Error> {
        Ok(())
    }
}

/// Flattens the root object into slash-separated key paths.
///
/// - object members are walked in document order, keys joined with `/`
/// - every element of an array of objects is walked under the same path,
///   so each message in `msgs` yields `msgs/type`, `msgs/value/...`
/// - amount paths, scalars, empty containers and arrays of scalars are
///   leaves, shown as their raw JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct PathSchema;

type Path = DisplayBuf<MAX_PATH_LEN>;

impl PathSchema {
    /// Visits every leaf in document order until `on_leaf` breaks.
    fn walk<F>(&self, view: &TokenView<'_>, on_leaf: &mut F) -> Result<(), Error>
    where
        F: FnMut(&[u8], usize) -> ControlFlow<()>,
    {
        if view.kind(0)? != TokenKind::Object {
            return Err(Error::UnexpectedField);
        }
        self.check_single_root(view)?;
        let mut path = Path::new();
        self.walk_members(view, 0, &mut path, 0, on_leaf).map(|_| ())
    }

    /// The root object must span the whole document.
    ///
    /// Bytes outside it would be signed without ever being shown.
    fn check_single_root(&self, view: &TokenView<'_>) -> Result<(), Error> {
        let (start, end) = view.range(0)?;
        let raw = view.raw();
        let blank = |bytes: &[u8]| bytes.iter().all(u8::is_ascii_whitespace);
        if !blank(&raw[..start]) || !blank(&raw[end..]) {
            return Err(Error::UnexpectedField);
        }
        for idx in 1..view.len() {
            let (child_start, child_end) = view.range(idx)?;
            if child_start <= start || child_end > end {
                return Err(Error::UnexpectedField);
            }
        }
        Ok(())
    }

    fn walk_members<F>(
        &self,
        view: &TokenView<'_>,
        idx: usize,
        path: &mut Path,
        depth: usize,
        on_leaf: &mut F,
    ) -> Result<ControlFlow<()>, Error>
    where
        F: FnMut(&[u8], usize) -> ControlFlow<()>,
    {
        let mut children = view.children(idx)?;
        while let Some(key_idx) = children.next() {
            let key_idx = key_idx?;
            let value_idx = children.next().ok_or(Error::UnexpectedField)??;
            if view.kind(key_idx)? != TokenKind::String {
                return Err(Error::UnexpectedField);
            }
            let key = view.bytes(key_idx)?;
            // A separator inside a key would forge a different path.
            if key.contains(&b'/') {
                return Err(Error::UnexpectedField);
            }

            let mark = path.len();
            if mark > 0 {
                path.try_push(b"/")?;
            }
            path.try_push(key)?;
            let flow = self.visit(view, value_idx, path, depth + 1, on_leaf)?;
            path.truncate(mark);
            if flow.is_break() {
                return Ok(flow);
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn visit<F>(
        &self,
        view: &TokenView<'_>,
        idx: usize,
        path: &mut Path,
        depth: usize,
        on_leaf: &mut F,
    ) -> Result<ControlFlow<()>, Error>
    where
        F: FnMut(&[u8], usize) -> ControlFlow<()>,
    {
        if depth > MAX_DEPTH {
            return Err(Error::UnexpectedField);
        }
        if self.is_amount_key(path.as_bytes()) {
            return Ok(on_leaf(path.as_bytes(), idx));
        }

        let count = view.element_count(idx)?;
        match view.kind(idx)? {
            TokenKind::Object if count > 0 => self.walk_members(view, idx, path, depth, on_leaf),
            TokenKind::Array if count > 0 && self.is_object_array(view, idx)? => {
                for element in view.children(idx)? {
                    let flow = self.visit(view, element?, path, depth + 1, on_leaf)?;
                    if flow.is_break() {
                        return Ok(flow);
                    }
                }
                Ok(ControlFlow::Continue(()))
            }
            _ => Ok(on_leaf(path.as_bytes(), idx)),
        }
    }

    fn is_object_array(&self, view: &TokenView<'_>, idx: usize) -> Result<bool, Error> {
        for element in view.children(idx)? {
            if view.kind(element?)? != TokenKind::Object {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Counts leaves, stopping one past the display limit.
    fn count_items(&self, view: &TokenView<'_>) -> Result<usize, Error> {
        let mut count = 0usize;
        self.walk(view, &mut |_, _| {
            count += 1;
            if count > MAX_DISPLAY_ITEMS {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;
        Ok(count)
    }
}

impl TxSchema for PathSchema {
    fn validate(&self, view: &TokenView<'_>) -> Result<(), Error> {
        if self.count_items(view)? > MAX_DISPLAY_ITEMS {
            return Err(Error::UnexpectedError);
        }
        Ok(())
    }

    fn num_items(&self, view: &TokenView<'_>) -> u8 {
        // Malformed trees have nothing to show; `validate` reports why.
        let count = self.count_items(view).unwrap_or(0);
        u8::try_from(count).unwrap_or(u8::MAX)
    }

    fn query<const K: usize>(
        &self,
        view: &TokenView<'_>,
        display_idx: u8,
        key: &mut DisplayBuf<K>,
    ) -> Result<usize, Error> {
        let target = usize::from(display_idx);
        let mut seen = 0usize;
        let mut found = None;
        self.walk(view, &mut |path, idx| {
            if seen == target {
                found = Some(key.set(path).map(|_| idx));
                return ControlFlow::Break(());
            }
            seen += 1;
            ControlFlow::Continue(())
        })?;
        found.unwrap_or(Err(Error::IndexOutOfRange))
    }
}
