//! Review session: parse, validate, enumerate.
//!
//! A `ReviewSession` owns everything about one transaction under review.
//! `validate` must succeed before the user is offered to sign; it proves
//! that every item renders, so the review screens can never hit an error
//! halfway through.
//!
//! # Security
//!
//! - `get_item` zeroes both output buffers on entry and again on error,
//!   so a failed call never leaves a partial key or value behind
//! - values are paged, never truncated; only the key's page suffix may be
//!   cut short
//! - the integrity canary is re-checked after each rendering step

use core::fmt::Write;

use common::constants::{KEY_BUFFER_LEN, MAX_TOKENS, VALUE_BUFFER_LEN};
use common::{Error, ReviewSettings, Token, Tokenizer};

use crate::amount;
use crate::buffer::DisplayBuf;
use crate::integrity::{self, Canary, Intact};
use crate::schema::TxSchema;
use crate::tokens::TokenView;

/// One transaction under review.
pub struct ReviewSession<'a, S> {
    raw: &'a [u8],
    tokens: [Token; MAX_TOKENS],
    num_tokens: usize,
    schema: S,
    settings: ReviewSettings,
    canary: Canary,
}

impl<'a, S: TxSchema> ReviewSession<'a, S> {
    /// Tokenizes `raw` and opens a session over it.
    pub fn parse<T: Tokenizer>(
        raw: &'a [u8],
        tokenizer: &T,
        schema: S,
        settings: ReviewSettings,
    ) -> Result<Self, Error> {
        if raw.is_empty() {
            return Err(Error::NoData);
        }

        let mut tokens = [Token::default(); MAX_TOKENS];
        let num_tokens = tokenizer.tokenize(raw, &mut tokens)?;
        if num_tokens == 0 {
            return Err(Error::NoData);
        }
        if num_tokens > MAX_TOKENS {
            return Err(Error::UnexpectedError);
        }
        log::debug!("parsed {} bytes into {} tokens", raw.len(), num_tokens);

        Ok(Self {
            raw,
            tokens,
            num_tokens,
            schema,
            settings,
            canary: Canary::new(),
        })
    }

    /// Bounds-checked view over the transaction.
    pub fn view(&self) -> TokenView<'_> {
        TokenView::new(self.raw, &self.tokens[..self.num_tokens])
    }

    pub fn settings(&self) -> ReviewSettings {
        self.settings
    }

    /// Checks that the transaction is well formed and that every item
    /// renders. Signing must not be offered unless this succeeds.
    pub fn validate(&self) -> Result<(), Error> {
        self.schema.validate(&self.view())?;

        let num_items = self.num_items();
        let mut key = DisplayBuf::<KEY_BUFFER_LEN>::new();
        let mut value = DisplayBuf::<VALUE_BUFFER_LEN>::new();
        for idx in 0..num_items {
            if let Err(err) = self.get_item(idx, 0, &mut key, &mut value) {
                log::warn!("item {} cannot be displayed: {}", idx, err);
                return Err(err);
            }
        }

        log::debug!("validated {} items", num_items);
        Ok(())
    }

    /// Number of items to review. Zero means there is nothing to show.
    pub fn num_items(&self) -> u8 {
        self.schema.num_items(&self.view())
    }

    /// Renders page `page_idx` of item `display_idx` and returns the page
    /// count.
    ///
    /// On error both buffers are left zeroed.
    pub fn get_item<const K: usize, const V: usize>(
        &self,
        display_idx: u8,
        page_idx: u8,
        key: &mut DisplayBuf<K>,
        value: &mut DisplayBuf<V>,
    ) -> Result<u8, Error> {
        key.clear();
        value.clear();

        let result = self.render_item(display_idx, page_idx, key, value);
        if result.is_err() {
            key.clear();
            value.clear();
        }
        result
    }

    fn render_item<const K: usize, const V: usize>(
        &self,
        display_idx: u8,
        page_idx: u8,
        key: &mut DisplayBuf<K>,
        value: &mut DisplayBuf<V>,
    ) -> Result<u8, Error> {
        let view = self.view();

        let num_items = self.num_items();
        self.check_integrity(key, value);
        if num_items == 0 {
            return Err(Error::ItemCountError);
        }
        if display_idx >= num_items {
            return Err(Error::IndexOutOfRange);
        }

        let token_idx = self.schema.query(&view, display_idx, key)?;
        self.check_integrity(key, value);

        let page_count = if self.schema.is_amount_key(key.as_bytes()) {
            amount::format_amount(
                &view,
                token_idx,
                self.settings.expert_mode,
                page_idx,
                value,
            )?
        } else {
            self.schema.render_token(&view, token_idx, page_idx, value)?
        };
        self.check_integrity(key, value);

        self.schema.make_friendly(key, value)?;
        self.check_integrity(key, value);

        if page_count > 1 {
            let mut suffix = DisplayBuf::<16>::new();
            write!(suffix, " [{}/{}]", u16::from(page_idx) + 1, page_count)
                .map_err(|_| Error::UnexpectedError)?;
            key.push_truncating(suffix.as_bytes());
        }

        self.check_integrity(key, value);
        Ok(page_count)
    }

    fn check_integrity<const K: usize, const V: usize>(
        &self,
        key: &DisplayBuf<K>,
        value: &DisplayBuf<V>,
    ) {
        let parts: [&dyn Intact; 3] = [&self.canary, key, value];
        integrity::ensure_intact(&parts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::test_utils::JsonTokenizer;
    use common::TokenKind;

    /// Schema listing fixed `(key, token)` pairs.
    struct ListSchema {
        items: &'static [(&'static str, usize)],
    }

    impl TxSchema for ListSchema {
        fn validate(&self, _view: &TokenView<'_>) -> Result<(), Error> {
            Ok(())
        }

        fn num_items(&self, _view: &TokenView<'_>) -> u8 {
            self.items.len() as u8
        }

        fn query<const K: usize>(
            &self,
            _view: &TokenView<'_>,
            display_idx: u8,
            key: &mut DisplayBuf<K>,
        ) -> Result<usize, Error> {
            let (name, token) = self.items[usize::from(display_idx)];
            key.set(name.as_bytes())?;
            Ok(token)
        }

        fn make_friendly<const K: usize, const V: usize>(
            &self,
            key: &mut DisplayBuf<K>,
            _value: &mut DisplayBuf<V>,
        ) -> Result<(), Error> {
            if key.as_bytes() == b"chain" {
                key.set(b"Chain ID")?;
            }
            Ok(())
        }
    }

    struct FixedTokenizer(&'static [Token]);

    impl Tokenizer for FixedTokenizer {
        fn tokenize(&self, _raw: &[u8], tokens: &mut [Token]) -> Result<usize, Error> {
            tokens[..self.0.len()].copy_from_slice(self.0);
            Ok(self.0.len())
        }
    }

    struct OverreportingTokenizer;

    impl Tokenizer for OverreportingTokenizer {
        fn tokenize(&self, _raw: &[u8], _tokens: &mut [Token]) -> Result<usize, Error> {
            Ok(MAX_TOKENS + 1)
        }
    }

    const RAW: &str = r#"{"chain":"kava_2222-10","fee":{"amount":"250000","denom":"ukava"}}"#;

    fn session(items: &'static [(&'static str, usize)]) -> ReviewSession<'static, ListSchema> {
        ReviewSession::parse(
            RAW.as_bytes(),
            &JsonTokenizer,
            ListSchema { items },
            ReviewSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        let result = ReviewSession::parse(
            b"",
            &JsonTokenizer,
            ListSchema { items: &[] },
            ReviewSettings::default(),
        );
        assert_eq!(result.err(), Some(Error::NoData));

        let result = ReviewSession::parse(
            b"   ",
            &FixedTokenizer(&[]),
            ListSchema { items: &[] },
            ReviewSettings::default(),
        );
        assert_eq!(result.err(), Some(Error::NoData));
    }

    #[test]
    fn test_parse_rejects_overreporting_tokenizer() {
        let result = ReviewSession::parse(
            b"{}",
            &OverreportingTokenizer,
            ListSchema { items: &[] },
            ReviewSettings::default(),
        );
        assert_eq!(result.err(), Some(Error::UnexpectedError));
    }

    #[test]
    fn test_zero_items() {
        let session = session(&[]);
        assert_eq!(session.num_items(), 0);
        assert_eq!(session.validate(), Ok(()));

        let mut key = DisplayBuf::<40>::new();
        let mut value = DisplayBuf::<40>::new();
        assert_eq!(
            session.get_item(0, 0, &mut key, &mut value),
            Err(Error::ItemCountError)
        );
    }

    #[test]
    fn test_friendly_pass_and_amount_dispatch() {
        let session = session(&[("chain", 2), ("fee/amount", 4)]);
        assert_eq!(session.validate(), Ok(()));

        let mut key = DisplayBuf::<40>::new();
        let mut value = DisplayBuf::<40>::new();
        assert_eq!(session.get_item(0, 0, &mut key, &mut value), Ok(1));
        assert_eq!(key.as_str(), Some("Chain ID"));
        assert_eq!(value.as_str(), Some("kava_2222-10"));

        assert_eq!(session.get_item(1, 0, &mut key, &mut value), Ok(1));
        assert_eq!(key.as_str(), Some("fee/amount"));
        assert_eq!(value.as_str(), Some("0.25 KAVA"));

        assert_eq!(
            session.get_item(2, 0, &mut key, &mut value),
            Err(Error::IndexOutOfRange)
        );
    }

    #[test]
    fn test_page_suffix() {
        let session = session(&[("chain", 2)]);
        let mut key = DisplayBuf::<20>::new();
        let mut value = DisplayBuf::<5>::new();

        assert_eq!(session.get_item(0, 0, &mut key, &mut value), Ok(3));
        assert_eq!(key.as_str(), Some("Chain ID [1/3]"));
        assert_eq!(value.as_str(), Some("kava_"));

        assert_eq!(session.get_item(0, 2, &mut key, &mut value), Ok(3));
        assert_eq!(key.as_str(), Some("Chain ID [3/3]"));
        assert_eq!(value.as_str(), Some("10"));
    }

    #[test]
    fn test_page_suffix_truncates_key_only() {
        let session = session(&[("chain", 2)]);
        let mut key = DisplayBuf::<10>::new();
        let mut value = DisplayBuf::<5>::new();

        assert_eq!(session.get_item(0, 1, &mut key, &mut value), Ok(3));
        assert_eq!(key.as_str(), Some("Chain ID ["));
        assert_eq!(value.as_str(), Some("2222-"));
    }

    #[test]
    fn test_error_leaves_buffers_zeroed() {
        // Token 1 is the "chain" key string, not a coin object.
        let session = session(&[("fee/amount", 1)]);
        let mut key = DisplayBuf::<40>::new();
        let mut value = DisplayBuf::<40>::new();
        value.set(b"previous value").unwrap();

        assert_eq!(
            session.get_item(0, 0, &mut key, &mut value),
            Err(Error::UnexpectedField)
        );
        assert!(key.is_empty());
        assert!(value.is_empty());
        assert_eq!(session.validate(), Err(Error::UnexpectedField));
    }

    #[test]
    fn test_page_out_of_range() {
        let session = session(&[("chain", 2)]);
        let mut key = DisplayBuf::<40>::new();
        let mut value = DisplayBuf::<40>::new();
        assert_eq!(
            session.get_item(0, 1, &mut key, &mut value),
            Err(Error::IndexOutOfRange)
        );
    }

    #[test]
    fn test_degenerate_token_spans() {
        static TOKENS: [Token; 3] = [
            Token::new(TokenKind::Object, 0, 4),
            Token::new(TokenKind::String, 2, 1),
            Token::new(TokenKind::String, -1, 2),
        ];
        let session = ReviewSession::parse(
            b"{\"a\"}",
            &FixedTokenizer(&TOKENS),
            ListSchema { items: &[("a", 1), ("b", 2)] },
            ReviewSettings::default(),
        )
        .unwrap();

        let mut key = DisplayBuf::<40>::new();
        let mut value = DisplayBuf::<40>::new();
        assert_eq!(
            session.get_item(0, 0, &mut key, &mut value),
            Err(Error::UnexpectedBufferEnd)
        );
        assert_eq!(
            session.get_item(1, 0, &mut key, &mut value),
            Err(Error::UnexpectedBufferEnd)
        );
        assert_eq!(session.validate(), Err(Error::UnexpectedBufferEnd));
    }
}
