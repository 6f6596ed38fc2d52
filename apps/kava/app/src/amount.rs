//! Monetary amount formatting.
//!
//! An amount is a coin object `{"amount": "<digits>", "denom": "<name>"}`,
//! optionally wrapped in an array. The object is matched rigidly: exactly
//! two members, `amount` first and `denom` second. Anything else is
//! rejected rather than guessed at.

use common::constants::{AMOUNT_BUFFER_LEN, EMPTY_AMOUNT};
use common::{Error, TokenKind};

use crate::buffer::DisplayBuf;
use crate::denom;
use crate::paging;
use crate::tokens::TokenView;

/// Key paths whose value is a coin or a list of coins.
const AMOUNT_KEYS: &[&str] = &[
    "fee/amount",
    "msgs/inputs/coins",
    "msgs/outputs/coins",
    "msgs/value/amount",
    "msgs/value/collateral",
    "msgs/value/principal",
    "msgs/value/payment",
];

/// Child tokens of a well-formed coin object: two keys, two values.
const COIN_ELEMENTS: usize = 4;

/// Returns true if the value under `key` must be formatted as an amount.
pub fn is_amount(key: &[u8]) -> bool {
    AMOUNT_KEYS.iter().any(|candidate| candidate.as_bytes() == key)
}

/// Amount and denomination of a coin object whose shape has been checked.
#[derive(Debug, Clone, Copy)]
pub struct AmountView<'a> {
    pub amount: &'a [u8],
    pub denom: &'a [u8],
}

impl<'a> AmountView<'a> {
    /// Checks the coin object at `idx` and extracts its two values.
    ///
    /// The caller has already counted `COIN_ELEMENTS` children.
    pub fn new(view: &TokenView<'a>, idx: usize) -> Result<Self, Error> {
        if view.kind(idx)? != TokenKind::Object {
            return Err(Error::UnexpectedField);
        }
        if !view.equals(idx + 1, "amount") || !view.equals(idx + 3, "denom") {
            return Err(Error::UnexpectedField);
        }
        if !view.token(idx + 2)?.is_scalar() || !view.token(idx + 4)?.is_scalar() {
            return Err(Error::UnexpectedField);
        }

        let amount = view.bytes(idx + 2)?;
        let denom = view.bytes(idx + 4)?;
        if amount.is_empty() || denom.is_empty() {
            return Err(Error::UnexpectedBufferEnd);
        }
        Ok(Self { amount, denom })
    }
}

/// Renders page `page_idx` of the amount at `token_idx` into `out`.
///
/// Returns the page count.
pub fn format_amount<const N: usize>(
    view: &TokenView<'_>,
    token_idx: usize,
    expert_mode: bool,
    page_idx: u8,
    out: &mut DisplayBuf<N>,
) -> Result<u8, Error> {
    out.clear();
    let mut idx = token_idx;

    if view.kind(idx)? == TokenKind::Array {
        match view.element_count(idx)? {
            0 => return render_empty(page_idx, out),
            1 => idx += 1,
            // Only one coin would fit the fixed layout; never hide the rest.
            _ => return Err(Error::UnexpectedField),
        }
    }

    let token = view.token(idx)?;
    match view.element_count(idx)? {
        0 if token.is_container() => return render_empty(page_idx, out),
        COIN_ELEMENTS => {}
        _ => return Err(Error::UnexpectedField),
    }

    let coin = AmountView::new(view, idx)?;
    if coin.amount.len() + coin.denom.len() + 1 > AMOUNT_BUFFER_LEN {
        return Err(Error::UnexpectedBufferEnd);
    }

    let mut full = DisplayBuf::<AMOUNT_BUFFER_LEN>::new();
    match denom::lookup(coin.denom).filter(|_| !expert_mode) {
        Some(denomination) => denom::convert_denomination(coin.amount, denomination, &mut full)?,
        None => {
            full.try_push(coin.amount)?;
            full.try_push(b" ")?;
            full.try_push(coin.denom)?;
        }
    }

    paging::page_into(full.as_bytes(), page_idx, out)
}

fn render_empty<const N: usize>(page_idx: u8, out: &mut DisplayBuf<N>) -> Result<u8, Error> {
    paging::page_into(EMPTY_AMOUNT.as_bytes(), page_idx, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::test_utils::JsonTokenizer;
    use common::{Token, Tokenizer};

    struct Fixture {
        raw: &'static [u8],
        tokens: [Token; 32],
        count: usize,
    }

    impl Fixture {
        fn new(raw: &'static str) -> Self {
            let mut tokens = [Token::default(); 32];
            let count = JsonTokenizer.tokenize(raw.as_bytes(), &mut tokens).unwrap();
            Self { raw: raw.as_bytes(), tokens, count }
        }

        fn view(&self) -> TokenView<'_> {
            TokenView::new(self.raw, &self.tokens[..self.count])
        }

        fn format(&self, expert_mode: bool) -> Result<DisplayBuf<64>, Error> {
            let mut out = DisplayBuf::<64>::new();
            format_amount(&self.view(), 0, expert_mode, 0, &mut out)?;
            Ok(out)
        }
    }

    #[test]
    fn test_is_amount() {
        assert!(is_amount(b"fee/amount"));
        assert!(is_amount(b"msgs/value/principal"));
        assert!(is_amount(b"msgs/inputs/coins"));
        assert!(!is_amount(b"fee/gas"));
        assert!(!is_amount(b"msgs/value/amount/"));
        assert!(!is_amount(b"fee/amoun"));
        assert!(!is_amount(b""));
    }

    #[test]
    fn test_known_denomination() {
        let fixture = Fixture::new(r#"{"amount":"1000000","denom":"ukava"}"#);
        assert_eq!(fixture.format(false).unwrap().as_str(), Some("1.0 KAVA"));

        let fixture = Fixture::new(r#"[{"amount":"2500000","denom":"usdx"}]"#);
        assert_eq!(fixture.format(false).unwrap().as_str(), Some("2.5 USDX"));
    }

    #[test]
    fn test_unknown_denomination_is_verbatim() {
        let fixture = Fixture::new(r#"{"amount":"42","denom":"unknowndenom"}"#);
        assert_eq!(fixture.format(false).unwrap().as_str(), Some("42 unknowndenom"));

        let fixture = Fixture::new(r#"{"amount":"007","denom":"hard"}"#);
        assert_eq!(fixture.format(false).unwrap().as_str(), Some("007 hard"));
    }

    #[test]
    fn test_expert_mode_is_verbatim() {
        let fixture = Fixture::new(r#"{"amount":"1000000","denom":"ukava"}"#);
        assert_eq!(fixture.format(true).unwrap().as_str(), Some("1000000 ukava"));
    }

    #[test]
    fn test_empty_amounts() {
        for raw in [r#"[]"#, r#"{}"#] {
            let fixture = Fixture::new(raw);
            let mut out = DisplayBuf::<64>::new();
            assert_eq!(format_amount(&fixture.view(), 0, false, 0, &mut out), Ok(1));
            assert_eq!(out.as_str(), Some("Empty"));
        }
    }

    #[test]
    fn test_shape_mismatch() {
        for raw in [
            r#"{"amount":"1"}"#,
            r#"{"amount":"1","denom":"ukava","extra":"x"}"#,
            r#"{"denom":"ukava","amount":"1"}"#,
            r#"{"amount":"1","Denom":"ukava"}"#,
            r#"{"amount":{"v":"1"},"denom":"ukava"}"#,
            r#"[{"amount":"1","denom":"ukava"},{"amount":"2","denom":"usdx"}]"#,
            r#"["1ukava"]"#,
            r#""1ukava""#,
        ] {
            let fixture = Fixture::new(raw);
            assert_eq!(fixture.format(false).err(), Some(Error::UnexpectedField), "{}", raw);
        }
    }

    #[test]
    fn test_empty_values() {
        for raw in [
            r#"{"amount":"","denom":"ukava"}"#,
            r#"{"amount":"1","denom":""}"#,
        ] {
            let fixture = Fixture::new(raw);
            assert_eq!(fixture.format(false).err(), Some(Error::UnexpectedBufferEnd), "{}", raw);
        }
    }

    #[test]
    fn test_conversion_failure() {
        let fixture = Fixture::new(r#"{"amount":"1.5","denom":"ukava"}"#);
        assert_eq!(fixture.format(false).err(), Some(Error::UnexpectedError));

        // Same input is shown verbatim when nothing is converted.
        assert_eq!(fixture.format(true).unwrap().as_str(), Some("1.5 ukava"));
    }

    #[test]
    fn test_oversized_amount() {
        let mut raw = [b'1'; 200];
        let prefix = br#"{"amount":""#;
        let suffix = br#"","denom":"ukava"}"#;
        raw[..prefix.len()].copy_from_slice(prefix);
        let digits_end = 180;
        raw[digits_end..digits_end + suffix.len()].copy_from_slice(suffix);
        let raw = &raw[..digits_end + suffix.len()];

        let mut tokens = [Token::default(); 8];
        let count = JsonTokenizer.tokenize(raw, &mut tokens).unwrap();
        let view = TokenView::new(raw, &tokens[..count]);
        let mut out = DisplayBuf::<64>::new();
        assert_eq!(
            format_amount(&view, 0, true, 0, &mut out),
            Err(Error::UnexpectedBufferEnd)
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_amount_capacity_boundary() {
        let prefix = br#"{"amount":""#;
        let suffix = br#"","denom":"ukava"}"#;
        // Digits plus one space plus "ukava" fill the amount buffer exactly.
        let fitting = AMOUNT_BUFFER_LEN - 1 - b"ukava".len();

        let cases = [(fitting, Ok(3)), (fitting + 1, Err(Error::UnexpectedBufferEnd))];
        for (digits, expected) in cases {
            let mut raw = [b'7'; 256];
            raw[..prefix.len()].copy_from_slice(prefix);
            let digits_end = prefix.len() + digits;
            raw[digits_end..digits_end + suffix.len()].copy_from_slice(suffix);
            let raw = &raw[..digits_end + suffix.len()];

            let mut tokens = [Token::default(); 8];
            let count = JsonTokenizer.tokenize(raw, &mut tokens).unwrap();
            let view = TokenView::new(raw, &tokens[..count]);
            let mut out = DisplayBuf::<64>::new();
            assert_eq!(format_amount(&view, 0, true, 0, &mut out), expected, "{}", digits);
        }
    }

    #[test]
    fn test_paged_amount() {
        let fixture = Fixture::new(
            r#"{"amount":"123456789012345678901234567890","denom":"someverylongdenomination"}"#,
        );
        let mut out = DisplayBuf::<20>::new();
        let view = fixture.view();
        assert_eq!(format_amount(&view, 0, false, 0, &mut out), Ok(3));
        assert_eq!(out.as_str(), Some("12345678901234567890"));
        assert_eq!(format_amount(&view, 0, false, 2, &mut out), Ok(3));
        assert_eq!(out.as_str(), Some("ongdenomination"));
    }

    #[test]
    fn test_malformed_spans() {
        let raw = br#"{"amount":"1","denom":"ukava"}"#;
        let tokens = [
            Token::new(TokenKind::Object, 0, raw.len() as i32),
            Token::new(TokenKind::String, 2, 8),
            Token::new(TokenKind::String, 11, 12),
            Token::new(TokenKind::String, 15, 20),
            Token::new(TokenKind::String, 23, 22),
        ];
        let view = TokenView::new(raw, &tokens);
        let mut out = DisplayBuf::<64>::new();
        assert_eq!(
            format_amount(&view, 0, false, 0, &mut out),
            Err(Error::UnexpectedBufferEnd)
        );
    }
}
