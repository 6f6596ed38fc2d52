//! Denomination table and fixed-point conversion.
//!
//! On-chain amounts are integers in the smallest unit of an asset
//! (`ukava` is 10^-6 KAVA). Outside expert mode, known base denominations
//! are shown in whole units with their ticker instead.

use common::constants::{AMOUNT_BUFFER_LEN, AMOUNT_SCRATCH_LEN};
use common::Error;

use crate::buffer::DisplayBuf;

/// A known base denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denomination {
    /// On-chain smallest-unit name.
    pub base: &'static str,
    /// Ticker shown to the user.
    pub symbol: &'static str,
    /// Number of fractional digits of one whole unit.
    pub decimals: u8,
}

/// Base denominations translated outside expert mode.
pub const DENOMINATIONS: &[Denomination] = &[
    Denomination { base: "ukava", symbol: "KAVA", decimals: 6 },
    Denomination { base: "usdx", symbol: "USDX", decimals: 6 },
    Denomination { base: "uatom", symbol: "ATOM", decimals: 6 },
    Denomination { base: "bnb", symbol: "BNB", decimals: 8 },
    Denomination { base: "btcb", symbol: "BTCB", decimals: 8 },
    Denomination { base: "busd", symbol: "BUSD", decimals: 8 },
    Denomination { base: "erc20/multichain/usdc", symbol: "USDC", decimals: 6 },
    Denomination { base: "erc20/tether/usdt", symbol: "USDT", decimals: 6 },
];

/// Finds the table entry whose base equals `denom` exactly.
pub fn lookup(denom: &[u8]) -> Option<&'static Denomination> {
    DENOMINATIONS
        .iter()
        .find(|entry| entry.base.as_bytes() == denom)
}

/// Writes `"<amount scaled by decimals> <symbol>"` into `out`.
pub fn convert_denomination(
    amount: &[u8],
    denomination: &Denomination,
    out: &mut DisplayBuf<AMOUNT_BUFFER_LEN>,
) -> Result<(), Error> {
    if amount.len() >= AMOUNT_SCRATCH_LEN {
        return Err(Error::UnexpectedError);
    }
    let mut digits = DisplayBuf::<AMOUNT_SCRATCH_LEN>::new();
    digits.try_push(amount)?;

    let mut formatted = DisplayBuf::<AMOUNT_SCRATCH_LEN>::new();
    format_fixed_point(digits.as_bytes(), denomination.decimals, &mut formatted)
        .map_err(|_| Error::UnexpectedError)?;

    out.clear();
    out.try_push(formatted.as_bytes())
        .and_then(|_| out.try_push(b" "))
        .and_then(|_| out.try_push(denomination.symbol.as_bytes()))
        .map_err(|_| Error::UnexpectedError)
}

/// Formats an unsigned integer string with the decimal point moved
/// `decimals` places to the left.
///
/// Redundant leading zeros are dropped; trailing fractional zeros are
/// trimmed down to a single digit, so `1000000` at 6 decimals is `1.0`.
pub fn format_fixed_point<const N: usize>(
    digits: &[u8],
    decimals: u8,
    out: &mut DisplayBuf<N>,
) -> Result<(), Error> {
    out.clear();
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(Error::UnexpectedError);
    }

    let first_nonzero = digits
        .iter()
        .position(|&d| d != b'0')
        .unwrap_or(digits.len());
    let digits = &digits[first_nonzero..];
    let decimals = usize::from(decimals);

    if decimals == 0 {
        let integer: &[u8] = if digits.is_empty() { b"0" } else { digits };
        return out.try_push(integer);
    }

    let (integer, fraction, padding) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (&digits[..split], &digits[split..], 0)
    } else {
        (&b"0"[..], digits, decimals - digits.len())
    };

    // Fraction is `padding` zeros followed by `fraction`; trim its zeros.
    let fraction = match fraction.iter().rposition(|&d| d != b'0') {
        Some(last) => &fraction[..=last],
        None => &fraction[..0],
    };
    let padding = if fraction.is_empty() { 1 } else { padding };

    out.try_push(integer)?;
    out.try_push(b".")?;
    for _ in 0..padding {
        out.try_push(b"0")?;
    }
    out.try_push(fraction)
}
