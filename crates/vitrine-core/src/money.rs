//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    79.90 + 5.10 = 84.99999999999999  ❌ WRONG!                          │
//! │                                                                         │
//! │  A product page that sums option prices in floats drifts by a cent    │
//! │  and then disagrees with the cart total.                               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    7990 + 510 = 8500 cents  →  "R$ 85,00"                              │
//! │    Strings only exist at the presentation boundary                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Presentation Boundary
//! ```text
//!   user input "R$ 79,90" ──► Money::parse ──► Money(7990) ──► pricing, cart
//!                                                   │
//!   "R$ 79,90" ◄── Money::format / format_with ◄────┘
//! ```
//! Nothing outside this module converts between cents and strings.
//!
//! ## Usage
//! ```rust
//! use vitrine_core::money::Money;
//!
//! let price = Money::from_cents(7990);
//! let total = price * 2u32 + Money::from_cents(500);
//! assert_eq!(total.format(), "R$ 164,80");
//!
//! // Garbled input is "no price", never an error
//! assert_eq!(Money::parse("abc"), Money::zero());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos for BRL).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences such as "remaining to minimum" may be
///   computed before clamping
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating arithmetic**: a pathological catalog can never panic a
///   checkout flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::money::Money;
    ///
    /// let price = Money::from_cents(7990); // R$ 79,90
    /// assert_eq!(price.cents(), 7990);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5,50, not -4,50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (reais) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(800);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 1600);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Parses a display string into money.
    ///
    /// ## Accepted Shapes
    /// ```text
    /// ┌──────────────────────┬──────────┬─────────────────────────────────┐
    /// │ Input                │ Cents    │ Why                             │
    /// ├──────────────────────┼──────────┼─────────────────────────────────┤
    /// │ "R$ 79,90"           │ 7990     │ symbol stripped, comma decimal  │
    /// │ "79.90"              │ 7990     │ dot decimal                     │
    /// │ "R$ 1.234,56"        │ 123456   │ dot groups, comma decimal       │
    /// │ "1,234.56"           │ 123456   │ comma groups, dot decimal       │
    /// │ "1.234"              │ 123400   │ 3 digits after ⇒ grouping       │
    /// │ "12,5"               │ 1250     │ one decimal digit               │
    /// │ "80 BRL"             │ 8000     │ trailing code stripped          │
    /// │ "abc", "", "1a2"     │ 0        │ malformed ⇒ no price            │
    /// └──────────────────────┴──────────┴─────────────────────────────────┘
    /// ```
    ///
    /// The last separator is the decimal separator only when 1 or 2 digits
    /// follow it. Malformed or overflowing input yields zero, never an error.
    pub fn parse(display: &str) -> Money {
        parse_cents(display).map(Money).unwrap_or_default()
    }

    /// Formats with the default store currency (BRL): `"R$ 79,90"`.
    pub fn format(&self) -> String {
        self.format_with(&CurrencyFormat::default())
    }

    /// Formats with an explicit currency format.
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::money::{CurrencyFormat, Money};
    ///
    /// let price = Money::from_cents(123456);
    /// assert_eq!(price.format_with(&CurrencyFormat::brl()), "R$ 1.234,56");
    /// assert_eq!(price.format_with(&CurrencyFormat::usd()), "$1,234.56");
    /// ```
    pub fn format_with(&self, format: &CurrencyFormat) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let grouped = group_thousands(abs / 100, format.thousands_separator);
        let space = if format.space_after_symbol { " " } else { "" };

        format!(
            "{}{}{}{}{}{:02}",
            sign,
            format.symbol,
            space,
            grouped,
            format.decimal_separator,
            abs % 100
        )
    }
}

/// Strips symbols and separators, returning `None` for anything malformed.
fn parse_cents(display: &str) -> Option<i64> {
    let mut negative = false;
    let mut body = display.trim();

    if let Some(rest) = body.strip_prefix('-') {
        negative = true;
        body = rest;
    }

    // Leading symbol ("R$", "$", "BRL") and trailing code ("BRL")
    body = body.trim_start_matches(|c: char| !is_amount_char(c) && c != '-');
    if let Some(rest) = body.strip_prefix('-') {
        if negative {
            return None;
        }
        negative = true;
        body = rest;
    }
    body = body.trim_end_matches(|c: char| !is_amount_char(c));

    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    if !compact.chars().all(is_amount_char) || !compact.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let decimal_at = compact
        .rfind([',', '.'])
        .filter(|&at| (1..=2).contains(&(compact.len() - at - 1)));

    let (whole, fraction) = match decimal_at {
        Some(at) => (&compact[..at], &compact[at + 1..]),
        None => (compact.as_str(), ""),
    };

    let whole_digits: String = whole.chars().filter(char::is_ascii_digit).collect();
    let major: i64 = if whole_digits.is_empty() {
        0
    } else {
        whole_digits.parse().ok()?
    };
    let minor: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    let cents = major.checked_mul(100)?.checked_add(minor)?;
    Some(if negative { -cents } else { cents })
}

fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || c == ',' || c == '.'
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }

    out
}

// =============================================================================
// Currency Format
// =============================================================================

/// How a store displays money.
///
/// ## Presets
/// - [`CurrencyFormat::brl`]: `R$ 1.234,56` (default)
/// - [`CurrencyFormat::usd`]: `$1,234.56`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrencyFormat {
    /// Symbol printed before the amount.
    pub symbol: String,

    /// Separator between major and minor units.
    pub decimal_separator: char,

    /// Separator between groups of three major digits.
    pub thousands_separator: char,

    /// Whether a space follows the symbol.
    pub space_after_symbol: bool,
}

impl CurrencyFormat {
    /// Brazilian real: `R$ 79,90`.
    pub fn brl() -> Self {
        CurrencyFormat {
            symbol: "R$".to_string(),
            decimal_separator: ',',
            thousands_separator: '.',
            space_after_symbol: true,
        }
    }

    /// US dollar: `$79.90`.
    pub fn usd() -> Self {
        CurrencyFormat {
            symbol: "$".to_string(),
            decimal_separator: '.',
            thousands_separator: ',',
            space_after_symbol: false,
        }
    }

    /// Looks up a preset by ISO 4217 code (case-insensitive).
    pub fn for_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "BRL" => Some(CurrencyFormat::brl()),
            "USD" => Some(CurrencyFormat::usd()),
            _ => None,
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::brl()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the default store currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(7990);
        assert_eq!(money.cents(), 7990);
        assert_eq!(money.major(), 79);
        assert_eq!(money.minor_part(), 90);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(79, 90).cents(), 7990);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(Money::from_cents(7990).format(), "R$ 79,90");
        assert_eq!(Money::from_cents(500).format(), "R$ 5,00");
        assert_eq!(Money::from_cents(0).format(), "R$ 0,00");
        assert_eq!(Money::from_cents(5).format(), "R$ 0,05");
        assert_eq!(Money::from_cents(123456).format(), "R$ 1.234,56");
        assert_eq!(Money::from_cents(123456789).format(), "R$ 1.234.567,89");
        assert_eq!(Money::from_cents(-550).format(), "-R$ 5,50");
    }

    #[test]
    fn test_format_usd() {
        let usd = CurrencyFormat::usd();
        assert_eq!(Money::from_cents(1099).format_with(&usd), "$10.99");
        assert_eq!(Money::from_cents(100000).format_with(&usd), "$1,000.00");
    }

    #[test]
    fn test_display_matches_format() {
        assert_eq!(format!("{}", Money::from_cents(24990)), "R$ 249,90");
    }

    #[test]
    fn test_parse_decimal_separators() {
        assert_eq!(Money::parse("R$ 79,90").cents(), 7990);
        assert_eq!(Money::parse("79.90").cents(), 7990);
        assert_eq!(Money::parse("R$ 1.234,56").cents(), 123456);
        assert_eq!(Money::parse("1,234.56").cents(), 123456);
        assert_eq!(Money::parse("12,5").cents(), 1250);
        assert_eq!(Money::parse(",5").cents(), 50);
    }

    #[test]
    fn test_parse_whole_amounts() {
        assert_eq!(Money::parse("80").cents(), 8000);
        assert_eq!(Money::parse("1.234").cents(), 123400);
        assert_eq!(Money::parse("R$ 1.234.567").cents(), 123456700);
        assert_eq!(Money::parse("80 BRL").cents(), 8000);
        assert_eq!(Money::parse("  R$80  ").cents(), 8000);
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(Money::parse("-5,50").cents(), -550);
        assert_eq!(Money::parse("R$ -5,50").cents(), -550);
        assert_eq!(Money::parse("--5").cents(), 0);
    }

    #[test]
    fn test_parse_malformed_is_zero() {
        assert_eq!(Money::parse(""), Money::zero());
        assert_eq!(Money::parse("abc"), Money::zero());
        assert_eq!(Money::parse("R$"), Money::zero());
        assert_eq!(Money::parse("12abc34"), Money::zero());
        assert_eq!(Money::parse(",."), Money::zero());
        assert_eq!(Money::parse("99999999999999999999999"), Money::zero());
    }

    #[test]
    fn test_parse_accepts_formatted_output() {
        for cents in [0, 5, 7990, 24990, 123456, 100000000] {
            let money = Money::from_cents(cents);
            assert_eq!(Money::parse(&money.format()), money);
        }
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3u32).cents(), 3000);
        assert_eq!((a * 2i64).cents(), 2000);

        let mut c = a;
        c += b;
        c -= Money::from_cents(200);
        assert_eq!(c.cents(), 1300);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 650].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 1000);
    }

    #[test]
    fn test_saturating_arithmetic() {
        let huge = Money::from_cents(i64::MAX);
        assert_eq!((huge + Money::from_cents(1)).cents(), i64::MAX);
        assert_eq!(huge.multiply_quantity(2).cents(), i64::MAX);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }

    #[test]
    fn test_currency_for_code() {
        assert_eq!(CurrencyFormat::for_code("brl"), Some(CurrencyFormat::brl()));
        assert_eq!(CurrencyFormat::for_code(" USD "), Some(CurrencyFormat::usd()));
        assert_eq!(CurrencyFormat::for_code("EUR"), None);
    }
}
