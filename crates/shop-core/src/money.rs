//! # Money Module
//!
//! Provides the `Money` and `Percentage` types for handling monetary values
//! and discount rates safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Fixed-point integers                                     │
//! │    Money       = hundredths of the currency unit (i64)                  │
//! │    Percentage  = basis points, 1 bps = 0.01% (u32)                      │
//! │    5400.00 × 10% = 540000 × 1000 / 10000 = 54000 (exact)                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Whenever a percentage of money does not land on a whole hundredth, the
//! result is rounded **half to even** (bankers rounding). Both the product
//! discount snapshot and the cart discount use [`Money::percentage_of`], so
//! every amount in the system is rounded the same way. The rounding itself
//! is done on [`rust_decimal::Decimal`]; storage stays in integer hundredths.
//!
//! ## Overflow
//! Addition, subtraction and quantity multiplication saturate at the `i64`
//! bounds instead of wrapping, so ordering between totals is preserved.
//!
//! ## Usage
//! ```rust
//! use shop_core::money::{Money, Percentage};
//!
//! let price: Money = "3000".parse().unwrap();
//! let rate: Percentage = "10".parse().unwrap();
//!
//! assert_eq!(price.percentage_of(rate).cents(), 30_000);
//! assert_eq!(price.apply_percentage_discount(rate).to_string(), "2700.00");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::iso;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Parse Error
// =============================================================================

/// Error returned when a decimal string cannot be read as Money or Percentage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDecimalError {
    #[error("empty value")]
    Empty,

    #[error("'{0}' is not a decimal number")]
    Malformed(String),

    #[error("'{0}' has more than two decimal places")]
    TooPrecise(String),

    #[error("'{0}' is out of range")]
    Overflow(String),

    #[error("'{0}' must not be negative")]
    Negative(String),
}

/// Reads a decimal string into a fixed-point integer with two decimal places.
///
/// `"12.5"` → 1250, `"-3"` → -300. Trailing zeros beyond the second decimal
/// place are accepted (`"10.000"`), any other extra precision is rejected.
fn parse_hundredths(input: &str) -> Result<i64, ParseDecimalError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ParseDecimalError::Empty);
    }

    let value = Decimal::from_str(s).map_err(|_| ParseDecimalError::Malformed(s.to_string()))?;
    let hundredths = value
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| ParseDecimalError::Overflow(s.to_string()))?;

    if !hundredths.fract().is_zero() {
        return Err(ParseDecimalError::TooPrecise(s.to_string()));
    }

    hundredths
        .to_i64()
        .ok_or_else(|| ParseDecimalError::Overflow(s.to_string()))
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in hundredths of the currency unit.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► discount ──► CartItem.unit_price ──► line_total      │
/// │                                                                         │
/// │  Σ line_total = sub_total ──► cart discount ──► final_total             │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from hundredths (the smallest currency unit).
    ///
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * 100)
    }

    /// Returns the value in hundredths.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the hundredths portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(270_000);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 540_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// The exact decimal value (`540_000` hundredths → `5400.00`).
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Rounds `value` half to even to hundredths, saturating at the `i64`
    /// bounds.
    pub fn from_decimal(value: Decimal) -> Money {
        let hundredths = value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|v| v.to_i64());

        match hundredths {
            Some(cents) => Money(cents),
            None if value.is_sign_negative() => Money(i64::MIN),
            None => Money(i64::MAX),
        }
    }

    /// Takes a percentage of this amount, rounded half to even to the
    /// nearest hundredth.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::{Money, Percentage};
    ///
    /// // 5400.00 × 10% = 540.00
    /// let amount = Money::from_cents(540_000);
    /// assert_eq!(amount.percentage_of(Percentage::from_bps(1000)).cents(), 54_000);
    ///
    /// // 0.25 × 10% = 0.025 → 0.02 (half to even)
    /// assert_eq!(Money::from_cents(25).percentage_of(Percentage::from_bps(1000)).cents(), 2);
    /// ```
    pub fn percentage_of(&self, rate: Percentage) -> Money {
        // i64 hundredths × at most 10_000 bps stays inside Decimal's 96-bit mantissa
        Money::from_decimal(self.to_decimal() * rate.to_fraction())
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ```rust
    /// use shop_core::money::{Money, Percentage};
    ///
    /// let price = Money::from_cents(300_000);
    /// let discounted = price.apply_percentage_discount(Percentage::from_bps(1000));
    /// assert_eq!(discounted.cents(), 270_000);
    /// ```
    pub fn apply_percentage_discount(&self, rate: Percentage) -> Money {
        *self - self.percentage_of(rate)
    }

    /// Formats with thousands separators and two decimals: `4,000.00`.
    ///
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(123_456_789).to_grouped_string(), "1,234,567.89");
    /// assert_eq!(Money::from_cents(-50).to_grouped_string(), "-0.50");
    /// ```
    pub fn to_grouped_string(&self) -> String {
        // en-US grouping with the symbol stripped; the caller picks the symbol
        let grouped = rusty_money::Money::from_minor(self.0.saturating_abs(), iso::USD).to_string();
        let digits = grouped.trim_start_matches('$');

        if self.0 < 0 {
            format!("-{digits}")
        } else {
            digits.to_string()
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`5400.00`, `-5.50`). Currency symbols are a
/// presentation concern, see [`crate::message`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl FromStr for Money {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hundredths(s).map(Money)
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
        *self = *self + other;
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
        *self = *self - other;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A percentage in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so any rate with up to two decimal
/// places is exact: 1000 bps = 10%, 1250 bps = 12.5%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(u32);

impl Percentage {
    /// 100%.
    pub const HUNDRED: Percentage = Percentage(10_000);

    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from a whole number of percent.
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        Percentage(percent * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The rate as a fraction of one (1000 bps → `0.1000`).
    #[inline]
    pub fn to_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

/// Renders without a trailing `%` and without insignificant zeros:
/// 1000 → `10`, 1250 → `12.5`, 1225 → `12.25`.
impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}", whole, frac)
        }
    }
}

impl FromStr for Percentage {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hundredths = parse_hundredths(s)?;
        if hundredths < 0 {
            return Err(ParseDecimalError::Negative(s.trim().to_string()));
        }
        u32::try_from(hundredths)
            .map(Percentage)
            .map_err(|_| ParseDecimalError::Overflow(s.trim().to_string()))
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
        assert_eq!(Money::from_units(5000).cents(), 500_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-50).to_string(), "-0.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_grouped_string() {
        assert_eq!(Money::from_cents(400_000).to_grouped_string(), "4,000.00");
        assert_eq!(Money::from_cents(99_999).to_grouped_string(), "999.99");
        assert_eq!(Money::from_cents(100_000_000).to_grouped_string(), "1,000,000.00");
        assert_eq!(Money::zero().to_grouped_string(), "0.00");
        assert_eq!(Money::from_cents(-114_000).to_grouped_string(), "-1,140.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX - 1);

        assert_eq!(huge + Money::from_cents(10), Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(i64::MIN + 1) - Money::from_cents(10), Money::from_cents(i64::MIN));
        assert_eq!(Money::from_units(1000).multiply_quantity(100_000_000_000_000).cents(), i64::MAX);

        let total: Money = vec![huge, huge].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!(huge.percentage_of(Percentage::HUNDRED), huge);
    }

    #[test]
    fn test_decimal_conversion() {
        assert_eq!(Money::from_cents(540_000).to_decimal().to_string(), "5400.00");
        assert_eq!(Money::from_decimal(Decimal::new(2_5, 3)).cents(), 2);
        assert_eq!(Money::from_decimal(Decimal::new(3_5, 3)).cents(), 4);
        assert_eq!(Percentage::from_bps(1250).to_fraction().to_string(), "0.1250");
    }

    #[test]
    fn test_percentage_of_exact() {
        let subtotal = Money::from_cents(540_000);
        assert_eq!(subtotal.percentage_of(Percentage::from_percent(10)).cents(), 54_000);
    }

    #[test]
    fn test_percentage_of_rounds_half_to_even() {
        let ten = Percentage::from_percent(10);
        // 0.25 × 10% = 0.025 → 0.02
        assert_eq!(Money::from_cents(25).percentage_of(ten).cents(), 2);
        // 0.35 × 10% = 0.035 → 0.04
        assert_eq!(Money::from_cents(35).percentage_of(ten).cents(), 4);
        // 9.99 × 12.5% = 1.24875 → 1.25 (not a midpoint)
        assert_eq!(Money::from_cents(999).percentage_of(Percentage::from_bps(1250)).cents(), 125);
        // negative amounts mirror positive ones
        assert_eq!(Money::from_cents(-25).percentage_of(ten).cents(), -2);
        assert_eq!(Money::from_cents(-35).percentage_of(ten).cents(), -4);
    }

    #[test]
    fn test_percentage_discount() {
        let price = Money::from_cents(300_000);
        assert_eq!(price.apply_percentage_discount(Percentage::from_percent(10)).cents(), 270_000);
        assert_eq!(price.apply_percentage_discount(Percentage::zero()), price);
        assert_eq!(price.apply_percentage_discount(Percentage::HUNDRED), Money::zero());
    }

    #[test]
    fn test_parse_money() {
        assert_eq!("5000".parse::<Money>().unwrap().cents(), 500_000);
        assert_eq!("4999.99".parse::<Money>().unwrap().cents(), 499_999);
        assert_eq!("0.5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("10.000".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!(" -3 ".parse::<Money>().unwrap().cents(), -300);

        assert_eq!("".parse::<Money>(), Err(ParseDecimalError::Empty));
        assert!(matches!("abc".parse::<Money>(), Err(ParseDecimalError::Malformed(_))));
        assert!(matches!("1.2.3".parse::<Money>(), Err(ParseDecimalError::Malformed(_))));
        assert!(matches!("1.005".parse::<Money>(), Err(ParseDecimalError::TooPrecise(_))));
        assert!(matches!(
            "99999999999999999999".parse::<Money>(),
            Err(ParseDecimalError::Overflow(_))
        ));
    }

    #[test]
    fn test_percentage_parse_and_display() {
        assert_eq!("10".parse::<Percentage>().unwrap().bps(), 1000);
        assert_eq!("12.5".parse::<Percentage>().unwrap().bps(), 1250);
        assert_eq!("0.01".parse::<Percentage>().unwrap().bps(), 1);
        assert!(matches!("-1".parse::<Percentage>(), Err(ParseDecimalError::Negative(_))));

        assert_eq!(Percentage::from_bps(1000).to_string(), "10");
        assert_eq!(Percentage::from_bps(1250).to_string(), "12.5");
        assert_eq!(Percentage::from_bps(1225).to_string(), "12.25");
        assert_eq!(Percentage::from_bps(5).to_string(), "0.05");
        assert_eq!(Percentage::zero().to_string(), "0");
    }
}
