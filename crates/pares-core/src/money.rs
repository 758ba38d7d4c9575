//! # Money Module
//!
//! Provides the `Money` type for peso amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A ₱12.10 add-on ×3 on a ₱99.90 bowl would drift the same way.         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    9990 + 1210 × 3 = 13620 centavos = ₱136.20, exactly                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pares_core::money::Money;
//!
//! let bowl = Money::from_pesos(120);          // ₱120.00
//! let egg = Money::from_centavos(1550);       // ₱15.50
//!
//! let total = bowl + egg * 2;
//! assert_eq!(total.to_string(), "₱151.00");
//! assert_eq!(total.message_amount(), "151");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Currency symbol used in every customer-facing amount.
pub const PESO_SIGN: &str = "₱";

// =============================================================================
// Money Type
// =============================================================================

/// A peso amount in centavos (1/100 peso).
///
/// ## Where Money Flows
/// ```text
/// MenuItem.base_price ─┬─► pricing::unit_price ──► CartItem.total_price
/// Variation.price ─────┤                                 │
/// AddOn.price × qty ───┘                                 ▼
///                                        CartItem.line_total ──► Cart.total_price
///                                                                    │
///                                            "💰 TOTAL: ₱240" ◄──────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ```rust
    /// use pares_core::money::Money;
    ///
    /// assert_eq!(Money::from_centavos(1099).centavos(), 1099);
    /// ```
    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Creates a Money value from whole pesos.
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos * 100)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero pesos.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use pares_core::money::Money;
    ///
    /// let unit = Money::from_pesos(120);
    /// assert_eq!(unit.multiply_quantity(2), Money::from_pesos(240));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Adds without overflowing; the cart total uses this so that it is a
    /// total function over any cart.
    #[inline]
    pub const fn saturating_add(self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Formats the amount the way the order message prints it.
    ///
    /// Whole pesos print without decimals (`240`), anything with centavos
    /// prints with two decimals (`125.50`). No currency sign.
    ///
    /// ```rust
    /// use pares_core::money::Money;
    ///
    /// assert_eq!(Money::from_pesos(240).message_amount(), "240");
    /// assert_eq!(Money::from_centavos(12550).message_amount(), "125.50");
    /// ```
    pub fn message_amount(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        if self.centavos_part() == 0 {
            format!("{}{}", sign, self.pesos().abs())
        } else {
            format!("{}{}.{:02}", sign, self.pesos().abs(), self.centavos_part())
        }
    }

    /// Percentage saved going from `self` (the regular price) down to
    /// `discounted`, rounded half up like the menu badge shows it.
    ///
    /// Returns 0 when the regular price is not positive.
    ///
    /// ```rust
    /// use pares_core::money::Money;
    ///
    /// let pct = Money::from_pesos(150).percent_off(Money::from_pesos(120));
    /// assert_eq!(pct, 20);
    /// ```
    pub fn percent_off(&self, discounted: Money) -> i64 {
        if self.0 <= 0 {
            return 0;
        }
        let saved = (self.0 - discounted.0) as i128;
        let base = self.0 as i128;
        // round(saved / base × 100) with halves going up
        ((saved * 200 + base) / (2 * base)) as i64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal display with the peso sign, e.g. `₱120.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            PESO_SIGN,
            self.pesos().abs(),
            self.centavos_part()
        )
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pesos_and_centavos() {
        let money = Money::from_centavos(12550);
        assert_eq!(money.pesos(), 125);
        assert_eq!(money.centavos_part(), 50);
        assert_eq!(Money::from_pesos(80).centavos(), 8000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_pesos(120).to_string(), "₱120.00");
        assert_eq!(Money::from_centavos(1099).to_string(), "₱10.99");
        assert_eq!(Money::from_centavos(-550).to_string(), "-₱5.50");
        assert_eq!(Money::zero().to_string(), "₱0.00");
    }

    #[test]
    fn test_message_amount() {
        assert_eq!(Money::from_pesos(240).message_amount(), "240");
        assert_eq!(Money::zero().message_amount(), "0");
        assert_eq!(Money::from_centavos(12505).message_amount(), "125.05");
        assert_eq!(Money::from_centavos(-250).message_amount(), "-2.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pesos(10);
        let b = Money::from_pesos(5);

        assert_eq!((a + b).centavos(), 1500);
        assert_eq!((a - b).centavos(), 500);
        assert_eq!((a * 3i64).centavos(), 3000);
        assert_eq!((a * 2).centavos(), 2000);
    }

    #[test]
    fn test_sum_saturates() {
        let total: Money = vec![Money::from_centavos(i64::MAX), Money::from_pesos(1)]
            .into_iter()
            .sum();
        assert_eq!(total.centavos(), i64::MAX);

        let total: Money = vec![Money::from_pesos(1), Money::from_pesos(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_pesos(3));
    }

    #[test]
    fn test_percent_off_rounds_half_up() {
        assert_eq!(Money::from_pesos(100).percent_off(Money::from_pesos(80)), 20);
        // 1/3 off = 33.33% → 33
        assert_eq!(Money::from_pesos(150).percent_off(Money::from_pesos(100)), 33);
        // 2.5% off → 3
        assert_eq!(Money::from_pesos(200).percent_off(Money::from_pesos(195)), 3);
        assert_eq!(Money::zero().percent_off(Money::zero()), 0);
    }
}
