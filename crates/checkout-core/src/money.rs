//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: integer currency units everywhere.                   │
//! │  A 10% discount on 25 units is 2 units, not 2.5: fractional        │
//! │  units are truncated toward zero, and we KNOW where that happens   │
//! │  (exactly one place: `percent_of`).                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! let price = Money::new(20);
//! let line = price * 3u32;              // 60 units
//! let off = line.percent_of(10);        // 6 units
//! assert_eq!((line - off).units(), 54);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: deductions can drive a net total negative; the engine
///   deliberately lets that pass through instead of clamping
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support so receipts serialize as plain numbers
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn new(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
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

    /// Computes `percent`% of this amount, truncating toward zero.
    ///
    /// This is the single place fractional units are discarded; every
    /// percentage discount in the engine funnels through it.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Money::new(25).percent_of(10).units(), 2); // 2.5 → 2
    /// assert_eq!(Money::new(40).percent_of(10).units(), 4);
    /// ```
    pub fn percent_of(&self, percent: u32) -> Money {
        // i128 to keep the intermediate product from overflowing
        let amount = (self.0 as i128 * percent as i128) / 100;
        Money(amount as i64)
    }

    /// Multiplies by a quantity (line subtotal, pair count, applied times).
    #[inline]
    pub const fn times(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the raw unit count; currency formatting is a caller concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Summing an iterator of Money values (folding line subtotals).
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
    fn test_new_and_units() {
        let money = Money::new(60);
        assert_eq!(money.units(), 60);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(100);
        let b = Money::new(40);

        assert_eq!((a + b).units(), 140);
        assert_eq!((a - b).units(), 60);
        assert_eq!((a * 3i64).units(), 300);
        assert_eq!(a.times(2).units(), 200);
    }

    #[test]
    fn test_percent_of_truncates_toward_zero() {
        // 25 × 10% = 2.5 → 2 (never rounds up)
        assert_eq!(Money::new(25).percent_of(10).units(), 2);
        assert_eq!(Money::new(19).percent_of(5).units(), 0);
        assert_eq!(Money::new(400).percent_of(15).units(), 60);
    }

    #[test]
    fn test_zero_and_sign_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::new(1).is_positive());
        assert!(Money::new(-1).is_negative());
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::new(50), Money::new(200), Money::new(60)]
            .into_iter()
            .sum();
        assert_eq!(total.units(), 310);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::new(520)), "520");
        assert_eq!(format!("{}", Money::new(-4)), "-4");
    }
}
