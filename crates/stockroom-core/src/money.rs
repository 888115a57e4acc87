//! # Money
//!
//! Unit costs and stock valuations, held as whole cents.
//!
//! ```text
//! cost  $12.50 ──► Money(1250)
//! worth = cost × amount      (saturates, never panics)
//! total = Σ worth            (saturates, never panics)
//! ```
//!
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let cost = Money::from_cents(1250);
//! assert_eq!((cost * 4u32).cents(), 5000);
//! assert_eq!(cost.to_string(), "$12.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

/// An amount of money in cents.
///
/// Arithmetic saturates at the `i64` bounds so that valuing a large stock
/// can't overflow. Item costs are never negative; validation enforces that.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "${}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

/// Cost of `qty` units.
impl Mul<u32> for Money {
    type Output = Money;

    #[inline]
    fn mul(self, qty: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(qty)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_quantity_multiplication() {
        let cost = Money::from_cents(299);
        assert_eq!((cost * 3u32).cents(), 897);
        assert_eq!((cost * 0u32).cents(), 0);
        assert_eq!((Money::zero() * 40u32).cents(), 0);
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!((huge * 4u32).cents(), i64::MAX);
        assert_eq!((huge + huge + huge).cents(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 1].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 351);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_serializes_as_bare_cents() {
        assert_eq!(serde_json::to_string(&Money::from_cents(1250)).unwrap(), "1250");
    }
}
