//! Prices in euro cents.
//!
//! All amounts are integral cents; there is no currency conversion and no
//! fractional arithmetic. Line totals and cart totals use checked arithmetic
//! so an absurd quantity surfaces as an error instead of wrapping.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors from price arithmetic.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    /// The result does not fit in an `i64` number of cents.
    #[error("price arithmetic overflowed")]
    Overflow,
}

/// An amount of money in euro cents.
///
/// ```
/// use restcart_core::EuroCents;
///
/// let unit = EuroCents::new(150);
/// assert_eq!(unit.times(3).unwrap(), EuroCents::new(450));
/// assert_eq!(unit.to_string(), "1.50 EUR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EuroCents(i64);

impl EuroCents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a number of cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the number of cents.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Multiply a unit price by a quantity.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Overflow` if the product does not fit in `i64`.
    pub fn times(self, quantity: i32) -> Result<Self, PriceError> {
        self.0
            .checked_mul(i64::from(quantity))
            .map(Self)
            .ok_or(PriceError::Overflow)
    }

    /// Add two amounts.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Overflow` if the sum does not fit in `i64`.
    pub fn checked_add(self, other: Self) -> Result<Self, PriceError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(PriceError::Overflow)
    }

    /// Sum amounts, failing on overflow.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Overflow` if the running total overflows.
    pub fn try_sum<I>(amounts: I) -> Result<Self, PriceError>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }
}

impl fmt::Display for EuroCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02} EUR", abs / 100, abs % 100)
    }
}

impl From<i64> for EuroCents {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl From<EuroCents> for i64 {
    fn from(amount: EuroCents) -> Self {
        amount.0
    }
}

#[cfg(feature = "postgres")]
impl ::sqlx::Type<::sqlx::Postgres> for EuroCents {
    fn type_info() -> ::sqlx::postgres::PgTypeInfo {
        <i64 as ::sqlx::Type<::sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for EuroCents {
    fn decode(
        value: ::sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, ::sqlx::error::BoxDynError> {
        <i64 as ::sqlx::Decode<::sqlx::Postgres>>::decode(value).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl ::sqlx::Encode<'_, ::sqlx::Postgres> for EuroCents {
    fn encode_by_ref(
        &self,
        buf: &mut ::sqlx::postgres::PgArgumentBuffer,
    ) -> Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
        <i64 as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times() {
        assert_eq!(EuroCents::new(100).times(2).unwrap(), EuroCents::new(200));
        assert_eq!(EuroCents::new(100).times(0).unwrap(), EuroCents::ZERO);
    }

    #[test]
    fn test_times_overflow() {
        assert_eq!(
            EuroCents::new(i64::MAX).times(2),
            Err(PriceError::Overflow)
        );
    }

    #[test]
    fn test_try_sum() {
        let total = EuroCents::try_sum([EuroCents::new(200), EuroCents::new(150)]).unwrap();
        assert_eq!(total, EuroCents::new(350));
        assert_eq!(EuroCents::try_sum([]).unwrap(), EuroCents::ZERO);
        assert!(EuroCents::try_sum([EuroCents::new(i64::MAX), EuroCents::new(1)]).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(EuroCents::new(5).to_string(), "0.05 EUR");
        assert_eq!(EuroCents::new(1999).to_string(), "19.99 EUR");
        assert_eq!(EuroCents::new(-250).to_string(), "-2.50 EUR");
    }

    #[test]
    fn test_serde_is_transparent() {
        assert_eq!(serde_json::to_string(&EuroCents::new(350)).unwrap(), "350");
        let parsed: EuroCents = serde_json::from_str("100").unwrap();
        assert_eq!(parsed, EuroCents::new(100));
    }
}
