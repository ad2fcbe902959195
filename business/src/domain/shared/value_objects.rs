use std::iter::Sum;
use std::ops::{Add, Sub};

use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

/// Represents an authenticated user identifier (the `sub` claim of the
/// identity token issued by the hosted backend).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId from any type that can be converted into a String.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifies a visitor's client session (one browser tab or app install).
/// Guest carts are scoped by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuestSessionId(String);

impl GuestSessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GuestSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Amount of Indian rupees. Arbitrary precision so that totals never drift.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(BigDecimal);

impl Money {
    pub const CURRENCY: &'static str = "INR";

    pub fn new(amount: BigDecimal) -> Self {
        Self(amount)
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(BigDecimal::from(rupees))
    }

    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    pub fn amount(&self) -> &BigDecimal {
        &self.0
    }

    pub fn into_inner(self) -> BigDecimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Price of `quantity` units at this unit price.
    pub fn times(&self, quantity: u32) -> Money {
        Money(&self.0 * &BigDecimal::from(quantity))
    }

    /// Percentage saved when selling at `selling` instead of `original`,
    /// rounded half-up to a whole number. Zero when there is no saving.
    pub fn discount_percent(original: &Money, selling: &Money) -> u32 {
        if original.0 <= BigDecimal::zero() || selling.0 >= original.0 {
            return 0;
        }
        let saved = original.0.clone() - selling.0.clone();
        let ratio = saved * BigDecimal::from(100) / original.0.clone();
        ratio
            .with_scale_round(0, RoundingMode::HalfUp)
            .to_u32()
            .unwrap_or(0)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rounded = self.0.with_scale_round(2, RoundingMode::HalfUp);
        // bigdecimal drops the scale of zero when displaying it
        if rounded.is_zero() {
            return f.write_str("0.00");
        }
        write!(f, "{}", rounded)
    }
}

impl From<BigDecimal> for Money {
    fn from(amount: BigDecimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn should_create_user_id_from_str() {
        let user_id = UserId::new("3f1c9a52-user");
        assert_eq!(user_id.as_str(), "3f1c9a52-user");
    }

    #[test]
    fn should_compare_user_ids_for_equality() {
        let user_id_1 = UserId::new("same-user");
        let user_id_2 = UserId::new("same-user");
        let user_id_3 = UserId::new("different-user");

        assert_eq!(user_id_1, user_id_2);
        assert_ne!(user_id_1, user_id_3);
    }

    #[test]
    fn should_display_guest_session_id() {
        let session = GuestSessionId::new("tab-42");
        assert_eq!(format!("{}", session), "tab-42");
    }

    #[test]
    fn should_multiply_unit_price_by_quantity() {
        let price = Money::from_rupees(300);
        assert_eq!(price.times(2), Money::from_rupees(600));
    }

    #[test]
    fn should_sum_amounts_regardless_of_scale() {
        let total: Money = vec![
            Money::new(BigDecimal::from_str("499.50").unwrap()),
            Money::new(BigDecimal::from_str("0.5").unwrap()),
            Money::from_rupees(600),
        ]
        .into_iter()
        .sum();

        assert_eq!(total, Money::from_rupees(1100));
    }

    #[test]
    fn should_display_two_decimal_places() {
        assert_eq!(Money::from_rupees(59).to_string(), "59.00");
        assert_eq!(
            Money::new(BigDecimal::from_str("0.5").unwrap()).to_string(),
            "0.50"
        );
    }

    #[test]
    fn should_display_zero_with_two_decimal_places() {
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(
            (Money::from_rupees(5) - Money::from_rupees(5)).to_string(),
            "0.00"
        );
        let nothing: Money = Vec::<Money>::new().into_iter().sum();
        assert_eq!(nothing.to_string(), "0.00");
    }

    #[test]
    fn should_round_discount_percent_half_up() {
        let original = Money::from_rupees(999);
        let selling = Money::from_rupees(499);
        // (500 / 999) * 100 = 50.05
        assert_eq!(Money::discount_percent(&original, &selling), 50);

        let original = Money::from_rupees(8);
        let selling = Money::from_rupees(7);
        // 12.5 rounds up
        assert_eq!(Money::discount_percent(&original, &selling), 13);
    }

    #[test]
    fn should_not_report_discount_when_selling_above_original() {
        let original = Money::from_rupees(100);
        let selling = Money::from_rupees(120);
        assert_eq!(Money::discount_percent(&original, &selling), 0);
        assert_eq!(Money::discount_percent(&Money::zero(), &selling), 0);
    }
}
