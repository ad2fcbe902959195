use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::CartError;
use crate::domain::product::model::Product;
use crate::domain::shared::value_objects::{GuestSessionId, Money, UserId};

/// Whose cart an operation targets: a visitor's browser-held cart or the
/// server-persisted cart of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOwner {
    Guest(GuestSessionId),
    User(UserId),
}

impl CartOwner {
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            CartOwner::User(user_id) => Some(user_id),
            CartOwner::Guest(_) => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, CartOwner::User(_))
    }
}

impl std::fmt::Display for CartOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartOwner::Guest(session) => write!(f, "guest:{}", session),
            CartOwner::User(user_id) => write!(f, "user:{}", user_id),
        }
    }
}

/// One entry of the guest cart as kept in local storage.
///
/// The id is minted when the entry is created and survives reordering, so it
/// can key UI rows. Entries written before ids existed get one on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCartEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
}

impl GuestCartEntry {
    pub fn new(product_id: Uuid, quantity: u32) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            product_id,
            quantity,
        })
    }
}

/// Server-side cart row (`cart_items`).
#[derive(Debug, Clone)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: UserId,
    pub product_id: Uuid,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(user_id: UserId, product_id: Uuid, quantity: u32) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            product_id,
            quantity,
            created_at: Utc::now(),
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        user_id: UserId,
        product_id: Uuid,
        quantity: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            product_id,
            quantity,
            created_at,
        }
    }
}

/// The product fields a cart line displays and prices with.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub id: Uuid,
    pub name: String,
    pub selling_price: Money,
    pub original_price: Money,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            selling_price: product.selling_price.clone(),
            original_price: product.original_price.clone(),
            image_url: product.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Server row id for signed-in carts, the guest entry id otherwise.
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    pub product: ProductSnapshot,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        self.product.selling_price.times(self.quantity)
    }
}

/// Read-through projection of whichever store backs the current session.
///
/// Totals are derived from the lines on every call and never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, line_id: Uuid) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn line_for_product(&self, product_id: Uuid) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn total_amount(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// What the lines would cost at their original (pre-discount) prices.
    pub fn original_total(&self) -> Money {
        self.lines
            .iter()
            .map(|l| l.product.original_price.times(l.quantity))
            .sum()
    }

    pub fn discount(&self) -> Money {
        self.original_total() - self.total_amount()
    }
}

/// Outcome of folding a guest cart into a user's server cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Entries added onto an existing server line.
    pub merged: usize,
    /// Entries that became new server lines.
    pub inserted: usize,
    /// Entries dropped because their product is gone or inactive.
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(selling: i64, original: i64, quantity: u32) -> CartLine {
        let product_id = Uuid::new_v4();
        CartLine {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            product: ProductSnapshot {
                id: product_id,
                name: "Item".to_string(),
                selling_price: Money::from_rupees(selling),
                original_price: Money::from_rupees(original),
                image_url: None,
            },
        }
    }

    #[test]
    fn should_derive_totals_from_lines() {
        let cart = Cart::new(vec![line(500, 800, 1), line(300, 450, 2)]);

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_amount(), Money::from_rupees(1100));
        assert_eq!(cart.original_total(), Money::from_rupees(1700));
        assert_eq!(cart.discount(), Money::from_rupees(600));
    }

    #[test]
    fn should_report_zero_totals_for_empty_cart() {
        let cart = Cart::empty();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_amount(), Money::zero());
    }

    #[test]
    fn should_reject_zero_quantity_entries() {
        let result = GuestCartEntry::new(Uuid::new_v4(), 0);
        assert!(matches!(result.unwrap_err(), CartError::InvalidQuantity));
    }

    #[test]
    fn should_mint_id_for_legacy_guest_entries() {
        let product_id = Uuid::new_v4();
        let raw = format!(r#"[{{"product_id":"{}","quantity":2}}]"#, product_id);

        let entries: Vec<GuestCartEntry> = serde_json::from_str(&raw).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].product_id, product_id);
        assert_eq!(entries[0].quantity, 2);
        assert!(!entries[0].id.is_nil());
    }

    proptest! {
        #[test]
        fn total_amount_matches_sum_of_line_totals(
            rows in proptest::collection::vec((1i64..10_000, 1u32..50), 0..20)
        ) {
            let lines: Vec<CartLine> = rows.iter().map(|(price, qty)| line(*price, *price, *qty)).collect();
            let expected: i64 = rows.iter().map(|(price, qty)| price * i64::from(*qty)).sum();
            let expected_items: u64 = rows.iter().map(|(_, qty)| u64::from(*qty)).sum();

            let cart = Cart::new(lines);

            prop_assert_eq!(cart.total_amount(), Money::from_rupees(expected));
            prop_assert_eq!(cart.total_items(), expected_items);
        }
    }
}
