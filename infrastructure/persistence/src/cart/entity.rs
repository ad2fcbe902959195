use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::cart::model::{CartItem, CartLine, ProductSnapshot};
use business::domain::shared::value_objects::{Money, UserId};

/// Quantities are positive in the table; anything else reads as zero.
fn quantity_from_db(quantity: i32) -> u32 {
    u32::try_from(quantity).unwrap_or(0)
}

#[derive(Debug, FromRow)]
pub struct CartItemEntity {
    pub id: Uuid,
    pub user_id: String,
    pub product_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl CartItemEntity {
    pub fn into_domain(self) -> CartItem {
        CartItem::from_repository(
            self.id,
            UserId::new(self.user_id),
            self.product_id,
            quantity_from_db(self.quantity),
            self.created_at,
        )
    }
}

/// A `cart_items` row joined with the product it points at.
#[derive(Debug, FromRow)]
pub struct CartLineEntity {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub name: String,
    pub selling_price: BigDecimal,
    pub original_price: BigDecimal,
    pub image_url: Option<String>,
}

impl CartLineEntity {
    pub fn into_domain(self) -> CartLine {
        CartLine {
            id: self.id,
            product_id: self.product_id,
            quantity: quantity_from_db(self.quantity),
            product: ProductSnapshot {
                id: self.product_id,
                name: self.name,
                selling_price: Money::new(self.selling_price),
                original_price: Money::new(self.original_price),
                image_url: self.image_url,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_joined_row_to_line() {
        let product_id = Uuid::new_v4();
        let line = CartLineEntity {
            id: Uuid::new_v4(),
            product_id,
            quantity: 2,
            name: "Mug".to_string(),
            selling_price: BigDecimal::from(300),
            original_price: BigDecimal::from(450),
            image_url: None,
        }
        .into_domain();

        assert_eq!(line.product.id, product_id);
        assert_eq!(line.line_total(), Money::from_rupees(600));
    }

    #[test]
    fn should_read_negative_quantity_as_zero() {
        assert_eq!(quantity_from_db(-3), 0);
        assert_eq!(quantity_from_db(7), 7);
    }
}
