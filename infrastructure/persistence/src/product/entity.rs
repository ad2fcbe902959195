use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::product::model::{Product, ProductImage};
use business::domain::shared::value_objects::Money;

pub const PRODUCT_COLUMNS: &str = "id, name, description, selling_price, original_price, image_url, category_id, is_active, display_order, created_at, updated_at";

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub selling_price: BigDecimal,
    pub original_price: BigDecimal,
    pub image_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Product {
        Product::from_repository(
            self.id,
            self.name,
            self.description,
            Money::new(self.selling_price),
            Money::new(self.original_price),
            self.image_url.filter(|url| !url.trim().is_empty()),
            self.category_id,
            self.is_active,
            self.display_order,
            self.created_at,
            self.updated_at,
        )
    }
}

#[derive(Debug, FromRow)]
pub struct ProductImageEntity {
    pub id: Uuid,
    pub product_id: Uuid,
    pub image_url: String,
    pub display_order: i32,
}

impl ProductImageEntity {
    pub fn into_domain(self) -> ProductImage {
        ProductImage {
            id: self.id,
            product_id: self.product_id,
            image_url: self.image_url,
            display_order: self.display_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_drop_blank_image_url() {
        let now = Utc::now();
        let entity = ProductEntity {
            id: Uuid::new_v4(),
            name: "Kettle".to_string(),
            description: None,
            selling_price: BigDecimal::from(500),
            original_price: BigDecimal::from(800),
            image_url: Some("  ".to_string()),
            category_id: None,
            is_active: true,
            display_order: 3,
            created_at: now,
            updated_at: now,
        };

        let product = entity.into_domain();

        assert_eq!(product.image_url, None);
        assert_eq!(product.selling_price, Money::from_rupees(500));
        assert_eq!(product.discount_percent(), 38);
    }
}
