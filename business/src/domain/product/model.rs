use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::shared::value_objects::Money;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub selling_price: Money,
    pub original_price: Money,
    pub image_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: Uuid,
        name: String,
        description: Option<String>,
        selling_price: Money,
        original_price: Money,
        image_url: Option<String>,
        category_id: Option<Uuid>,
        is_active: bool,
        display_order: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            selling_price,
            original_price,
            image_url,
            category_id,
            is_active,
            display_order,
            created_at,
            updated_at,
        }
    }

    pub fn discount_percent(&self) -> u32 {
        Money::discount_percent(&self.original_price, &self.selling_price)
    }
}

/// Extra gallery image attached to a product.
#[derive(Debug, Clone)]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    pub image_url: String,
    pub display_order: i32,
}

/// A product together with the ordered list of image URLs to show for it.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub product: Product,
    pub images: Vec<String>,
}

impl ProductDetail {
    /// Gallery images win; a product without any falls back to its main image.
    pub fn new(product: Product, mut gallery: Vec<ProductImage>) -> Self {
        gallery.sort_by_key(|image| image.display_order);
        let mut images: Vec<String> = gallery.into_iter().map(|i| i.image_url).collect();
        if images.is_empty()
            && let Some(url) = &product.image_url
        {
            images.push(url.clone());
        }
        Self { product, images }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(image_url: Option<&str>) -> Product {
        let now = Utc::now();
        Product::from_repository(
            Uuid::new_v4(),
            "Noise Cancelling Headphones".to_string(),
            None,
            Money::from_rupees(1999),
            Money::from_rupees(4999),
            image_url.map(|s| s.to_string()),
            None,
            true,
            0,
            now,
            now,
        )
    }

    #[test]
    fn should_compute_discount_percent() {
        // (3000 / 4999) * 100 = 60.01
        assert_eq!(product(None).discount_percent(), 60);
    }

    #[test]
    fn should_order_gallery_by_display_order() {
        let p = product(Some("https://cdn/main.jpg"));
        let images = vec![
            ProductImage {
                id: Uuid::new_v4(),
                product_id: p.id,
                image_url: "https://cdn/b.jpg".to_string(),
                display_order: 2,
            },
            ProductImage {
                id: Uuid::new_v4(),
                product_id: p.id,
                image_url: "https://cdn/a.jpg".to_string(),
                display_order: 1,
            },
        ];

        let detail = ProductDetail::new(p, images);

        assert_eq!(detail.images, vec!["https://cdn/a.jpg", "https://cdn/b.jpg"]);
    }

    #[test]
    fn should_fall_back_to_main_image_without_gallery() {
        let detail = ProductDetail::new(product(Some("https://cdn/main.jpg")), vec![]);
        assert_eq!(detail.images, vec!["https://cdn/main.jpg"]);

        let detail = ProductDetail::new(product(None), vec![]);
        assert!(detail.images.is_empty());
    }
}
