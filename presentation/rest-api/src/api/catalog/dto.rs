use poem_openapi::Object;

use business::domain::category::model::Category;
use business::domain::product::model::{Product, ProductDetail};
use business::domain::product::use_cases::get_home::HomeFeed;

#[derive(Debug, Clone, Object)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            slug: category.slug,
            image_url: category.image_url,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductResponse {
    /// Product unique identifier
    pub id: String,
    pub name: String,
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    /// Price charged, two decimals (INR)
    pub selling_price: String,
    /// List price before discount, two decimals (INR)
    pub original_price: String,
    /// Whole-percent discount off the original price
    pub discount_percent: u32,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub category_id: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            discount_percent: product.discount_percent(),
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            selling_price: product.selling_price.to_string(),
            original_price: product.original_price.to_string(),
            image_url: product.image_url,
            category_id: product.category_id.map(|id| id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductDetailResponse {
    pub product: ProductResponse,
    /// Images to show, in display order
    pub images: Vec<String>,
}

impl From<ProductDetail> for ProductDetailResponse {
    fn from(detail: ProductDetail) -> Self {
        Self {
            product: detail.product.into(),
            images: detail.images,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct HomeFeedResponse {
    pub categories: Vec<CategoryResponse>,
    pub products: Vec<ProductResponse>,
}

impl From<HomeFeed> for HomeFeedResponse {
    fn from(feed: HomeFeed) -> Self {
        Self {
            categories: feed.categories.into_iter().map(Into::into).collect(),
            products: feed.products.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::shared::value_objects::Money;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn should_expose_prices_and_discount() {
        let product = Product::from_repository(
            Uuid::new_v4(),
            "Kurta".to_string(),
            None,
            Money::from_rupees(499),
            Money::from_rupees(999),
            None,
            None,
            true,
            0,
            Utc::now(),
            Utc::now(),
        );

        let response = ProductResponse::from(product);

        assert_eq!(response.selling_price, "499.00");
        assert_eq!(response.original_price, "999.00");
        assert_eq!(response.discount_percent, 50);
    }
}
