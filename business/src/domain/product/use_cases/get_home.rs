use async_trait::async_trait;

use crate::domain::category::model::Category;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;

pub const HOME_FEATURED_LIMIT: u32 = 20;

/// Everything the landing page needs in one round.
#[derive(Debug, Clone)]
pub struct HomeFeed {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

#[async_trait]
pub trait GetHomeFeedUseCase: Send + Sync {
    async fn execute(&self) -> Result<HomeFeed, ProductError>;
}
