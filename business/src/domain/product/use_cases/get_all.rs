use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;

pub struct GetAllProductsParams {
    /// Optional name filter; blank means no filter.
    pub query: Option<String>,
}

#[async_trait]
pub trait GetAllProductsUseCase: Send + Sync {
    async fn execute(&self, params: GetAllProductsParams) -> Result<Vec<Product>, ProductError>;
}
