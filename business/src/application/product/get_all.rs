use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::get_all::{GetAllProductsParams, GetAllProductsUseCase};

pub struct GetAllProductsUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetAllProductsUseCase for GetAllProductsUseCaseImpl {
    async fn execute(&self, params: GetAllProductsParams) -> Result<Vec<Product>, ProductError> {
        let query = params
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());

        let products = match query {
            Some(query) => {
                self.logger
                    .info(&format!("Searching active products for '{}'", query));
                self.repository.search_active(query).await?
            }
            None => {
                self.logger.info("Fetching all active products");
                self.repository.get_active().await?
            }
        };

        self.logger
            .info(&format!("Found {} active products", products.len()));
        Ok(products)
    }
}
