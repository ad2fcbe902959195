use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::ProductDetail;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::get_by_id::{GetProductByIdParams, GetProductByIdUseCase};

pub struct GetProductByIdUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetProductByIdUseCase for GetProductByIdUseCaseImpl {
    async fn execute(&self, params: GetProductByIdParams) -> Result<ProductDetail, ProductError> {
        self.logger
            .info(&format!("Fetching product detail: {}", params.id));

        let (product, images) = tokio::join!(
            self.repository.get_active_by_id(params.id),
            self.repository.get_images(params.id)
        );

        let product = product.map_err(|e| match e {
            RepositoryError::NotFound => ProductError::NotFound,
            other => ProductError::Repository(other),
        })?;

        // A broken gallery should not hide the product itself.
        let images = images.unwrap_or_else(|e| {
            self.logger.warn(&format!(
                "Failed to load gallery for product {}: {}",
                params.id, e
            ));
            Vec::new()
        });

        Ok(ProductDetail::new(product, images))
    }
}
