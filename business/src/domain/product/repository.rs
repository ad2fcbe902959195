use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::{Product, ProductImage};

/// Read access to the catalog. Only active products are ever returned.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Active products, newest first.
    async fn get_active(&self) -> Result<Vec<Product>, RepositoryError>;
    /// Active products whose name contains `query` (case-insensitive), newest first.
    async fn search_active(&self, query: &str) -> Result<Vec<Product>, RepositoryError>;
    /// Active products by display order, at most `limit`.
    async fn get_featured(&self, limit: u32) -> Result<Vec<Product>, RepositoryError>;
    async fn get_active_by_id(&self, id: Uuid) -> Result<Product, RepositoryError>;
    /// Products with the given ids; unknown ids are simply absent from the result.
    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError>;
    async fn get_images(&self, product_id: Uuid) -> Result<Vec<ProductImage>, RepositoryError>;
}
