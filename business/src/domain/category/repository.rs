use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::Category;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name.
    async fn get_all(&self) -> Result<Vec<Category>, RepositoryError>;
}
