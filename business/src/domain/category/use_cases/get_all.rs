use async_trait::async_trait;

use crate::domain::category::model::Category;
use crate::domain::product::errors::ProductError;

#[async_trait]
pub trait GetAllCategoriesUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<Category>, ProductError>;
}
