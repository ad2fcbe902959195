use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::category::model::Category;
use crate::domain::category::repository::CategoryRepository;
use crate::domain::category::use_cases::get_all::GetAllCategoriesUseCase;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;

pub struct GetAllCategoriesUseCaseImpl {
    pub repository: Arc<dyn CategoryRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetAllCategoriesUseCase for GetAllCategoriesUseCaseImpl {
    async fn execute(&self) -> Result<Vec<Category>, ProductError> {
        self.logger.info("Fetching categories");
        let categories = self.repository.get_all().await?;
        self.logger
            .info(&format!("Found {} categories", categories.len()));
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{MockCategoryRepo, mock_logger};
    use crate::domain::errors::RepositoryError;
    use uuid::Uuid;

    #[tokio::test]
    async fn should_return_categories_from_repository() {
        // Arrange
        let mut repo = MockCategoryRepo::new();
        repo.expect_get_all().times(1).returning(|| {
            Ok(vec![Category {
                id: Uuid::new_v4(),
                name: "Fashion".to_string(),
                slug: "fashion".to_string(),
                image_url: None,
            }])
        });
        let use_case = GetAllCategoriesUseCaseImpl {
            repository: Arc::new(repo),
            logger: mock_logger(),
        };

        // Act
        let categories = use_case.execute().await.unwrap();

        // Assert
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].slug, "fashion");
    }

    #[tokio::test]
    async fn should_propagate_repository_error() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_get_all()
            .returning(|| Err(RepositoryError::DatabaseError));
        let use_case = GetAllCategoriesUseCaseImpl {
            repository: Arc::new(repo),
            logger: mock_logger(),
        };

        let result = use_case.execute().await;

        assert!(matches!(result, Err(ProductError::Repository(_))));
    }
}
