use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::category::repository::CategoryRepository;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::get_home::{
    GetHomeFeedUseCase, HOME_FEATURED_LIMIT, HomeFeed,
};

pub struct GetHomeFeedUseCaseImpl {
    pub product_repository: Arc<dyn ProductRepository>,
    pub category_repository: Arc<dyn CategoryRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetHomeFeedUseCase for GetHomeFeedUseCaseImpl {
    async fn execute(&self) -> Result<HomeFeed, ProductError> {
        self.logger.info("Fetching home feed");

        let (categories, products) = tokio::try_join!(
            self.category_repository.get_all(),
            self.product_repository.get_featured(HOME_FEATURED_LIMIT)
        )?;

        self.logger.info(&format!(
            "Home feed has {} categories and {} products",
            categories.len(),
            products.len()
        ));
        Ok(HomeFeed {
            categories,
            products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        MockCategoryRepo, MockProductRepo, mock_logger, product,
    };
    use crate::domain::category::model::Category;
    use crate::domain::errors::RepositoryError;
    use mockall::predicate::eq;
    use uuid::Uuid;

    #[tokio::test]
    async fn should_load_categories_and_featured_products() {
        let mut products = MockProductRepo::new();
        products
            .expect_get_featured()
            .with(eq(HOME_FEATURED_LIMIT))
            .returning(|_| Ok(vec![product("Kettle", 500, 800)]));
        let mut categories = MockCategoryRepo::new();
        categories.expect_get_all().returning(|| {
            Ok(vec![Category {
                id: Uuid::new_v4(),
                name: "Kitchen".to_string(),
                slug: "kitchen".to_string(),
                image_url: None,
            }])
        });

        let use_case = GetHomeFeedUseCaseImpl {
            product_repository: Arc::new(products),
            category_repository: Arc::new(categories),
            logger: mock_logger(),
        };

        let feed = use_case.execute().await.unwrap();

        assert_eq!(feed.categories[0].slug, "kitchen");
        assert_eq!(feed.products.len(), 1);
    }

    #[tokio::test]
    async fn should_fail_when_categories_unavailable() {
        let mut products = MockProductRepo::new();
        products.expect_get_featured().returning(|_| Ok(vec![]));
        let mut categories = MockCategoryRepo::new();
        categories
            .expect_get_all()
            .returning(|| Err(RepositoryError::DatabaseError));

        let use_case = GetHomeFeedUseCaseImpl {
            product_repository: Arc::new(products),
            category_repository: Arc::new(categories),
            logger: mock_logger(),
        };

        let result = use_case.execute().await;

        assert!(matches!(result.unwrap_err(), ProductError::Repository(_)));
    }
}
