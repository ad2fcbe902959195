use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::get_history::{
    GetOrderHistoryParams, GetOrderHistoryUseCase,
};

pub struct GetOrderHistoryUseCaseImpl {
    pub repository: Arc<dyn OrderRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetOrderHistoryUseCase for GetOrderHistoryUseCaseImpl {
    async fn execute(&self, params: GetOrderHistoryParams) -> Result<Vec<Order>, OrderError> {
        self.logger
            .info(&format!("Fetching orders for user: {}", params.user_id));
        let orders = self.repository.get_by_user(&params.user_id).await?;
        self.logger.info(&format!(
            "Found {} orders for user {}",
            orders.len(),
            params.user_id
        ));
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{MockOrderRepo, mock_logger};
    use crate::domain::errors::RepositoryError;
    use crate::domain::shared::value_objects::UserId;

    #[tokio::test]
    async fn should_return_orders_of_user() {
        let mut repository = MockOrderRepo::new();
        repository
            .expect_get_by_user()
            .withf(|user_id| user_id.as_str() == "u-1")
            .returning(|_| Ok(vec![]));

        let use_case = GetOrderHistoryUseCaseImpl {
            repository: Arc::new(repository),
            logger: mock_logger(),
        };

        let orders = use_case
            .execute(GetOrderHistoryParams {
                user_id: UserId::new("u-1"),
            })
            .await
            .unwrap();

        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn should_propagate_repository_error() {
        let mut repository = MockOrderRepo::new();
        repository
            .expect_get_by_user()
            .returning(|_| Err(RepositoryError::DatabaseError));

        let use_case = GetOrderHistoryUseCaseImpl {
            repository: Arc::new(repository),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(GetOrderHistoryParams {
                user_id: UserId::new("u-1"),
            })
            .await;

        assert!(matches!(result.unwrap_err(), OrderError::Repository(_)));
    }
}
