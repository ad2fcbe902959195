use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::guest_store::GuestCartStore;
use crate::domain::cart::model::CartOwner;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use crate::domain::logger::Logger;

pub struct ClearCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub guest_store: Arc<GuestCartStore>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ClearCartUseCase for ClearCartUseCaseImpl {
    async fn execute(&self, params: ClearCartParams) -> Result<(), CartError> {
        match &params.owner {
            CartOwner::User(user_id) => {
                let deleted = self.repository.delete_all(user_id).await?;
                self.logger.info(&format!(
                    "Cleared {} lines from cart of {}",
                    deleted, params.owner
                ));
            }
            CartOwner::Guest(session) => {
                self.guest_store.clear(session).await?;
                self.logger
                    .info(&format!("Cleared cart of {}", params.owner));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{MemoryStore, MockCartRepo, mock_logger};
    use crate::domain::cart::model::GuestCartEntry;
    use crate::domain::shared::value_objects::{GuestSessionId, UserId};
    use uuid::Uuid;

    #[tokio::test]
    async fn should_delete_all_server_lines() {
        let mut repository = MockCartRepo::new();
        repository
            .expect_delete_all()
            .times(1)
            .returning(|_| Ok(2));

        let use_case = ClearCartUseCaseImpl {
            repository: Arc::new(repository),
            guest_store: Arc::new(GuestCartStore::new(Arc::new(MemoryStore::default()))),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(ClearCartParams {
                owner: CartOwner::User(UserId::new("u-1")),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_remove_guest_cart_key() {
        let memory = Arc::new(MemoryStore::default());
        let guest_store = Arc::new(GuestCartStore::new(memory.clone()));
        let session = GuestSessionId::new("tab-1");
        guest_store
            .save(&session, &[GuestCartEntry::new(Uuid::new_v4(), 1).unwrap()])
            .await
            .unwrap();
        let mut repository = MockCartRepo::new();
        repository.expect_delete_all().never();

        let use_case = ClearCartUseCaseImpl {
            repository: Arc::new(repository),
            guest_store,
            logger: mock_logger(),
        };

        use_case
            .execute(ClearCartParams {
                owner: CartOwner::Guest(session),
            })
            .await
            .unwrap();

        assert!(memory.raw("guest_cart:tab-1").is_none());
    }
}
