use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::guest_store::GuestCartStore;
use crate::domain::cart::model::{CartItem, ReconcileSummary};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::reconcile::{
    ReconcileGuestCartParams, ReconcileGuestCartUseCase,
};
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;

pub struct ReconcileGuestCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub product_repository: Arc<dyn ProductRepository>,
    pub guest_store: Arc<GuestCartStore>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ReconcileGuestCartUseCase for ReconcileGuestCartUseCaseImpl {
    async fn execute(
        &self,
        params: ReconcileGuestCartParams,
    ) -> Result<ReconcileSummary, CartError> {
        let entries = self.guest_store.load(&params.guest_session).await?;
        if entries.is_empty() {
            self.logger.debug(&format!(
                "No guest cart to reconcile for user {}",
                params.user_id
            ));
            return Ok(ReconcileSummary::default());
        }

        self.logger.info(&format!(
            "Reconciling {} guest entries into cart of user {}",
            entries.len(),
            params.user_id
        ));

        let ids: Vec<_> = entries.iter().map(|e| e.product_id).collect();
        let available = self.product_repository.get_by_ids(&ids).await?;

        let mut summary = ReconcileSummary::default();
        for entry in &entries {
            if !available
                .iter()
                .any(|p| p.id == entry.product_id && p.is_active)
            {
                self.logger.warn(&format!(
                    "Dropping guest entry for unavailable product {} while reconciling user {}",
                    entry.product_id, params.user_id
                ));
                summary.skipped += 1;
                continue;
            }

            let applied = match self
                .repository
                .find_by_product_id(&params.user_id, entry.product_id)
                .await
            {
                Ok(Some(existing)) => self
                    .repository
                    .update_quantity(
                        existing.id,
                        &params.user_id,
                        existing.quantity.saturating_add(entry.quantity),
                    )
                    .await
                    .map(|_| summary.merged += 1),
                Ok(None) => {
                    let item =
                        CartItem::new(params.user_id.clone(), entry.product_id, entry.quantity)?;
                    self.repository
                        .insert(&item)
                        .await
                        .map(|_| summary.inserted += 1)
                }
                Err(e) => Err(e),
            };

            if let Err(e) = applied {
                self.logger.error(&format!(
                    "Reconciliation stopped at product {} for user {}: {}",
                    entry.product_id, params.user_id, e
                ));
                return Err(e.into());
            }
        }

        self.guest_store.clear(&params.guest_session).await?;
        self.logger.info(&format!(
            "Reconciled guest cart for user {}: {} merged, {} inserted, {} skipped",
            params.user_id, summary.merged, summary.inserted, summary.skipped
        ));
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        FakeCartRepository, FakeCatalog, MemoryStore, MockCartRepo, MockProductRepo, mock_logger,
        product,
    };
    use crate::domain::cart::model::GuestCartEntry;
    use crate::domain::errors::RepositoryError;
    use crate::domain::shared::value_objects::{GuestSessionId, UserId};
    use uuid::Uuid;

    fn session() -> GuestSessionId {
        GuestSessionId::new("tab-1")
    }

    #[tokio::test]
    async fn should_merge_guest_cart_into_server_cart() {
        let p1 = product("Kettle", 500, 800);
        let p2 = product("Mug", 300, 450);
        let user_id = UserId::new("u-1");
        let repository = Arc::new(FakeCartRepository::new(vec![p1.clone(), p2.clone()]));
        repository.seed(&user_id, p1.id, 3);
        let guest_store = Arc::new(GuestCartStore::new(Arc::new(MemoryStore::default())));
        guest_store
            .save(
                &session(),
                &[
                    GuestCartEntry::new(p1.id, 2).unwrap(),
                    GuestCartEntry::new(p2.id, 1).unwrap(),
                ],
            )
            .await
            .unwrap();

        let use_case = ReconcileGuestCartUseCaseImpl {
            repository: repository.clone(),
            product_repository: Arc::new(FakeCatalog::new(vec![p1.clone(), p2.clone()])),
            guest_store: guest_store.clone(),
            logger: mock_logger(),
        };

        let summary = use_case
            .execute(ReconcileGuestCartParams {
                user_id: user_id.clone(),
                guest_session: session(),
            })
            .await
            .unwrap();

        assert_eq!(summary.merged, 1);
        assert_eq!(summary.inserted, 1);
        assert_eq!(
            repository.quantities(&user_id),
            vec![(p1.id, 5), (p2.id, 1)]
        );
        assert!(guest_store.load(&session()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_not_touch_server_cart_when_guest_cart_empty() {
        let mut repository = MockCartRepo::new();
        repository.expect_find_by_product_id().never();
        repository.expect_insert().never();
        repository.expect_update_quantity().never();
        let mut products = MockProductRepo::new();
        products.expect_get_by_ids().never();

        let use_case = ReconcileGuestCartUseCaseImpl {
            repository: Arc::new(repository),
            product_repository: Arc::new(products),
            guest_store: Arc::new(GuestCartStore::new(Arc::new(MemoryStore::default()))),
            logger: mock_logger(),
        };

        let summary = use_case
            .execute(ReconcileGuestCartParams {
                user_id: UserId::new("u-1"),
                guest_session: session(),
            })
            .await
            .unwrap();

        assert_eq!(summary, ReconcileSummary::default());
    }

    #[tokio::test]
    async fn should_keep_guest_cart_when_a_write_fails() {
        let p1 = product("Kettle", 500, 800);
        let p2 = product("Mug", 300, 450);
        let mut repository = MockCartRepo::new();
        repository
            .expect_find_by_product_id()
            .returning(|_, _| Ok(None));
        let mut inserts = 0;
        repository.expect_insert().times(2).returning(move |_| {
            inserts += 1;
            if inserts == 1 {
                Ok(())
            } else {
                Err(RepositoryError::DatabaseError)
            }
        });
        let guest_store = Arc::new(GuestCartStore::new(Arc::new(MemoryStore::default())));
        let entries = vec![
            GuestCartEntry::new(p1.id, 2).unwrap(),
            GuestCartEntry::new(p2.id, 1).unwrap(),
        ];
        guest_store.save(&session(), &entries).await.unwrap();

        let use_case = ReconcileGuestCartUseCaseImpl {
            repository: Arc::new(repository),
            product_repository: Arc::new(FakeCatalog::new(vec![p1.clone(), p2.clone()])),
            guest_store: guest_store.clone(),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(ReconcileGuestCartParams {
                user_id: UserId::new("u-1"),
                guest_session: session(),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            CartError::Repository(RepositoryError::DatabaseError)
        ));
        assert_eq!(guest_store.load(&session()).await.unwrap(), entries);
    }

    #[tokio::test]
    async fn should_skip_entries_whose_product_is_gone() {
        let kettle = product("Kettle", 500, 800);
        let mut retired = product("Lamp", 200, 200);
        retired.is_active = false;
        let user_id = UserId::new("u-1");
        let repository = Arc::new(FakeCartRepository::new(vec![kettle.clone()]));
        let guest_store = Arc::new(GuestCartStore::new(Arc::new(MemoryStore::default())));
        guest_store
            .save(
                &session(),
                &[
                    GuestCartEntry::new(Uuid::new_v4(), 2).unwrap(),
                    GuestCartEntry::new(retired.id, 1).unwrap(),
                    GuestCartEntry::new(kettle.id, 1).unwrap(),
                ],
            )
            .await
            .unwrap();

        let use_case = ReconcileGuestCartUseCaseImpl {
            repository: repository.clone(),
            product_repository: Arc::new(FakeCatalog::new(vec![kettle.clone(), retired])),
            guest_store: guest_store.clone(),
            logger: mock_logger(),
        };

        let summary = use_case
            .execute(ReconcileGuestCartParams {
                user_id: user_id.clone(),
                guest_session: session(),
            })
            .await
            .unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(repository.quantities(&user_id), vec![(kettle.id, 1)]);
        assert!(guest_store.load(&session()).await.unwrap().is_empty());
    }
}
