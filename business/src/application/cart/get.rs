use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::guest_store::GuestCartStore;
use crate::domain::cart::model::{Cart, CartLine, CartOwner, GuestCartEntry, ProductSnapshot};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get::{GetCartParams, GetCartUseCase};
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;

pub struct GetCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub product_repository: Arc<dyn ProductRepository>,
    pub guest_store: Arc<GuestCartStore>,
    pub logger: Arc<dyn Logger>,
}

impl GetCartUseCaseImpl {
    /// Joins guest entries with the catalog, keeping entry order. Entries
    /// whose product is gone or inactive are left out of the projection.
    async fn guest_lines(&self, entries: Vec<GuestCartEntry>) -> Result<Vec<CartLine>, CartError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<_> = entries.iter().map(|e| e.product_id).collect();
        let products = self.product_repository.get_by_ids(&ids).await?;

        let lines = entries
            .into_iter()
            .filter_map(|entry| {
                let Some(product) = products
                    .iter()
                    .find(|p| p.id == entry.product_id && p.is_active)
                else {
                    self.logger.debug(&format!(
                        "Skipping guest cart entry for unavailable product {}",
                        entry.product_id
                    ));
                    return None;
                };
                Some(CartLine {
                    id: entry.id,
                    product_id: entry.product_id,
                    quantity: entry.quantity,
                    product: ProductSnapshot::from(product),
                })
            })
            .collect();
        Ok(lines)
    }
}

#[async_trait]
impl GetCartUseCase for GetCartUseCaseImpl {
    async fn execute(&self, params: GetCartParams) -> Result<Cart, CartError> {
        self.logger
            .debug(&format!("Fetching cart for {}", params.owner));

        let lines = match &params.owner {
            CartOwner::User(user_id) => self.repository.get_lines(user_id).await?,
            CartOwner::Guest(session) => {
                let entries = self.guest_store.load(session).await?;
                self.guest_lines(entries).await?
            }
        };

        Ok(Cart::new(lines))
    }
}
