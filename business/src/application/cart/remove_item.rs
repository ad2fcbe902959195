use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::guest_store::GuestCartStore;
use crate::domain::cart::model::{Cart, CartOwner};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get::{GetCartParams, GetCartUseCase};
use crate::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use crate::domain::logger::Logger;

pub struct RemoveCartItemUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub guest_store: Arc<GuestCartStore>,
    pub get_cart: Arc<dyn GetCartUseCase>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveCartItemUseCase for RemoveCartItemUseCaseImpl {
    async fn execute(&self, params: RemoveCartItemParams) -> Result<Cart, CartError> {
        self.logger.info(&format!(
            "Removing line {} from cart of {}",
            params.line_id, params.owner
        ));

        match &params.owner {
            CartOwner::User(user_id) => {
                self.repository
                    .delete(params.line_id, user_id)
                    .await
                    .map_err(CartError::from_repository)?;
            }
            CartOwner::Guest(session) => {
                let mut entries = self.guest_store.load(session).await?;
                let position = entries
                    .iter()
                    .position(|e| e.id == params.line_id)
                    .ok_or(CartError::LineNotFound)?;
                entries.remove(position);

                if entries.is_empty() {
                    self.guest_store.clear(session).await?;
                } else {
                    self.guest_store.save(session, &entries).await?;
                }
            }
        }

        self.get_cart
            .execute(GetCartParams {
                owner: params.owner,
            })
            .await
    }
}
