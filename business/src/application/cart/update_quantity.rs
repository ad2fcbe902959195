use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::guest_store::{GuestCartStore, StoreError};
use crate::domain::cart::model::{Cart, CartOwner};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get::{GetCartParams, GetCartUseCase};
use crate::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use crate::domain::cart::use_cases::update_quantity::{
    UpdateCartItemQuantityParams, UpdateCartItemQuantityUseCase,
};
use crate::domain::logger::Logger;

pub struct UpdateCartItemQuantityUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub guest_store: Arc<GuestCartStore>,
    pub get_cart: Arc<dyn GetCartUseCase>,
    pub remove_item: Arc<dyn RemoveCartItemUseCase>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateCartItemQuantityUseCase for UpdateCartItemQuantityUseCaseImpl {
    async fn execute(&self, params: UpdateCartItemQuantityParams) -> Result<Cart, CartError> {
        if params.quantity <= 0 {
            return self
                .remove_item
                .execute(RemoveCartItemParams {
                    owner: params.owner,
                    line_id: params.line_id,
                })
                .await;
        }

        let quantity = u32::try_from(params.quantity).map_err(|_| CartError::InvalidQuantity)?;
        self.logger.info(&format!(
            "Setting line {} of cart of {} to {}",
            params.line_id, params.owner, quantity
        ));

        match &params.owner {
            CartOwner::User(user_id) => {
                self.repository
                    .update_quantity(params.line_id, user_id, quantity)
                    .await
                    .map_err(CartError::from_repository)?;
            }
            CartOwner::Guest(session) => {
                let mut entries = self.guest_store.load(session).await?;
                let entry = entries
                    .iter_mut()
                    .find(|e| e.id == params.line_id)
                    .ok_or(CartError::LineNotFound)?;
                entry.quantity = quantity;

                match self.guest_store.save(session, &entries).await {
                    Ok(()) => {}
                    Err(StoreError::QuotaExceeded) => {
                        self.logger.warn(&format!(
                            "Guest cart storage full for {}, quantity unchanged",
                            session
                        ));
                    }
                    Err(e) => return Err(e.into()),
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
