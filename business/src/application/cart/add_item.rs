use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::guest_store::{GuestCartStore, StoreError};
use crate::domain::cart::model::{Cart, CartItem, CartOwner, GuestCartEntry};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use crate::domain::cart::use_cases::get::{GetCartParams, GetCartUseCase};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;

pub struct AddCartItemUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub product_repository: Arc<dyn ProductRepository>,
    pub guest_store: Arc<GuestCartStore>,
    pub get_cart: Arc<dyn GetCartUseCase>,
    pub logger: Arc<dyn Logger>,
}

impl AddCartItemUseCaseImpl {
    /// Guest entries skip the database foreign key, so the catalog is checked here.
    async fn ensure_available(&self, product_id: Uuid) -> Result<(), CartError> {
        match self.product_repository.get_active_by_id(product_id).await {
            Ok(_) => Ok(()),
            Err(RepositoryError::NotFound) => Err(CartError::ProductNotFound),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl AddCartItemUseCase for AddCartItemUseCaseImpl {
    async fn execute(&self, params: AddCartItemParams) -> Result<Cart, CartError> {
        self.logger.info(&format!(
            "Adding {} x {} to cart of {}",
            params.quantity, params.product_id, params.owner
        ));

        if params.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        match &params.owner {
            CartOwner::User(user_id) => {
                match self
                    .repository
                    .find_by_product_id(user_id, params.product_id)
                    .await?
                {
                    Some(existing) => {
                        let quantity = existing.quantity.saturating_add(params.quantity);
                        self.repository
                            .update_quantity(existing.id, user_id, quantity)
                            .await
                            .map_err(CartError::from_repository)?;
                    }
                    None => {
                        let item =
                            CartItem::new(user_id.clone(), params.product_id, params.quantity)?;
                        self.repository.insert(&item).await?;
                    }
                }
            }
            CartOwner::Guest(session) => {
                self.ensure_available(params.product_id).await?;
                let mut entries = self.guest_store.load(session).await?;
                match entries
                    .iter_mut()
                    .find(|e| e.product_id == params.product_id)
                {
                    Some(existing) => {
                        existing.quantity = existing.quantity.saturating_add(params.quantity)
                    }
                    None => entries.push(GuestCartEntry::new(params.product_id, params.quantity)?),
                }

                match self.guest_store.save(session, &entries).await {
                    Ok(()) => {}
                    Err(StoreError::QuotaExceeded) => {
                        self.logger.warn(&format!(
                            "Guest cart storage full for {}, item not added",
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
