use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{Cart, CartOwner};

pub struct AddCartItemParams {
    pub owner: CartOwner,
    pub product_id: Uuid,
    pub quantity: u32,
}

impl AddCartItemParams {
    /// Adds a single unit, the storefront's default.
    pub fn single(owner: CartOwner, product_id: Uuid) -> Self {
        Self {
            owner,
            product_id,
            quantity: 1,
        }
    }
}

#[async_trait]
pub trait AddCartItemUseCase: Send + Sync {
    async fn execute(&self, params: AddCartItemParams) -> Result<Cart, CartError>;
}
