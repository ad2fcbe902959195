use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{Cart, CartOwner};

pub struct UpdateCartItemQuantityParams {
    pub owner: CartOwner,
    pub line_id: Uuid,
    /// Zero or below removes the line.
    pub quantity: i64,
}

#[async_trait]
pub trait UpdateCartItemQuantityUseCase: Send + Sync {
    async fn execute(&self, params: UpdateCartItemQuantityParams) -> Result<Cart, CartError>;
}
