use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{Cart, CartOwner};

pub struct RemoveCartItemParams {
    pub owner: CartOwner,
    pub line_id: Uuid,
}

#[async_trait]
pub trait RemoveCartItemUseCase: Send + Sync {
    async fn execute(&self, params: RemoveCartItemParams) -> Result<Cart, CartError>;
}
