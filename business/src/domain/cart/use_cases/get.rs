use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{Cart, CartOwner};

pub struct GetCartParams {
    pub owner: CartOwner,
}

#[async_trait]
pub trait GetCartUseCase: Send + Sync {
    async fn execute(&self, params: GetCartParams) -> Result<Cart, CartError>;
}
