use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartOwner;

pub struct ClearCartParams {
    pub owner: CartOwner,
}

#[async_trait]
pub trait ClearCartUseCase: Send + Sync {
    async fn execute(&self, params: ClearCartParams) -> Result<(), CartError>;
}
