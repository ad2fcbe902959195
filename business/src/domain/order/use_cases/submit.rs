use async_trait::async_trait;

use crate::domain::cart::model::{CartLine, CartOwner};
use crate::domain::checkout::address::AddressForm;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::payment::model::OrderPayment;

pub struct SubmitOrderParams {
    pub owner: CartOwner,
    pub lines: Vec<CartLine>,
    pub address: AddressForm,
    pub payment: OrderPayment,
}

/// Persists an order from the current cart, then clears the cart.
#[async_trait]
pub trait SubmitOrderUseCase: Send + Sync {
    async fn execute(&self, params: SubmitOrderParams) -> Result<Order, OrderError>;
}
