use async_trait::async_trait;

use crate::domain::payment::deep_link::PaymentOptions;
use crate::domain::payment::errors::PaymentError;
use crate::domain::shared::value_objects::Money;

pub struct GetPaymentOptionsParams {
    pub amount: Money,
}

#[async_trait]
pub trait GetPaymentOptionsUseCase: Send + Sync {
    async fn execute(&self, params: GetPaymentOptionsParams) -> Result<PaymentOptions, PaymentError>;
}
