use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::model::CartOwner;
use crate::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::{Order, OrderOwner};
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::submit::{SubmitOrderParams, SubmitOrderUseCase};

pub struct SubmitOrderUseCaseImpl {
    pub repository: Arc<dyn OrderRepository>,
    pub clear_cart: Arc<dyn ClearCartUseCase>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SubmitOrderUseCase for SubmitOrderUseCaseImpl {
    async fn execute(&self, params: SubmitOrderParams) -> Result<Order, OrderError> {
        let owner = match &params.owner {
            CartOwner::User(user_id) => OrderOwner::User(user_id.clone()),
            CartOwner::Guest(_) => OrderOwner::Guest {
                email: params.address.email.trim().to_string(),
                phone: params.address.phone.trim().to_string(),
            },
        };

        let order = Order::place(
            owner,
            &params.lines,
            params.address.shipping_address_text(),
            &params.payment,
        )?;

        self.logger.info(&format!(
            "Submitting order {} for {}: {} lines, total {} ({})",
            order.id,
            params.owner,
            order.lines.len(),
            order.total_amount,
            params.payment.method
        ));

        if let Err(e) = self.repository.create(&order).await {
            self.logger
                .error(&format!("Failed to write order {}: {}", order.id, e));
            return Err(e.into());
        }

        // The order stands even if the cart cannot be emptied.
        if let Err(e) = self
            .clear_cart
            .execute(ClearCartParams {
                owner: params.owner.clone(),
            })
            .await
        {
            self.logger.warn(&format!(
                "Order {} written but cart of {} not cleared: {}",
                order.id, params.owner, e
            ));
        }

        Ok(order)
    }
}
