use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::application::cart::session::CartSession;
use crate::application::shared::deadline::with_deadline;
use crate::domain::checkout::address::AddressForm;
use crate::domain::checkout::errors::CheckoutError;
use crate::domain::checkout::flow::CheckoutFlow;
use crate::domain::logger::Logger;
use crate::domain::order::model::Order;
use crate::domain::order::use_cases::submit::{SubmitOrderParams, SubmitOrderUseCase};
use crate::domain::payment::deep_link::PaymentOptions;
use crate::domain::payment::model::{
    OrderPayment, PaymentConfirmation, PaymentMethod, UpiApp, cod_confirmation_fee,
};
use crate::domain::payment::use_cases::get_options::{
    GetPaymentOptionsParams, GetPaymentOptionsUseCase,
};

/// Checkout progress of one client session, layered on its [`CartSession`].
///
/// Submission always reads the cart fresh, so the order matches what the
/// customer sees at the moment of confirming.
pub struct CheckoutSession {
    flow: Mutex<CheckoutFlow>,
    cart: Arc<CartSession>,
    submit_order: Arc<dyn SubmitOrderUseCase>,
    payment_options: Arc<dyn GetPaymentOptionsUseCase>,
    timeout: Duration,
    logger: Arc<dyn Logger>,
}

impl CheckoutSession {
    pub fn new(
        cart: Arc<CartSession>,
        submit_order: Arc<dyn SubmitOrderUseCase>,
        payment_options: Arc<dyn GetPaymentOptionsUseCase>,
        timeout: Duration,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            flow: Mutex::new(CheckoutFlow::new()),
            cart,
            submit_order,
            payment_options,
            timeout,
            logger,
        }
    }

    pub fn cart(&self) -> &Arc<CartSession> {
        &self.cart
    }

    pub async fn snapshot(&self) -> CheckoutFlow {
        self.flow.lock().await.clone()
    }

    pub async fn update_address(&self, address: AddressForm) -> Result<CheckoutFlow, CheckoutError> {
        let mut flow = self.flow.lock().await;
        flow.update_address(address)?;
        Ok(flow.clone())
    }

    pub async fn continue_to_summary(&self) -> Result<CheckoutFlow, CheckoutError> {
        let mut flow = self.flow.lock().await;
        let cart = self.cart.refresh().await?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let has_identity = self.cart.identity().await.is_some();
        flow.continue_to_summary(has_identity)?;
        Ok(flow.clone())
    }

    pub async fn continue_to_payment(&self) -> Result<CheckoutFlow, CheckoutError> {
        let mut flow = self.flow.lock().await;
        flow.continue_to_payment()?;
        Ok(flow.clone())
    }

    pub async fn back(&self) -> Result<CheckoutFlow, CheckoutError> {
        let mut flow = self.flow.lock().await;
        flow.back()?;
        Ok(flow.clone())
    }

    pub async fn select_payment_method(
        &self,
        method: PaymentMethod,
    ) -> Result<CheckoutFlow, CheckoutError> {
        let mut flow = self.flow.lock().await;
        flow.select_payment_method(method)?;
        Ok(flow.clone())
    }

    /// Where and how much to pay right now: the cart total, or the
    /// confirmation fee while the cash-on-delivery step is open.
    pub async fn payment_options(&self) -> Result<PaymentOptions, CheckoutError> {
        let flow = self.flow.lock().await;
        let amount = if flow.is_cod_confirmation_open() {
            cod_confirmation_fee()
        } else {
            self.cart.refresh().await?.total_amount()
        };
        let options = with_deadline(
            self.timeout,
            self.payment_options
                .execute(GetPaymentOptionsParams { amount }),
        )
        .await?;
        Ok(options)
    }

    pub async fn confirm_upi_payment(
        &self,
        app: UpiApp,
        reference: &str,
    ) -> Result<Order, CheckoutError> {
        let mut flow = self.flow.lock().await;
        flow.ensure_upi_submittable()?;
        let confirmation = PaymentConfirmation::new(app, reference)?;
        self.submit(&mut flow, OrderPayment::upi(&confirmation))
            .await
    }

    pub async fn request_cash_on_delivery(&self) -> Result<CheckoutFlow, CheckoutError> {
        let mut flow = self.flow.lock().await;
        flow.open_cod_confirmation()?;
        self.logger.debug("Cash on delivery confirmation opened");
        Ok(flow.clone())
    }

    pub async fn confirm_cod_fee(
        &self,
        app: UpiApp,
        reference: &str,
    ) -> Result<Order, CheckoutError> {
        let mut flow = self.flow.lock().await;
        flow.ensure_cod_submittable()?;
        let confirmation = PaymentConfirmation::new(app, reference)?;
        self.submit(&mut flow, OrderPayment::cod_fee(&confirmation))
            .await
    }

    pub async fn decline_cash_on_delivery(&self) -> Result<CheckoutFlow, CheckoutError> {
        let mut flow = self.flow.lock().await;
        flow.decline_cod_confirmation()?;
        self.logger.debug("Cash on delivery confirmation declined");
        Ok(flow.clone())
    }

    /// Starts a new checkout, e.g. after leaving the success screen.
    pub async fn reset(&self) -> CheckoutFlow {
        let mut flow = self.flow.lock().await;
        *flow = CheckoutFlow::new();
        flow.clone()
    }

    async fn submit(
        &self,
        flow: &mut CheckoutFlow,
        payment: OrderPayment,
    ) -> Result<Order, CheckoutError> {
        let (cart, owner) = self.cart.refresh_with_owner().await?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let order = with_deadline(
            self.timeout,
            self.submit_order.execute(SubmitOrderParams {
                owner,
                lines: cart.into_lines(),
                address: flow.address().clone(),
                payment,
            }),
        )
        .await
        .inspect_err(|e| {
            self.logger
                .error(&format!("Order submission failed, staying at payment: {}", e))
        })?;

        flow.complete(order.id)?;
        self.logger.info(&format!(
            "Checkout completed with order {} ({})",
            order.id, order.payment_status
        ));

        if let Err(e) = self.cart.refresh().await {
            self.logger
                .warn(&format!("Cart refresh after order {} failed: {}", order.id, e));
        }
        Ok(order)
    }
}
