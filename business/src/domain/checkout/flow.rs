use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::address::AddressForm;
use super::errors::CheckoutError;
use crate::domain::payment::model::PaymentMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    Address,
    Summary,
    Payment,
    Completed,
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutStep::Address => write!(f, "address"),
            CheckoutStep::Summary => write!(f, "summary"),
            CheckoutStep::Payment => write!(f, "payment"),
            CheckoutStep::Completed => write!(f, "completed"),
        }
    }
}

/// Linear checkout: address, summary, payment, then completed once an order
/// was written. Going back never clears what was typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    address: AddressForm,
    payment_method: PaymentMethod,
    cod_confirmation_open: bool,
    order_id: Option<Uuid>,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Address,
            address: AddressForm::default(),
            payment_method: PaymentMethod::Upi,
            cod_confirmation_open: false,
            order_id: None,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn address(&self) -> &AddressForm {
        &self.address
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn is_cod_confirmation_open(&self) -> bool {
        self.cod_confirmation_open
    }

    pub fn order_id(&self) -> Option<Uuid> {
        self.order_id
    }

    /// The address can only be edited on its own step.
    pub fn update_address(&mut self, address: AddressForm) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Address, CheckoutStep::Address)?;
        self.address = address;
        Ok(())
    }

    pub fn continue_to_summary(&mut self, has_identity: bool) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Address, CheckoutStep::Summary)?;
        self.address.validate(has_identity)?;
        self.step = CheckoutStep::Summary;
        Ok(())
    }

    pub fn continue_to_payment(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Summary, CheckoutStep::Payment)?;
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Payment goes back to summary, summary to address. Leaving the address
    /// step is the caller's business (it returns to the cart).
    pub fn back(&mut self) -> Result<CheckoutStep, CheckoutError> {
        let previous = match self.step {
            CheckoutStep::Payment => CheckoutStep::Summary,
            CheckoutStep::Summary => CheckoutStep::Address,
            from @ (CheckoutStep::Address | CheckoutStep::Completed) => {
                return Err(CheckoutError::InvalidTransition {
                    from,
                    to: CheckoutStep::Address,
                });
            }
        };
        self.cod_confirmation_open = false;
        self.step = previous;
        Ok(previous)
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment, CheckoutStep::Payment)?;
        self.payment_method = method;
        if method == PaymentMethod::Upi {
            self.cod_confirmation_open = false;
        }
        Ok(())
    }

    /// Cash on delivery needs the confirmation fee paid first; this opens
    /// that nested step.
    pub fn open_cod_confirmation(&mut self) -> Result<(), CheckoutError> {
        self.select_payment_method(PaymentMethod::CashOnDelivery)?;
        self.cod_confirmation_open = true;
        Ok(())
    }

    /// Backs out of the fee payment. Nothing is submitted.
    pub fn decline_cod_confirmation(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment, CheckoutStep::Payment)?;
        self.cod_confirmation_open = false;
        Ok(())
    }

    /// Guards submission of an order paid fully over UPI.
    pub fn ensure_upi_submittable(&self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment, CheckoutStep::Completed)
    }

    /// Guards submission of a cash-on-delivery order.
    pub fn ensure_cod_submittable(&self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment, CheckoutStep::Completed)?;
        if !self.cod_confirmation_open {
            return Err(CheckoutError::CodConfirmationNotOpen);
        }
        Ok(())
    }

    /// Only reachable from payment, after the order was written.
    pub fn complete(&mut self, order_id: Uuid) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment, CheckoutStep::Completed)?;
        self.cod_confirmation_open = false;
        self.order_id = Some(order_id);
        self.step = CheckoutStep::Completed;
        Ok(())
    }

    fn expect_step(&self, expected: CheckoutStep, to: CheckoutStep) -> Result<(), CheckoutError> {
        if self.step != expected {
            return Err(CheckoutError::InvalidTransition {
                from: self.step,
                to,
            });
        }
        Ok(())
    }
}
