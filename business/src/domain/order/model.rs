use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::OrderError;
use super::value_objects::OrderStatus;
use crate::domain::cart::model::CartLine;
use crate::domain::payment::model::{OrderPayment, PaymentStatus};
use crate::domain::shared::value_objects::{Money, UserId};

/// Who placed the order: a signed-in user, or a guest reachable by contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOwner {
    User(UserId),
    Guest { email: String, phone: String },
}

/// Purchased line. Name and unit price are copied at purchase time so later
/// catalog edits do not rewrite history.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub owner: OrderOwner,
    pub total_amount: Money,
    pub shipping_address: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_reference: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Builds a confirmed order from the cart lines as they are right now.
    pub fn place(
        owner: OrderOwner,
        cart_lines: &[CartLine],
        shipping_address: String,
        payment: &OrderPayment,
    ) -> Result<Self, OrderError> {
        if cart_lines.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let id = Uuid::new_v4();
        let lines: Vec<OrderLine> = cart_lines
            .iter()
            .map(|line| OrderLine {
                id: Uuid::new_v4(),
                order_id: id,
                product_id: Some(line.product_id),
                product_name: line.product.name.clone(),
                quantity: line.quantity,
                unit_price: line.product.selling_price.clone(),
            })
            .collect();
        let total_amount = lines.iter().map(OrderLine::line_total).sum();

        Ok(Self {
            id,
            owner,
            total_amount,
            shipping_address,
            status: OrderStatus::Confirmed,
            payment_status: payment.status.clone(),
            payment_reference: payment.reference.clone(),
            created_at: Utc::now(),
            lines,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: Uuid,
        owner: OrderOwner,
        total_amount: Money,
        shipping_address: String,
        status: OrderStatus,
        payment_status: PaymentStatus,
        payment_reference: String,
        created_at: DateTime<Utc>,
        lines: Vec<OrderLine>,
    ) -> Self {
        Self {
            id,
            owner,
            total_amount,
            shipping_address,
            status,
            payment_status,
            payment_reference,
            created_at,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::model::ProductSnapshot;
    use crate::domain::payment::model::{PaymentConfirmation, UpiApp};

    fn cart_line(name: &str, price: i64, quantity: u32) -> CartLine {
        let product_id = Uuid::new_v4();
        CartLine {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            product: ProductSnapshot {
                id: product_id,
                name: name.to_string(),
                selling_price: Money::from_rupees(price),
                original_price: Money::from_rupees(price * 2),
                image_url: None,
            },
        }
    }

    fn upi_payment() -> OrderPayment {
        OrderPayment::upi(&PaymentConfirmation::new(UpiApp::Paytm, "123456789012").unwrap())
    }

    #[test]
    fn should_snapshot_lines_and_total() {
        let lines = vec![cart_line("Kettle", 500, 1), cart_line("Mug", 300, 2)];

        let order = Order::place(
            OrderOwner::User(UserId::new("u-1")),
            &lines,
            "addr".to_string(),
            &upi_payment(),
        )
        .unwrap();

        assert_eq!(order.total_amount, Money::from_rupees(1100));
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.lines.len(), 2);
        assert!(order.lines.iter().all(|l| l.order_id == order.id));
        assert_eq!(order.lines[1].product_name, "Mug");
        assert_eq!(order.lines[1].unit_price, Money::from_rupees(300));
    }

    #[test]
    fn should_refuse_empty_cart() {
        let result = Order::place(
            OrderOwner::User(UserId::new("u-1")),
            &[],
            "addr".to_string(),
            &upi_payment(),
        );

        assert!(matches!(result.unwrap_err(), OrderError::EmptyCart));
    }
}
