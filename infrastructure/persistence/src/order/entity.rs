use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::order::model::{Order, OrderLine, OrderOwner};
use business::domain::order::value_objects::OrderStatus;
use business::domain::payment::model::PaymentStatus;
use business::domain::shared::value_objects::{Money, UserId};

#[derive(Debug, FromRow)]
pub struct OrderEntity {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub total_amount: BigDecimal,
    pub shipping_address: String,
    pub status: String,
    pub payment_status: String,
    pub payment_reference: String,
    pub created_at: DateTime<Utc>,
}

impl OrderEntity {
    pub fn into_domain(self, lines: Vec<OrderLine>) -> Order {
        let owner = match self.user_id {
            Some(user_id) => OrderOwner::User(UserId::new(user_id)),
            None => OrderOwner::Guest {
                email: self.guest_email.unwrap_or_default(),
                phone: self.guest_phone.unwrap_or_default(),
            },
        };
        let Ok(payment_status) = self.payment_status.parse::<PaymentStatus>();

        Order::from_repository(
            self.id,
            owner,
            Money::new(self.total_amount),
            self.shipping_address,
            self.status
                .parse::<OrderStatus>()
                .unwrap_or(OrderStatus::Confirmed),
            payment_status,
            self.payment_reference,
            self.created_at,
            lines,
        )
    }
}

#[derive(Debug, FromRow)]
pub struct OrderItemEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub quantity: i32,
    pub price: BigDecimal,
}

impl OrderItemEntity {
    pub fn into_domain(self) -> OrderLine {
        OrderLine {
            id: self.id,
            order_id: self.order_id,
            product_id: self.product_id,
            product_name: self.product_name,
            quantity: u32::try_from(self.quantity).unwrap_or(0),
            unit_price: Money::new(self.price),
        }
    }
}
