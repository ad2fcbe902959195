use chrono::{DateTime, Utc};
use poem_openapi::Object;

use business::domain::order::model::{Order, OrderLine};

#[derive(Debug, Clone, Object)]
pub struct OrderLineResponse {
    /// Missing when the product was later removed from the catalog
    #[oai(skip_serializing_if_is_none)]
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price at purchase time
    pub unit_price: String,
    pub line_total: String,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            line_total: line.line_total().to_string(),
            product_id: line.product_id.map(|id| id.to_string()),
            product_name: line.product_name,
            quantity: line.quantity,
            unit_price: line.unit_price.to_string(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct OrderResponse {
    pub id: String,
    pub total_amount: String,
    pub shipping_address: String,
    pub status: String,
    pub payment_status: String,
    pub payment_reference: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLineResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            total_amount: order.total_amount.to_string(),
            shipping_address: order.shipping_address,
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            payment_reference: order.payment_reference,
            created_at: order.created_at,
            lines: order.lines.into_iter().map(Into::into).collect(),
        }
    }
}
