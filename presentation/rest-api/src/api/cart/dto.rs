use poem_openapi::Object;
use uuid::Uuid;

use business::domain::cart::model::{Cart, CartLine};

#[derive(Debug, Clone, Object)]
pub struct AddCartItemRequest {
    pub product_id: Uuid,
    /// Units to add (default 1)
    #[oai(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Object)]
pub struct UpdateCartItemRequest {
    /// New quantity; zero or less removes the line
    pub quantity: i64,
}

#[derive(Debug, Clone, Object)]
pub struct CartLineResponse {
    /// Line id to use for updates and removals
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub selling_price: String,
    pub original_price: String,
    pub line_total: String,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
}

impl From<&CartLine> for CartLineResponse {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            product_id: line.product_id.to_string(),
            name: line.product.name.clone(),
            quantity: line.quantity,
            selling_price: line.product.selling_price.to_string(),
            original_price: line.product.original_price.to_string(),
            line_total: line.line_total().to_string(),
            image_url: line.product.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total_items: u64,
    pub total_amount: String,
    pub original_total: String,
    pub discount: String,
    /// True when the cart belongs to a signed-in user
    pub authenticated: bool,
}

impl CartResponse {
    pub fn new(cart: &Cart, authenticated: bool) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineResponse::from).collect(),
            total_items: cart.total_items(),
            total_amount: cart.total_amount().to_string(),
            original_total: cart.original_total().to_string(),
            discount: cart.discount().to_string(),
            authenticated,
        }
    }
}
