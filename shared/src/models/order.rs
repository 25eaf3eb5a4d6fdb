//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::customer::Customer;
use super::node::{GlobalId, NodeKind, RawId};
use super::product::Product;

/// Order entity with its customer and product lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer: Customer,
    pub order_date: i64,
    /// Sum of `unit_price * quantity` over `lines`, fixed at creation
    pub total_amount: Decimal,
    pub created_at: i64,
    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn global_id(&self) -> String {
        GlobalId::new(NodeKind::Order, self.id).encode()
    }

    /// Linked products, one per line
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.lines.iter().map(|line| &line.product)
    }
}

/// Order to product association
///
/// `product` reflects current product data; `unit_price` is the price
/// captured when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: Product,
    pub quantity: i64,
    pub unit_price: Decimal,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: RawId,
    #[serde(default)]
    pub product_ids: Vec<RawId>,
    /// `YYYY-MM-DD` or RFC 3339; defaults to now
    #[serde(default)]
    pub order_date: Option<String>,
}

impl OrderCreate {
    pub fn new(customer_id: impl Into<RawId>, product_ids: Vec<RawId>) -> Self {
        Self {
            customer_id: customer_id.into(),
            product_ids,
            order_date: None,
        }
    }

    pub fn on(mut self, order_date: impl Into<String>) -> Self {
        self.order_date = Some(order_date.into());
        self
    }
}
