//! Data models
//!
//! Shared between crm-server and API clients.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY); timestamps are UTC epoch
//! milliseconds; money is `rust_decimal::Decimal`.

pub mod customer;
pub mod node;
pub mod order;
pub mod product;

// Re-exports
pub use customer::*;
pub use node::*;
pub use order::*;
pub use product::*;

use serde::{Deserialize, Serialize};

/// Any entity addressable by global id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum Node {
    Customer(Customer),
    Product(Product),
    Order(Order),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Customer(_) => NodeKind::Customer,
            Node::Product(_) => NodeKind::Product,
            Node::Order(_) => NodeKind::Order,
        }
    }
}
