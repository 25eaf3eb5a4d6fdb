//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::node::{GlobalId, NodeKind};

/// Product entity
///
/// `price` is exact to the cent; storage keeps it as integer cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i64,
    pub created_at: i64,
}

impl Product {
    pub fn global_id(&self) -> String {
        GlobalId::new(NodeKind::Product, self.id).encode()
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: Decimal, stock: i64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            stock,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
