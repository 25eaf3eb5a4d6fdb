//! Customer Model

use serde::{Deserialize, Serialize};

use super::node::{GlobalId, NodeKind};

/// Customer entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Unique, compared case-insensitively
    pub email: String,
    pub phone: Option<String>,
    pub created_at: i64,
}

impl Customer {
    pub fn global_id(&self) -> String {
        GlobalId::new(NodeKind::Customer, self.id).encode()
    }
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl CustomerCreate {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: Option<&str>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.map(str::to_string),
        }
    }
}
