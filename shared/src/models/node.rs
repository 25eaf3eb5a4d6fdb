//! Global node identifiers
//!
//! A global id is `base64("<Kind>:<id>")`, the Relay convention. Inputs that
//! reference an entity accept either the raw numeric id or its global id.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AppError, AppResult};

/// Entity kind addressable through a global id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Customer,
    Product,
    Order,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Product => "Product",
            Self::Order => "Order",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "Customer" | "CustomerNode" => Some(Self::Customer),
            "Product" | "ProductNode" => Some(Self::Product),
            "Order" | "OrderNode" => Some(Self::Order),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded global id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalId {
    pub kind: NodeKind,
    pub id: i64,
}

impl GlobalId {
    pub fn new(kind: NodeKind, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.kind, self.id))
    }

    /// Decode `base64("<Kind>:<id>")`; `None` if any part is malformed.
    pub fn decode(raw: &str) -> Option<Self> {
        let bytes = STANDARD.decode(raw.trim()).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        let (kind, id) = text.split_once(':')?;
        let kind = NodeKind::parse(kind)?;
        let id = id.parse::<i64>().ok().filter(|id| *id > 0)?;
        Some(Self { kind, id })
    }
}

/// Identifier as supplied by a caller: a JSON number or a string holding
/// either digits or a global id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    /// Resolve to a numeric id of the expected kind.
    ///
    /// Rejects non-positive ids, unparsable text and global ids of another kind.
    pub fn resolve(&self, expected: NodeKind) -> AppResult<i64> {
        let id = match self {
            RawId::Int(id) => Some(*id),
            RawId::Text(text) => {
                let text = text.trim();
                if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
                    text.parse::<i64>().ok()
                } else {
                    GlobalId::decode(text)
                        .filter(|gid| gid.kind == expected)
                        .map(|gid| gid.id)
                }
            }
        };
        id.filter(|id| *id > 0)
            .ok_or_else(|| AppError::invalid_identifier(expected.as_str(), self.to_string()))
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Int(id) => write!(f, "{}", id),
            RawId::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for RawId {
    fn from(id: i64) -> Self {
        RawId::Int(id)
    }
}

impl From<&str> for RawId {
    fn from(s: &str) -> Self {
        RawId::Text(s.to_string())
    }
}
