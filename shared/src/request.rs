//! Request types for list queries

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Filtered, cursor-paginated list request
///
/// ```json
/// { "filter": { "priceGte": 100, "orderBy": "-price" }, "first": 10, "after": "eyJ..." }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRequest {
    /// Filter keys (snake_case or camelCase) to values; `order_by` selects the sort
    #[serde(default)]
    pub filter: Map<String, Value>,
    /// Page size (default and upper bound come from server config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<i64>,
    /// Opaque cursor of the last edge already seen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl ListRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter entry
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(key.into(), value.into());
        self
    }

    pub fn first(mut self, first: i64) -> Self {
        self.first = Some(first);
        self
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_request_builder() {
        let req = ListRequest::new()
            .filter("priceGte", 100)
            .filter("order_by", "-price")
            .first(2);

        assert_eq!(req.filter.len(), 2);
        assert_eq!(req.first, Some(2));
        assert!(req.after.is_none());
    }

    #[test]
    fn test_list_request_defaults() {
        let req: ListRequest = serde_json::from_str("{}").unwrap();
        assert!(req.filter.is_empty());
        assert!(req.first.is_none());
    }
}
