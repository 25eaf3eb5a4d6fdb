//! Response types: connections for list queries and mutation payloads
//!
//! Mutation payloads carry failures as data in `errors`; a payload with a
//! non-empty `errors` list has no entity.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Customer, Order, Product};

/// One page of a filtered, sorted collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    /// Size of the whole filtered set, not of this page
    pub total_count: i64,
}

impl<T> Connection<T> {
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// Result of `createCustomer`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPayload {
    pub customer: Option<Customer>,
    pub message: String,
    pub errors: Vec<AppError>,
}

impl CustomerPayload {
    pub fn created(customer: Customer) -> Self {
        Self {
            customer: Some(customer),
            message: "Customer created successfully.".to_string(),
            errors: Vec::new(),
        }
    }

    pub fn failed(errors: Vec<AppError>) -> Self {
        Self {
            customer: None,
            message: "Customer creation failed.".to_string(),
            errors,
        }
    }
}

/// Result of `bulkCreateCustomers`; partial success is normal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkCustomersPayload {
    pub customers: Vec<Customer>,
    pub errors: Vec<AppError>,
}

/// Result of `createProduct`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    pub product: Option<Product>,
    pub errors: Vec<AppError>,
}

impl ProductPayload {
    pub fn created(product: Product) -> Self {
        Self {
            product: Some(product),
            errors: Vec::new(),
        }
    }

    pub fn failed(errors: Vec<AppError>) -> Self {
        Self {
            product: None,
            errors,
        }
    }
}

/// Result of `createOrder`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPayload {
    pub order: Option<Order>,
    pub errors: Vec<AppError>,
}

impl OrderPayload {
    pub fn created(order: Order) -> Self {
        Self {
            order: Some(order),
            errors: Vec::new(),
        }
    }

    pub fn failed(errors: Vec<AppError>) -> Self {
        Self { order: None, errors }
    }

    pub fn rejected(error: AppError) -> Self {
        Self::failed(vec![error])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_customer_payload_messages() {
        let failed = CustomerPayload::failed(vec![AppError::new(ErrorCode::CustomerEmailExists)]);
        assert!(failed.customer.is_none());
        assert_eq!(failed.message, "Customer creation failed.");
        assert_eq!(failed.errors.len(), 1);
    }

    #[test]
    fn test_order_payload_serialize() {
        let payload = OrderPayload::rejected(AppError::new(ErrorCode::OrderEmpty));
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["order"].is_null());
        assert_eq!(json["errors"][0]["code"], 4007);
        assert_eq!(json["errors"][0]["kind"], "validation");
    }
}
