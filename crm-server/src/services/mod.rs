//! Service layer
//!
//! - [`CustomerService`] - customer creation, bulk creation, listing
//! - [`ProductService`] - product creation and listing
//! - [`OrderWorkflow`] - transactional order creation and listing
//! - [`resolve_node`] - global id lookup
//! - [`seed`] - demo data

pub mod customer;
pub mod node;
pub mod order;
pub mod product;
pub mod seed;

pub use customer::CustomerService;
pub use node::resolve_node;
pub use order::{OrderStage, OrderWorkflow};
pub use product::ProductService;

use crate::query::PageLimits;
use sqlx::SqlitePool;

/// All services over one pool
#[derive(Clone)]
pub struct Services {
    pub customers: CustomerService,
    pub products: ProductService,
    pub orders: OrderWorkflow,
}

impl Services {
    pub fn new(pool: SqlitePool, limits: PageLimits) -> Self {
        Self {
            customers: CustomerService::new(pool.clone(), limits),
            products: ProductService::new(pool.clone(), limits),
            orders: OrderWorkflow::new(pool, limits),
        }
    }
}
