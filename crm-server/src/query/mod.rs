//! List query engine
//!
//! Filter tables, sort parsing, keyset cursors and the paginator shared by
//! the customer, product and order collections.

pub mod builder;
pub mod cursor;
pub mod filter;
pub mod page;
pub mod sort;

mod customer;
mod order;
mod product;

pub use builder::{QueryBuilder, QueryValue, fold_case, placeholders};
pub use customer::CUSTOMERS;
pub use filter::CollectionSpec;
pub use order::ORDERS;
pub use page::{Page, PageLimits, paginate};
pub use product::{LOW_STOCK_THRESHOLD, PRODUCTS};
