//! Order Workflow - validated, transactional order creation
//!
//! One attempt moves through [`OrderStage`]s:
//!
//! ```text
//! Received -> Validating -> Rejected
//!                        -> Reserving -> Persisted
//! ```
//!
//! Validation is exhaustive: every problem with the product list is
//! reported, and any problem rejects the whole attempt. Reservation and
//! persistence share one transaction, serialized by `reserve_lock`; the
//! stock decrement is guarded in SQL as well, so stock never goes negative.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::db::repository::order::{self as order_repo, NewOrder, NewOrderLine};
use crate::db::repository::product::{self as product_repo, ProductRow};
use crate::db::repository::customer as customer_repo;
use crate::query::{ORDERS, PageLimits, paginate};
use crate::utils::money::{self, MAX_AMOUNT_CENTS};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Customer, NodeKind, Order, OrderCreate, OrderLine, Product, RawId};
use shared::request::ListRequest;
use shared::response::{Connection, OrderPayload};
use shared::util::{now_millis, parse_date_or_datetime};

/// Where an order attempt is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStage {
    Received,
    Validating,
    Rejected,
    Reserving,
    Persisted,
}

impl OrderStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validating => "validating",
            Self::Rejected => "rejected",
            Self::Reserving => "reserving",
            Self::Persisted => "persisted",
        }
    }
}

impl fmt::Display for OrderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A distinct requested product and how many times it was listed
#[derive(Debug)]
struct Requested {
    id: i64,
    raw: RawId,
    quantity: i64,
}

type Rejection = Vec<AppError>;

fn enter(stage: OrderStage) {
    tracing::debug!(stage = %stage, "Order stage");
}

/// Storage failures are logged with their cause; callers only see a generic entry
fn storage_failure(err: impl fmt::Display) -> Rejection {
    tracing::error!(error = %err, "Order persistence failed");
    vec![AppError::database("Failed to create order.")]
}

fn product_not_found(raw: &RawId, id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::ProductNotFound,
        format!("Product ID '{raw}' not found."),
    )
    .on_field("product_ids")
    .with_detail("id", id)
}

fn out_of_stock(product: &ProductRow) -> AppError {
    AppError::with_message(
        ErrorCode::ProductOutOfStock,
        format!(
            "Product '{}' (ID: {}) is out of stock.",
            product.name, product.id
        ),
    )
    .on_field("product_ids")
    .with_detail("id", product.id)
}

fn insufficient_stock(product: &ProductRow, requested: i64) -> AppError {
    AppError::with_message(
        ErrorCode::ProductInsufficientStock,
        format!(
            "Insufficient stock for product '{}' (ID: {}): requested {}, available {}.",
            product.name, product.id, requested, product.stock
        ),
    )
    .on_field("product_ids")
    .with_detail("id", product.id)
    .with_detail("requested", requested)
    .with_detail("available", product.stock)
}

#[derive(Clone)]
pub struct OrderWorkflow {
    pool: SqlitePool,
    limits: PageLimits,
    /// Serializes reserve-and-persist; SQLite admits one writer anyway
    reserve_lock: Arc<Mutex<()>>,
}

impl OrderWorkflow {
    pub fn new(pool: SqlitePool, limits: PageLimits) -> Self {
        Self {
            pool,
            limits,
            reserve_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create an order; failures come back as data in the payload.
    #[tracing::instrument(skip_all, fields(customer_id = %input.customer_id, products = input.product_ids.len()))]
    pub async fn create_order(&self, input: OrderCreate) -> OrderPayload {
        enter(OrderStage::Received);
        match self.run(input).await {
            Ok(order) => {
                enter(OrderStage::Persisted);
                tracing::info!(
                    order_id = order.id,
                    total_amount = %order.total_amount,
                    lines = order.lines.len(),
                    "Order created"
                );
                OrderPayload::created(order)
            }
            Err(errors) => {
                enter(OrderStage::Rejected);
                tracing::info!(errors = errors.len(), "Order rejected");
                OrderPayload::failed(errors)
            }
        }
    }

    async fn run(&self, input: OrderCreate) -> Result<Order, Rejection> {
        let customer = self.resolve_customer(&input.customer_id).await?;

        enter(OrderStage::Validating);
        let mut errors = Vec::new();

        let order_date = match input
            .order_date
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
        {
            None => now_millis(),
            Some(raw) => parse_date_or_datetime(raw, false).unwrap_or_else(|| {
                errors.push(
                    AppError::with_message(
                        ErrorCode::InvalidFormat,
                        format!("Invalid order date: '{raw}'. Expected YYYY-MM-DD or an RFC 3339 datetime."),
                    )
                    .on_field("order_date"),
                );
                0
            }),
        };

        if input.product_ids.is_empty() {
            errors.push(
                AppError::with_message(
                    ErrorCode::OrderEmpty,
                    "At least one product ID must be provided.",
                )
                .on_field("product_ids"),
            );
            return Err(errors);
        }

        // First-seen order is kept; `index` maps an id to its entry
        let mut requested: Vec<Requested> = Vec::new();
        let mut index: HashMap<i64, usize> = HashMap::new();
        for raw in &input.product_ids {
            match raw.resolve(NodeKind::Product) {
                Ok(id) => match index.get(&id) {
                    Some(&at) => requested[at].quantity += 1,
                    None => {
                        index.insert(id, requested.len());
                        requested.push(Requested {
                            id,
                            raw: raw.clone(),
                            quantity: 1,
                        });
                    }
                },
                Err(e) => errors.push(e.on_field("product_ids")),
            }
        }

        // Stock is read under the lock so validation and reservation agree.
        // IMMEDIATE takes SQLite's write lock before those reads.
        let _guard = self.reserve_lock.lock().await;
        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(storage_failure)?;

        let ids: Vec<i64> = requested.iter().map(|r| r.id).collect();
        let mut rows: HashMap<i64, ProductRow> = product_repo::find_rows_by_ids(&mut *tx, &ids)
            .await
            .map_err(storage_failure)?
            .into_iter()
            .map(|row| (row.id, row))
            .collect();

        let mut linked: Vec<(ProductRow, i64)> = Vec::with_capacity(requested.len());
        for entry in &requested {
            match rows.remove(&entry.id) {
                None => errors.push(product_not_found(&entry.raw, entry.id)),
                Some(row) if row.stock == 0 => errors.push(out_of_stock(&row)),
                Some(row) if row.stock < entry.quantity => {
                    errors.push(insufficient_stock(&row, entry.quantity))
                }
                Some(row) => linked.push((row, entry.quantity)),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        if linked.is_empty() {
            return Err(vec![AppError::with_message(
                ErrorCode::OrderNoValidProducts,
                "No valid products could be added to the order.",
            )]);
        }

        let total_cents = money::line_total_cents(
            linked.iter().map(|(row, quantity)| (row.price_cents, *quantity)),
        )
        .filter(|total| *total <= MAX_AMOUNT_CENTS)
        .ok_or_else(|| {
            vec![AppError::with_message(
                ErrorCode::OrderTotalOutOfRange,
                "Order total exceeds the maximum amount.",
            )]
        })?;

        enter(OrderStage::Reserving);
        for (row, quantity) in &linked {
            let reserved = product_repo::decrement_stock(&mut *tx, row.id, *quantity)
                .await
                .map_err(storage_failure)?;
            if !reserved {
                // Dropping the transaction rolls back earlier decrements
                tracing::warn!(product_id = row.id, quantity, "Stock guard failed during reservation");
                return Err(vec![insufficient_stock(row, *quantity)]);
            }
        }

        let lines: Vec<NewOrderLine> = linked
            .iter()
            .map(|(row, quantity)| NewOrderLine {
                product_id: row.id,
                quantity: *quantity,
                unit_price_cents: row.price_cents,
            })
            .collect();
        let (order_id, created_at) = order_repo::insert(
            &mut *tx,
            &NewOrder {
                customer_id: customer.id,
                order_date,
                total_cents,
            },
            &lines,
        )
        .await
        .map_err(storage_failure)?;

        tx.commit().await.map_err(storage_failure)?;

        Ok(Order {
            id: order_id,
            customer,
            order_date,
            total_amount: money::from_cents(total_cents),
            created_at,
            lines: linked
                .into_iter()
                .map(|(row, quantity)| {
                    let unit_price = money::from_cents(row.price_cents);
                    let mut product = Product::from(row);
                    product.stock -= quantity;
                    OrderLine {
                        product,
                        quantity,
                        unit_price,
                    }
                })
                .collect(),
        })
    }

    /// Malformed or unknown customer ids are fatal and reported alone
    async fn resolve_customer(&self, raw: &RawId) -> Result<Customer, Rejection> {
        let id = raw
            .resolve(NodeKind::Customer)
            .map_err(|e| vec![e.on_field("customer_id")])?;

        match customer_repo::find_by_id(&self.pool, id).await {
            Ok(Some(customer)) => Ok(customer),
            Ok(None) => Err(vec![
                AppError::with_message(
                    ErrorCode::CustomerNotFound,
                    format!("Customer ID '{raw}' not found."),
                )
                .on_field("customer_id")
                .with_detail("id", id),
            ]),
            Err(e) => Err(storage_failure(e)),
        }
    }

    pub async fn list(&self, request: &ListRequest) -> AppResult<Connection<Order>> {
        let page = paginate(&self.pool, &ORDERS, request, self.limits).await?;
        let nodes = order_repo::find_by_ids(&self.pool, &page.ids()).await?;
        Ok(page.into_connection(nodes, |o| o.id))
    }

    pub async fn find(&self, id: i64) -> AppResult<Option<Order>> {
        Ok(order_repo::find_by_id(&self.pool, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::customer::NewCustomer;
    use crate::db::repository::product::NewProduct;
    use crate::utils::ErrorKind;
    use shared::models::GlobalId;

    struct Fixture {
        workflow: OrderWorkflow,
        pool: SqlitePool,
        customer: Customer,
    }

    async fn fixture() -> Fixture {
        let db = DbService::in_memory().await.unwrap();
        let customer = customer_repo::create(
            &db.pool,
            NewCustomer {
                name: "Alice".into(),
                email: "alice@example.com".into(),
                phone: None,
            },
        )
        .await
        .unwrap();
        Fixture {
            workflow: OrderWorkflow::new(db.pool.clone(), PageLimits::default()),
            pool: db.pool,
            customer,
        }
    }

    async fn product(pool: &SqlitePool, name: &str, price_cents: i64, stock: i64) -> Product {
        product_repo::create(
            pool,
            NewProduct {
                name: name.into(),
                description: None,
                price_cents,
                stock,
            },
        )
        .await
        .unwrap()
    }

    async fn stock_of(pool: &SqlitePool, id: i64) -> i64 {
        product_repo::find_by_id(pool, id).await.unwrap().unwrap().stock
    }

    #[tokio::test]
    async fn test_duplicates_collapse_into_quantity() {
        let f = fixture().await;
        let mouse = product(&f.pool, "Mouse", 2599, 5).await;
        let laptop = product(&f.pool, "Laptop", 120050, 2).await;

        let payload = f
            .workflow
            .create_order(OrderCreate::new(
                f.customer.id,
                vec![mouse.id.into(), laptop.id.into(), mouse.id.into()],
            ))
            .await;
        let order = payload.order.unwrap();

        assert_eq!(order.total_amount.to_string(), "1252.48");
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].product.id, mouse.id);
        assert_eq!(order.lines[0].quantity, 2);
        assert_eq!(order.lines[0].product.stock, 3);
        assert_eq!(stock_of(&f.pool, mouse.id).await, 3);
        assert_eq!(stock_of(&f.pool, laptop.id).await, 1);

        let stored = f.workflow.find(order.id).await.unwrap().unwrap();
        assert_eq!(stored, order);
    }

    #[tokio::test]
    async fn test_customer_errors_are_fatal() {
        let f = fixture().await;
        let payload = f
            .workflow
            .create_order(OrderCreate::new("abc", vec![RawId::from("nope")]))
            .await;
        assert_eq!(payload.errors.len(), 1);
        assert_eq!(payload.errors[0].kind(), ErrorKind::InvalidIdentifier);

        let payload = f
            .workflow
            .create_order(OrderCreate::new(999i64, vec![]))
            .await;
        assert_eq!(payload.errors.len(), 1);
        assert_eq!(payload.errors[0].code, ErrorCode::CustomerNotFound);
        assert_eq!(payload.errors[0].message, "Customer ID '999' not found.");
    }

    #[tokio::test]
    async fn test_empty_product_list() {
        let f = fixture().await;
        let gid = GlobalId::new(NodeKind::Customer, f.customer.id).encode();
        let payload = f
            .workflow
            .create_order(OrderCreate::new(gid.as_str(), vec![]))
            .await;
        assert_eq!(payload.errors[0].code, ErrorCode::OrderEmpty);
        assert_eq!(
            payload.errors[0].message,
            "At least one product ID must be provided."
        );
    }

    #[tokio::test]
    async fn test_all_problems_reported_and_nothing_changes() {
        let f = fixture().await;
        let empty = product(&f.pool, "Sold Out", 500, 0).await;
        let scarce = product(&f.pool, "Scarce", 700, 1).await;
        let fine = product(&f.pool, "Fine", 100, 10).await;

        let payload = f
            .workflow
            .create_order(
                OrderCreate::new(
                    f.customer.id,
                    vec![
                        fine.id.into(),
                        RawId::from("garbage"),
                        empty.id.into(),
                        scarce.id.into(),
                        scarce.id.into(),
                        RawId::Int(4242),
                    ],
                )
                .on("not a date"),
            )
            .await;

        assert!(payload.order.is_none());
        let codes: Vec<ErrorCode> = payload.errors.iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::InvalidFormat,
                ErrorCode::InvalidIdentifier,
                ErrorCode::ProductOutOfStock,
                ErrorCode::ProductInsufficientStock,
                ErrorCode::ProductNotFound,
            ]
        );
        assert_eq!(
            payload.errors[2].message,
            format!("Product 'Sold Out' (ID: {}) is out of stock.", empty.id)
        );
        assert_eq!(payload.errors[4].message, "Product ID '4242' not found.");

        assert_eq!(stock_of(&f.pool, fine.id).await, 10);
        assert_eq!(stock_of(&f.pool, scarce.id).await, 1);
        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&f.pool)
            .await
            .unwrap();
        assert_eq!(orders, 0);
    }

    #[tokio::test]
    async fn test_order_date_accepts_date_and_datetime() {
        let f = fixture().await;
        let p = product(&f.pool, "Pen", 150, 10).await;

        let order = f
            .workflow
            .create_order(OrderCreate::new(f.customer.id, vec![p.id.into()]).on("2024-03-01"))
            .await
            .order
            .unwrap();
        assert_eq!(order.order_date, 1_709_251_200_000);

        let order = f
            .workflow
            .create_order(
                OrderCreate::new(f.customer.id, vec![p.id.into()]).on("2024-03-01T10:00:00Z"),
            )
            .await
            .order
            .unwrap();
        assert_eq!(order.order_date, 1_709_251_200_000 + 10 * 3_600_000);
    }

    #[tokio::test]
    async fn test_list_orders_by_product_name_without_duplicates() {
        let f = fixture().await;
        let red = product(&f.pool, "Red Pen", 150, 10).await;
        let blue = product(&f.pool, "Blue Pen", 150, 10).await;
        let pad = product(&f.pool, "Notepad", 300, 10).await;

        f.workflow
            .create_order(OrderCreate::new(f.customer.id, vec![red.id.into(), blue.id.into()]))
            .await;
        f.workflow
            .create_order(OrderCreate::new(f.customer.id, vec![pad.id.into()]))
            .await;

        let conn = f
            .workflow
            .list(&ListRequest::new().filter("productName", "pen"))
            .await
            .unwrap();
        assert_eq!(conn.total_count, 1);
        assert_eq!(conn.edges.len(), 1);

        let conn = f
            .workflow
            .list(
                &ListRequest::new()
                    .filter("has_product_id", GlobalId::new(NodeKind::Product, pad.id).encode()),
            )
            .await
            .unwrap();
        assert_eq!(conn.total_count, 1);
        assert_eq!(conn.edges[0].node.lines[0].product.name, "Notepad");
    }
}
