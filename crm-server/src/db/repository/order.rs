//! Order Repository
//!
//! Orders are written only by the order workflow, inside its transaction;
//! reads assemble the customer and the order lines with current product data.

use std::collections::HashMap;

use super::product::ProductRow;
use super::{RepoResult, customer};
use crate::query::placeholders;
use crate::utils::money;
use shared::models::{Order, OrderLine, Product};
use sqlx::{SqliteConnection, SqlitePool};

#[derive(Debug, Clone, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_id: i64,
    order_date: i64,
    total_cents: i64,
    created_at: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct LineRow {
    order_id: i64,
    quantity: i64,
    unit_price_cents: i64,
    #[sqlx(flatten)]
    product: ProductRow,
}

/// Order header as written by the workflow
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i64,
    pub order_date: i64,
    pub total_cents: i64,
}

/// One association row: product, how many, price at order time
#[derive(Debug, Clone, Copy)]
pub struct NewOrderLine {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

/// Insert the order header and its lines; returns the order id and `created_at`.
pub async fn insert(
    conn: &mut SqliteConnection,
    order: &NewOrder,
    lines: &[NewOrderLine],
) -> RepoResult<(i64, i64)> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "INSERT INTO orders (customer_id, order_date, total_cents, created_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(order.customer_id)
    .bind(order.order_date)
    .bind(order.total_cents)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    let order_id = result.last_insert_rowid();

    for line in lines {
        sqlx::query(
            "INSERT INTO order_product (order_id, product_id, quantity, unit_price_cents) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(order_id)
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(line.unit_price_cents)
        .execute(&mut *conn)
        .await?;
    }

    Ok((order_id, now))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    Ok(find_by_ids(pool, &[id]).await?.into_iter().next())
}

/// Orders with the given ids, fully assembled, in no particular order
pub async fn find_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Order>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let marks = placeholders(ids.len());

    let sql = format!(
        "SELECT id, customer_id, order_date, total_cents, created_at FROM orders WHERE id IN ({marks})"
    );
    let mut query = sqlx::query_as::<_, OrderRow>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let rows = query.fetch_all(pool).await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let mut customer_ids: Vec<i64> = rows.iter().map(|row| row.customer_id).collect();
    customer_ids.sort_unstable();
    customer_ids.dedup();
    let customers: HashMap<i64, _> = customer::find_by_ids(pool, &customer_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let sql = format!(
        "SELECT op.order_id, op.quantity, op.unit_price_cents, \
         p.id, p.name, p.description, p.price_cents, p.stock, p.created_at \
         FROM order_product op JOIN product p ON p.id = op.product_id \
         WHERE op.order_id IN ({marks}) ORDER BY op.order_id, op.rowid"
    );
    let mut query = sqlx::query_as::<_, LineRow>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let mut lines: HashMap<i64, Vec<OrderLine>> = HashMap::new();
    for row in query.fetch_all(pool).await? {
        lines.entry(row.order_id).or_default().push(OrderLine {
            product: Product::from(row.product),
            quantity: row.quantity,
            unit_price: money::from_cents(row.unit_price_cents),
        });
    }

    let orders = rows
        .into_iter()
        .filter_map(|row| {
            // Cascade removes orders with their customer, so a miss is a race
            let customer = customers.get(&row.customer_id)?.clone();
            Some(Order {
                id: row.id,
                customer,
                order_date: row.order_date,
                total_amount: money::from_cents(row.total_cents),
                created_at: row.created_at,
                lines: lines.remove(&row.id).unwrap_or_default(),
            })
        })
        .collect();
    Ok(orders)
}
