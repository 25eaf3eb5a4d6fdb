//! Demo data, inserted through the regular service operations

use rust_decimal::Decimal;

use super::Services;
use crate::db::repository::customer as customer_repo;
use crate::utils::{AppError, AppResult};
use shared::models::{CustomerCreate, OrderCreate, ProductCreate, RawId};

const CUSTOMERS: &[(&str, &str, Option<&str>)] = &[
    ("Alice Wonderland", "alice@example.com", Some("+12223334444")),
    ("Bob The Builder", "bob@example.com", Some("123-456-7890")),
    ("Charlie Chaplin", "charlie@example.com", None),
];

/// Name, description, price in cents, stock
const PRODUCTS: &[(&str, &str, i64, i64)] = &[
    ("Laptop Pro", "High-end laptop", 120050, 10),
    ("Wireless Mouse", "Ergonomic mouse", 2599, 50),
    ("Keyboard Classic", "Mechanical keyboard", 7500, 30),
    ("Monitor UltraWide", "34-inch ultrawide monitor", 45075, 5),
];

/// Customer index, product indexes
const ORDERS: &[(usize, &[usize])] = &[(0, &[0, 1]), (1, &[2]), (0, &[3, 1])];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
}

/// Insert the demo data; a database that already has customers is left alone.
pub async fn seed(services: &Services, pool: &sqlx::SqlitePool) -> AppResult<SeedReport> {
    let existing = customer_repo::count(pool).await?;
    if existing > 0 {
        tracing::info!(existing, "Database already has customers, skipping seed");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();

    let mut customer_ids = Vec::with_capacity(CUSTOMERS.len());
    for (name, email, phone) in CUSTOMERS {
        let payload = services
            .customers
            .create(CustomerCreate::new(*name, *email, *phone))
            .await;
        let customer = payload.customer.ok_or_else(|| first_error(payload.errors))?;
        customer_ids.push(customer.id);
        report.customers += 1;
    }

    let mut product_ids = Vec::with_capacity(PRODUCTS.len());
    for (name, description, price_cents, stock) in PRODUCTS {
        let payload = services
            .products
            .create(
                ProductCreate::new(*name, Decimal::new(*price_cents, 2), *stock)
                    .with_description(*description),
            )
            .await;
        let product = payload.product.ok_or_else(|| first_error(payload.errors))?;
        product_ids.push(product.id);
        report.products += 1;
    }

    for (customer, products) in ORDERS {
        let ids: Vec<RawId> = products.iter().map(|&i| RawId::Int(product_ids[i])).collect();
        let payload = services
            .orders
            .create_order(OrderCreate::new(customer_ids[*customer], ids))
            .await;
        payload.order.ok_or_else(|| first_error(payload.errors))?;
        report.orders += 1;
    }

    tracing::info!(
        customers = report.customers,
        products = report.products,
        orders = report.orders,
        "Seed data inserted"
    );
    Ok(report)
}

fn first_error(errors: Vec<AppError>) -> AppError {
    errors
        .into_iter()
        .next()
        .unwrap_or_else(|| AppError::internal("Seed step failed without an error"))
}
