//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::str::FromStr;

use crm_server::{Config, DbService, ServerState, Services};
use rust_decimal::Decimal;
use shared::models::{Customer, CustomerCreate, Product, ProductCreate};

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Migrated in-memory state
pub async fn memory_state() -> ServerState {
    let config = Config::for_test();
    ServerState::initialize(&config).await.unwrap()
}

pub async fn file_state(dir: &tempfile::TempDir) -> ServerState {
    let mut config = Config::for_test();
    config.database_url = format!("sqlite:{}", dir.path().join("crm.db").display());
    config.db_max_connections = 5;
    let db = DbService::new(&config.database_url, config.db_max_connections)
        .await
        .unwrap();
    ServerState::new(config, db)
}

pub async fn customer(services: &Services, name: &str, email: &str) -> Customer {
    services
        .customers
        .create(CustomerCreate::new(name, email, None))
        .await
        .customer
        .unwrap()
}

pub async fn product(services: &Services, name: &str, price: &str, stock: i64) -> Product {
    services
        .products
        .create(ProductCreate::new(name, dec(price), stock))
        .await
        .product
        .unwrap()
}
