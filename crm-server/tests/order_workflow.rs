//! Order workflow end to end: validation, stock reservation, concurrency

mod common;

use common::{customer, dec, file_state, memory_state, product};
use crm_server::{ErrorCode, ErrorKind};
use shared::models::{CustomerCreate, OrderCreate, ProductCreate, RawId};

#[tokio::test]
async fn test_customer_and_order_scenario() {
    let state = memory_state().await;
    let services = &state.services;

    let alice = services
        .customers
        .create(CustomerCreate::new("Alice", "alice@example.com", None))
        .await;
    let alice = alice.customer.expect("Alice is created");

    let duplicate = services
        .customers
        .create(CustomerCreate::new("Alice Two", "alice@example.com", None))
        .await;
    assert!(duplicate.customer.is_none());
    assert_eq!(duplicate.errors[0].kind(), ErrorKind::Conflict);
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer")
        .fetch_one(state.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);

    let widget = product(services, "Widget", "10.00", 1).await;

    let first = services
        .orders
        .create_order(OrderCreate::new(alice.id, vec![widget.id.into()]))
        .await;
    let order = first.order.expect("first order succeeds");
    assert_eq!(order.total_amount, dec("10.00"));
    assert_eq!(order.lines[0].product.stock, 0);

    let stored = services.products.find(widget.id).await.unwrap().unwrap();
    assert_eq!(stored.stock, 0);

    let second = services
        .orders
        .create_order(OrderCreate::new(alice.id, vec![widget.id.into()]))
        .await;
    assert!(second.order.is_none());
    assert_eq!(second.errors.len(), 1);
    assert_eq!(second.errors[0].kind(), ErrorKind::InsufficientStock);
    assert_eq!(
        second.errors[0].message,
        format!("Product 'Widget' (ID: {}) is out of stock.", widget.id)
    );
}

#[tokio::test]
async fn test_total_is_exact_decimal_sum() {
    let state = memory_state().await;
    let services = &state.services;
    let bob = customer(services, "Bob", "bob@example.com").await;
    let a = product(services, "A", "0.10", 10).await;
    let b = product(services, "B", "0.20", 10).await;

    let order = services
        .orders
        .create_order(OrderCreate::new(bob.id, vec![a.id.into(), b.id.into(), a.id.into()]))
        .await
        .order
        .unwrap();
    assert_eq!(order.total_amount, dec("0.40"));

    let a_now = services.products.find(a.id).await.unwrap().unwrap();
    assert_eq!(a_now.stock, 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_orders_for_last_unit() {
    let dir = tempfile::tempdir().unwrap();
    let state = file_state(&dir).await;
    let buyer = customer(&state.services, "Carol", "carol@example.com").await;
    let widget = product(&state.services, "Widget", "10.00", 1).await;

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let workflow = state.services.orders.clone();
            let input = OrderCreate::new(buyer.id, vec![widget.id.into()]);
            tokio::spawn(async move { workflow.create_order(input).await })
        })
        .collect();

    let mut succeeded = 0;
    let mut failures = Vec::new();
    for handle in handles {
        let payload = handle.await.unwrap();
        match payload.order {
            Some(_) => succeeded += 1,
            None => failures.extend(payload.errors),
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind(), ErrorKind::InsufficientStock);

    let stock: i64 = sqlx::query_scalar("SELECT stock FROM product WHERE id = ?")
        .bind(widget.id)
        .fetch_one(state.pool())
        .await
        .unwrap();
    assert_eq!(stock, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_concurrent_orders_never_oversell() {
    let dir = tempfile::tempdir().unwrap();
    let state = file_state(&dir).await;
    let buyer = customer(&state.services, "Dan", "dan@example.com").await;
    let widget = product(&state.services, "Widget", "2.50", 5).await;

    let handles: Vec<_> = (0..12)
        .map(|_| {
            let workflow = state.services.orders.clone();
            let input = OrderCreate::new(buyer.id, vec![widget.id.into()]);
            tokio::spawn(async move { workflow.create_order(input).await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.unwrap().order.is_some() {
            succeeded += 1;
        }
    }
    assert_eq!(succeeded, 5);

    let remaining = state.services.products.find(widget.id).await.unwrap().unwrap();
    assert_eq!(remaining.stock, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_orders_succeed_alongside_other_writes() {
    let dir = tempfile::tempdir().unwrap();
    let state = file_state(&dir).await;
    let buyer = customer(&state.services, "Erin", "erin@example.com").await;
    let stocked = product(&state.services, "Bolt", "0.25", 100_000).await;

    let mut orders = Vec::new();
    let mut writes = Vec::new();
    for i in 0..400 {
        let workflow = state.services.orders.clone();
        let input = OrderCreate::new(buyer.id, vec![stocked.id.into()]);
        orders.push(tokio::spawn(async move { workflow.create_order(input).await }));

        let products = state.services.products.clone();
        writes.push(tokio::spawn(async move {
            let created = products
                .create(ProductCreate::new(format!("Nut {i}"), dec("0.10"), 5))
                .await;
            created.product.is_some()
        }));

        if i % 4 == 0 {
            let customers = state.services.customers.clone();
            writes.push(tokio::spawn(async move {
                let created = customers
                    .create(CustomerCreate::new(
                        format!("Guest {i}"),
                        format!("guest{i}@example.com"),
                        None,
                    ))
                    .await;
                created.customer.is_some()
            }));
        }
    }

    let mut failures = Vec::new();
    for handle in orders {
        let payload = handle.await.unwrap();
        if payload.order.is_none() {
            failures.extend(payload.errors);
        }
    }
    assert!(failures.is_empty(), "orders failed: {failures:?}");
    for handle in writes {
        assert!(handle.await.unwrap());
    }

    let remaining = state.services.products.find(stocked.id).await.unwrap().unwrap();
    assert_eq!(remaining.stock, 100_000 - 400);
}

#[tokio::test]
async fn test_long_product_list_reports_each_missing_id() {
    let state = memory_state().await;
    let buyer = customer(&state.services, "Finn", "finn@example.com").await;
    let widget = product(&state.services, "Widget", "1.00", 3).await;

    let mut ids: Vec<RawId> = (1_000_000..1_033_000i64).map(RawId::from).collect();
    ids.push(widget.id.into());
    let payload = state
        .services
        .orders
        .create_order(OrderCreate::new(buyer.id, ids))
        .await;

    assert!(payload.order.is_none());
    assert_eq!(payload.errors.len(), 33_000);
    assert!(payload.errors.iter().all(|e| e.code == ErrorCode::ProductNotFound));

    let untouched = state.services.products.find(widget.id).await.unwrap().unwrap();
    assert_eq!(untouched.stock, 3);
}
