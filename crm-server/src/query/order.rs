//! Order list filters and sorts
//!
//! Filters on linked products use `EXISTS` subqueries so an order matched
//! through several products still appears once.

use serde_json::Value;

use super::builder::QueryBuilder;
use super::filter::{CollectionSpec, FilterField, date_bound, entity_id, max_cents, min_cents, text};
use super::sort::{SortField, SortValueType};
use crate::utils::AppResult;
use shared::models::NodeKind;

static ID_SORT: SortField = CollectionSpec::id_sort("o.id");

pub static ORDERS: CollectionSpec = CollectionSpec {
    kind: NodeKind::Order,
    from: "orders o JOIN customer c ON c.id = o.customer_id",
    id_column: "o.id",
    filters: &[
        FilterField {
            key: "total_amount_gte",
            apply: total_amount_gte,
        },
        FilterField {
            key: "total_amount_lte",
            apply: total_amount_lte,
        },
        FilterField {
            key: "order_date_gte",
            apply: order_date_gte,
        },
        FilterField {
            key: "order_date_lte",
            apply: order_date_lte,
        },
        FilterField {
            key: "customer_name",
            apply: customer_name,
        },
        FilterField {
            key: "product_name",
            apply: product_name,
        },
        FilterField {
            key: "has_product_id",
            apply: has_product_id,
        },
    ],
    sorts: &[
        SortField {
            key: "customer_name",
            column: "c.name",
            value_type: SortValueType::Text,
        },
        SortField {
            key: "order_date",
            column: "o.order_date",
            value_type: SortValueType::Integer,
        },
        SortField {
            key: "total_amount",
            column: "o.total_cents",
            value_type: SortValueType::Integer,
        },
        SortField {
            key: "id",
            column: "o.id",
            value_type: SortValueType::Integer,
        },
    ],
    default_sort: &ID_SORT,
};

fn total_amount_gte(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    qb.add_condition("o.total_cents >= ?")
        .bind_i64(min_cents(key, value)?);
    Ok(())
}

fn total_amount_lte(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    qb.add_condition("o.total_cents <= ?")
        .bind_i64(max_cents(key, value)?);
    Ok(())
}

fn order_date_gte(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    qb.add_condition("o.order_date >= ?")
        .bind_i64(date_bound(key, value, false)?);
    Ok(())
}

fn order_date_lte(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    qb.add_condition("o.order_date <= ?")
        .bind_i64(date_bound(key, value, true)?);
    Ok(())
}

fn customer_name(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    if let Some(needle) = text(key, value)? {
        qb.add_contains("c.name_fold", needle);
    }
    Ok(())
}

fn product_name(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    if let Some(needle) = text(key, value)? {
        qb.add_condition(
            "EXISTS (SELECT 1 FROM order_product op JOIN product p ON p.id = op.product_id \
             WHERE op.order_id = o.id AND p.name_fold LIKE ? ESCAPE '\\')",
        )
        .bind_text(super::builder::contains_pattern(needle));
    }
    Ok(())
}

fn has_product_id(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    let product_id = entity_id(key, value, NodeKind::Product)?;
    qb.add_condition(
        "EXISTS (SELECT 1 FROM order_product op WHERE op.order_id = o.id AND op.product_id = ?)",
    )
    .bind_i64(product_id);
    Ok(())
}
