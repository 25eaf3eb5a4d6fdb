//! Product list filters and sorts

use serde_json::Value;

use super::builder::QueryBuilder;
use super::filter::{CollectionSpec, FilterField, boolean, integer, max_cents, min_cents, text};
use super::sort::{SortField, SortValueType};
use crate::utils::AppResult;
use shared::models::NodeKind;

/// Products below this stock count as low stock
pub const LOW_STOCK_THRESHOLD: i64 = 10;

static ID_SORT: SortField = CollectionSpec::id_sort("p.id");

pub static PRODUCTS: CollectionSpec = CollectionSpec {
    kind: NodeKind::Product,
    from: "product p",
    id_column: "p.id",
    filters: &[
        FilterField {
            key: "name",
            apply: name,
        },
        FilterField {
            key: "price_gte",
            apply: price_gte,
        },
        FilterField {
            key: "price_lte",
            apply: price_lte,
        },
        FilterField {
            key: "stock_gte",
            apply: stock_gte,
        },
        FilterField {
            key: "stock_lte",
            apply: stock_lte,
        },
        FilterField {
            key: "stock_exact",
            apply: stock_exact,
        },
        FilterField {
            key: "is_low_stock",
            apply: is_low_stock,
        },
    ],
    sorts: &[
        SortField {
            key: "name",
            column: "p.name",
            value_type: SortValueType::Text,
        },
        SortField {
            key: "price",
            column: "p.price_cents",
            value_type: SortValueType::Integer,
        },
        SortField {
            key: "stock",
            column: "p.stock",
            value_type: SortValueType::Integer,
        },
        SortField {
            key: "created_at",
            column: "p.created_at",
            value_type: SortValueType::Integer,
        },
    ],
    default_sort: &ID_SORT,
};

fn name(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    if let Some(needle) = text(key, value)? {
        qb.add_contains("p.name_fold", needle);
    }
    Ok(())
}

fn price_gte(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    qb.add_condition("p.price_cents >= ?")
        .bind_i64(min_cents(key, value)?);
    Ok(())
}

fn price_lte(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    qb.add_condition("p.price_cents <= ?")
        .bind_i64(max_cents(key, value)?);
    Ok(())
}

fn stock_gte(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    qb.add_condition("p.stock >= ?").bind_i64(integer(key, value)?);
    Ok(())
}

fn stock_lte(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    qb.add_condition("p.stock <= ?").bind_i64(integer(key, value)?);
    Ok(())
}

fn stock_exact(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    qb.add_condition("p.stock = ?").bind_i64(integer(key, value)?);
    Ok(())
}

fn is_low_stock(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    let condition = if boolean(key, value)? {
        "p.stock < ?"
    } else {
        "p.stock >= ?"
    };
    qb.add_condition(condition).bind_i64(LOW_STOCK_THRESHOLD);
    Ok(())
}
