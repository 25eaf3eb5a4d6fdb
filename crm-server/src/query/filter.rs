//! Filter engine
//!
//! Each collection declares a static table of [`FilterField`]s mapping a
//! filter key to a function that adds its predicate to a [`QueryBuilder`].
//! All filters combine with AND. Unknown keys are rejected, `null` values
//! impose no constraint.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use super::builder::QueryBuilder;
use super::sort::{Sort, SortField, SortValueType, parse_order_by};
use crate::utils::money;
use crate::utils::{AppError, AppResult};
use shared::models::{NodeKind, RawId};
use shared::util::parse_date_or_datetime;

/// Reserved key selecting the sort
pub const ORDER_BY_KEY: &str = "order_by";

/// Adds the predicate for `key = value`; `value` is never `null`
pub type ApplyFn = fn(&mut QueryBuilder, &str, &Value) -> AppResult<()>;

pub struct FilterField {
    pub key: &'static str,
    pub apply: ApplyFn,
}

/// Everything the engine needs to know about one collection
pub struct CollectionSpec {
    pub kind: NodeKind,
    /// FROM clause, including joins needed by filters and sorts
    pub from: &'static str,
    /// Qualified id column, the keyset tiebreaker
    pub id_column: &'static str,
    pub filters: &'static [FilterField],
    /// Keys accepted by `order_by`; empty if the collection has no sorting
    pub sorts: &'static [SortField],
    /// Sort used when `order_by` is absent
    pub default_sort: &'static SortField,
}

impl CollectionSpec {
    pub const fn id_sort(column: &'static str) -> SortField {
        SortField {
            key: "id",
            column,
            value_type: SortValueType::Integer,
        }
    }
}

/// `priceGte` -> `price_gte`; snake_case keys pass through unchanged
pub fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.trim().chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Apply every filter in `filter` to `qb` and return the requested sort.
pub fn apply_filters(
    spec: &CollectionSpec,
    filter: &Map<String, Value>,
    qb: &mut QueryBuilder,
) -> AppResult<Sort> {
    let mut sort = Sort::ascending(spec.default_sort);

    for (raw_key, value) in filter {
        let key = normalize_key(raw_key);

        if key == ORDER_BY_KEY && !spec.sorts.is_empty() {
            if let Some(order_by) = optional_text(&key, value)? {
                sort = parse_order_by(order_by, spec.sorts)?;
            }
            continue;
        }

        let field = spec
            .filters
            .iter()
            .find(|field| field.key == key)
            .ok_or_else(|| AppError::unknown_filter(raw_key.as_str()))?;

        if value.is_null() {
            continue;
        }
        (field.apply)(qb, &key, value)?;
    }

    Ok(sort)
}

// ── Value parsing ───────────────────────────────────────────────────

fn optional_text<'v>(key: &str, value: &'v Value) -> AppResult<Option<&'v str>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.trim())),
        _ => Err(AppError::invalid_filter_value(key, "expected a string")),
    }
}

/// Text value; empty strings impose no constraint
pub fn text<'v>(key: &str, value: &'v Value) -> AppResult<Option<&'v str>> {
    optional_text(key, value)
}

pub fn integer(key: &str, value: &Value) -> AppResult<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| AppError::invalid_filter_value(key, "expected an integer"))
}

pub fn boolean(key: &str, value: &Value) -> AppResult<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
    .ok_or_else(|| AppError::invalid_filter_value(key, "expected a boolean"))
}

pub fn decimal(key: &str, value: &Value) -> AppResult<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
    .ok_or_else(|| AppError::invalid_filter_value(key, "expected a decimal number"))
}

/// Lower money bound in cents: the smallest cent amount `>= value`
pub fn min_cents(key: &str, value: &Value) -> AppResult<i64> {
    money::ceil_cents(decimal(key, value)?)
        .ok_or_else(|| AppError::invalid_filter_value(key, "amount out of range"))
}

/// Upper money bound in cents: the largest cent amount `<= value`
pub fn max_cents(key: &str, value: &Value) -> AppResult<i64> {
    money::floor_cents(decimal(key, value)?)
        .ok_or_else(|| AppError::invalid_filter_value(key, "amount out of range"))
}

/// Date bound in epoch millis; an upper bound given as a date covers the whole day
pub fn date_bound(key: &str, value: &Value, upper: bool) -> AppResult<i64> {
    value
        .as_str()
        .and_then(|raw| parse_date_or_datetime(raw, upper))
        .ok_or_else(|| {
            AppError::invalid_filter_value(key, "expected YYYY-MM-DD or an RFC 3339 datetime")
        })
}

/// Entity id given raw or as a global id of `kind`
pub fn entity_id(key: &str, value: &Value, kind: NodeKind) -> AppResult<i64> {
    let raw: RawId = serde_json::from_value(value.clone())
        .map_err(|_| AppError::invalid_filter_value(key, "expected an id"))?;
    raw.resolve(kind)
        .map_err(|_| AppError::invalid_filter_value(key, format!("invalid {} id '{}'", kind, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;
    use serde_json::json;

    fn name_contains(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
        if let Some(name) = text(key, value)? {
            qb.add_contains("t.name", name);
        }
        Ok(())
    }

    fn amount_gte(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
        qb.add_condition("t.amount >= ?").bind_i64(min_cents(key, value)?);
        Ok(())
    }

    static FILTERS: &[FilterField] = &[
        FilterField {
            key: "name",
            apply: name_contains,
        },
        FilterField {
            key: "amount_gte",
            apply: amount_gte,
        },
    ];

    static ID_SORT: SortField = CollectionSpec::id_sort("t.id");

    static SORTS: &[SortField] = &[SortField {
        key: "name",
        column: "t.name",
        value_type: SortValueType::Text,
    }];

    static SPEC: CollectionSpec = CollectionSpec {
        kind: NodeKind::Product,
        from: "thing t",
        id_column: "t.id",
        filters: FILTERS,
        sorts: SORTS,
        default_sort: &ID_SORT,
    };

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("priceGte"), "price_gte");
        assert_eq!(normalize_key("price_gte"), "price_gte");
        assert_eq!(normalize_key("hasProductId"), "has_product_id");
        assert_eq!(normalize_key("orderBy"), "order_by");
        assert_eq!(normalize_key("createdAtGte"), "created_at_gte");
    }

    #[test]
    fn test_apply_filters_camel_and_snake() {
        let mut qb = QueryBuilder::new();
        let sort = apply_filters(
            &SPEC,
            &map(json!({ "name": "wid", "amountGte": "100.005", "orderBy": "-name" })),
            &mut qb,
        )
        .unwrap();

        assert_eq!(
            qb.build_where_clause(),
            " WHERE t.amount >= ? AND t.name LIKE ? ESCAPE '\\'"
        );
        assert_eq!(sort.field.key, "name");
    }

    #[test]
    fn test_unknown_filter_rejected() {
        let mut qb = QueryBuilder::new();
        let err = apply_filters(&SPEC, &map(json!({ "colour": "red" })), &mut qb).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownFilter);
    }

    #[test]
    fn test_null_and_empty_are_noops() {
        let mut qb = QueryBuilder::new();
        let sort = apply_filters(
            &SPEC,
            &map(json!({ "name": "", "amount_gte": null, "order_by": null })),
            &mut qb,
        )
        .unwrap();
        assert!(qb.is_empty());
        assert_eq!(sort.field.key, "id");
    }

    #[test]
    fn test_wrong_type_rejected() {
        let mut qb = QueryBuilder::new();
        let err =
            apply_filters(&SPEC, &map(json!({ "amount_gte": "lots" })), &mut qb).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFilterValue);

        let err = apply_filters(&SPEC, &map(json!({ "name": 5 })), &mut qb).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFilterValue);
    }

    #[test]
    fn test_value_parsers() {
        assert_eq!(integer("k", &json!(5)).unwrap(), 5);
        assert_eq!(integer("k", &json!("7")).unwrap(), 7);
        assert!(integer("k", &json!(5.5)).is_err());
        assert!(boolean("k", &json!(true)).unwrap());
        assert!(boolean("k", &json!("yes")).is_err());
        assert_eq!(min_cents("k", &json!(100)).unwrap(), 10000);
        assert_eq!(max_cents("k", &json!(500.5)).unwrap(), 50050);
        assert_eq!(
            entity_id("k", &json!("UHJvZHVjdDoz"), NodeKind::Product).unwrap(),
            3
        );
        assert!(entity_id("k", &json!("abc"), NodeKind::Product).is_err());
    }
}
