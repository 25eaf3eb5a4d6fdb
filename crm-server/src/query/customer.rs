//! Customer list filters

use serde_json::Value;

use super::builder::QueryBuilder;
use super::filter::{CollectionSpec, FilterField, date_bound, text};
use crate::utils::AppResult;
use shared::models::NodeKind;

static ID_SORT: super::sort::SortField = CollectionSpec::id_sort("c.id");

pub static CUSTOMERS: CollectionSpec = CollectionSpec {
    kind: NodeKind::Customer,
    from: "customer c",
    id_column: "c.id",
    filters: &[
        FilterField {
            key: "name",
            apply: name,
        },
        FilterField {
            key: "email",
            apply: email,
        },
        FilterField {
            key: "created_at_gte",
            apply: created_at_gte,
        },
        FilterField {
            key: "created_at_lte",
            apply: created_at_lte,
        },
        FilterField {
            key: "phone_starts_with",
            apply: phone_starts_with,
        },
    ],
    sorts: &[],
    default_sort: &ID_SORT,
};

fn name(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    if let Some(needle) = text(key, value)? {
        qb.add_contains("c.name_fold", needle);
    }
    Ok(())
}

fn email(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    if let Some(needle) = text(key, value)? {
        qb.add_contains("c.email_fold", needle);
    }
    Ok(())
}

fn created_at_gte(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    qb.add_condition("c.created_at >= ?")
        .bind_i64(date_bound(key, value, false)?);
    Ok(())
}

fn created_at_lte(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    qb.add_condition("c.created_at <= ?")
        .bind_i64(date_bound(key, value, true)?);
    Ok(())
}

fn phone_starts_with(qb: &mut QueryBuilder, key: &str, value: &Value) -> AppResult<()> {
    if let Some(prefix) = text(key, value)? {
        qb.add_starts_with("c.phone", prefix);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::filter::apply_filters;
    use crate::utils::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_customer_filters() {
        let mut qb = QueryBuilder::new();
        let filter = json!({ "phoneStartsWith": "+1", "createdAtLte": "2024-03-01" });
        apply_filters(&CUSTOMERS, filter.as_object().unwrap(), &mut qb).unwrap();
        assert_eq!(
            qb.build_where_clause(),
            " WHERE c.created_at <= ? AND c.phone LIKE ? ESCAPE '\\'"
        );
    }

    #[test]
    fn test_customers_have_no_order_by() {
        let mut qb = QueryBuilder::new();
        let filter = json!({ "order_by": "name" });
        let err = apply_filters(&CUSTOMERS, filter.as_object().unwrap(), &mut qb).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownFilter);
    }
}
