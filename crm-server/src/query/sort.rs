//! Sort directives for list queries
//!
//! `order_by` accepts one key per collection, written `price`, `-price`,
//! `price_asc` or `price_desc` (camelCase keys are normalized first).

use serde::{Deserialize, Serialize};

use super::filter::normalize_key;
use crate::utils::AppError;

/// SQL type of a sort column, which decides how cursor values are bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortValueType {
    Integer,
    Text,
}

/// A sortable column of a collection
#[derive(Debug)]
pub struct SortField {
    /// Name accepted in `order_by`
    pub key: &'static str,
    /// Qualified SQL column
    pub column: &'static str,
    pub value_type: SortValueType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

impl Direction {
    pub fn sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    /// Comparison that moves forward in this direction
    pub fn after_op(&self) -> &'static str {
        match self {
            Direction::Asc => ">",
            Direction::Desc => "<",
        }
    }
}

/// Active sort of a list query
#[derive(Debug, Clone, Copy)]
pub struct Sort {
    pub field: &'static SortField,
    pub direction: Direction,
}

impl Sort {
    pub fn ascending(field: &'static SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    /// `ORDER BY` clause with the id tiebreaker in the same direction
    pub fn order_clause(&self, id_column: &str) -> String {
        let dir = self.direction.sql();
        if self.field.column == id_column {
            format!(" ORDER BY {id_column} {dir}")
        } else {
            format!(" ORDER BY {} {dir}, {id_column} {dir}", self.field.column)
        }
    }
}

/// Parse an `order_by` value against the collection's sortable fields
pub fn parse_order_by(raw: &str, fields: &'static [SortField]) -> Result<Sort, AppError> {
    let trimmed = raw.trim();
    if trimmed.contains(',') {
        return Err(AppError::invalid_filter_value(
            "order_by",
            "only one sort key is supported",
        ));
    }

    let (key, direction) = match trimmed.strip_prefix('-') {
        Some(rest) => (normalize_key(rest), Direction::Desc),
        None => {
            let key = normalize_key(trimmed);
            if let Some(base) = key.strip_suffix("_desc") {
                (base.to_string(), Direction::Desc)
            } else if let Some(base) = key.strip_suffix("_asc") {
                (base.to_string(), Direction::Asc)
            } else {
                (key, Direction::Asc)
            }
        }
    };

    fields
        .iter()
        .find(|field| field.key == key)
        .map(|field| Sort { field, direction })
        .ok_or_else(|| {
            let allowed: Vec<&str> = fields.iter().map(|f| f.key).collect();
            AppError::invalid_filter_value(
                "order_by",
                format!("unknown sort key '{}', expected one of {}", key, allowed.join(", ")),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;

    static FIELDS: &[SortField] = &[
        SortField {
            key: "price",
            column: "p.price_cents",
            value_type: SortValueType::Integer,
        },
        SortField {
            key: "created_at",
            column: "p.created_at",
            value_type: SortValueType::Integer,
        },
    ];

    #[test]
    fn test_parse_forms() {
        let sort = parse_order_by("price", FIELDS).unwrap();
        assert_eq!(sort.field.key, "price");
        assert_eq!(sort.direction, Direction::Asc);

        assert_eq!(parse_order_by("-price", FIELDS).unwrap().direction, Direction::Desc);
        assert_eq!(parse_order_by("price_desc", FIELDS).unwrap().direction, Direction::Desc);
        assert_eq!(parse_order_by("price_asc", FIELDS).unwrap().direction, Direction::Asc);
        assert_eq!(parse_order_by("priceDesc", FIELDS).unwrap().direction, Direction::Desc);

        let sort = parse_order_by("-createdAt", FIELDS).unwrap();
        assert_eq!(sort.field.key, "created_at");
        assert_eq!(sort.direction, Direction::Desc);
    }

    #[test]
    fn test_parse_rejects_unknown_and_multiple() {
        let err = parse_order_by("colour", FIELDS).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFilterValue);

        assert!(parse_order_by("price,-created_at", FIELDS).is_err());
    }

    #[test]
    fn test_order_clause() {
        let sort = parse_order_by("-price", FIELDS).unwrap();
        assert_eq!(
            sort.order_clause("p.id"),
            " ORDER BY p.price_cents DESC, p.id DESC"
        );
    }
}
