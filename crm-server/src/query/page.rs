//! Keyset pagination over a filtered, sorted collection
//!
//! [`paginate`] resolves the page's ids and cursors; the caller loads the
//! nodes and turns the [`Page`] into a [`Connection`].

use sqlx::{Row, SqlitePool};

use super::builder::QueryBuilder;
use super::cursor::{CursorValue, decode_cursor, encode_cursor};
use super::filter::{CollectionSpec, apply_filters};
use super::sort::{Sort, SortValueType};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::request::ListRequest;
use shared::response::{Connection, Edge, PageInfo};

/// Page size bounds, from server config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: i64,
    pub max_size: i64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: 20,
            max_size: 100,
        }
    }
}

impl PageLimits {
    /// Resolve `first`: default when absent, clamped to the maximum, at least 1
    pub fn page_size(&self, first: Option<i64>) -> AppResult<i64> {
        match first {
            None => Ok(self.default_size.clamp(1, self.max_size)),
            Some(n) if n < 1 => Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("first must be at least 1, got {n}"),
            )
            .on_field("first")),
            Some(n) => Ok(n.min(self.max_size)),
        }
    }
}

/// Position of one row in the page
#[derive(Debug, Clone)]
pub struct PageKey {
    pub id: i64,
    pub cursor: String,
}

/// Ids and cursors of one page, in order
#[derive(Debug, Clone)]
pub struct Page {
    pub keys: Vec<PageKey>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub total_count: i64,
}

impl Page {
    pub fn ids(&self) -> Vec<i64> {
        self.keys.iter().map(|key| key.id).collect()
    }

    /// Pair loaded nodes with their cursors, in page order.
    ///
    /// Rows removed between the key query and the load are skipped.
    pub fn into_connection<T>(self, nodes: Vec<T>, id_of: impl Fn(&T) -> i64) -> Connection<T> {
        let mut by_id: std::collections::HashMap<i64, T> =
            nodes.into_iter().map(|node| (id_of(&node), node)).collect();

        let edges: Vec<Edge<T>> = self
            .keys
            .into_iter()
            .filter_map(|key| {
                by_id.remove(&key.id).map(|node| Edge {
                    node,
                    cursor: key.cursor,
                })
            })
            .collect();

        let page_info = PageInfo {
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
            start_cursor: edges.first().map(|edge| edge.cursor.clone()),
            end_cursor: edges.last().map(|edge| edge.cursor.clone()),
        };

        Connection {
            edges,
            page_info,
            total_count: self.total_count,
        }
    }
}

/// Run the filter, count and keyset queries for one page
pub async fn paginate(
    pool: &SqlitePool,
    spec: &CollectionSpec,
    request: &ListRequest,
    limits: PageLimits,
) -> AppResult<Page> {
    let first = limits.page_size(request.first)?;

    let mut qb = QueryBuilder::new();
    let sort = apply_filters(spec, &request.filter, &mut qb)?;

    let count_sql = format!(
        "SELECT COUNT(*) FROM {}{}",
        spec.from,
        qb.build_where_clause()
    );
    let total_count: i64 = qb
        .apply_bindings_scalar(sqlx::query_scalar(&count_sql))
        .fetch_one(pool)
        .await
        .map_err(crate::db::repository::RepoError::from)?;

    let mut page_qb = qb.clone();
    if let Some(raw) = &request.after {
        let cursor = decode_cursor(raw, spec.kind, &sort)?;
        add_keyset_condition(&mut page_qb, spec.id_column, &sort, cursor.value, cursor.id);
    }

    let sql = format!(
        "SELECT {id} AS key_id, {col} AS key_value FROM {from}{where_clause}{order} LIMIT ?",
        id = spec.id_column,
        col = sort.field.column,
        from = spec.from,
        where_clause = page_qb.build_where_clause(),
        order = sort.order_clause(spec.id_column),
    );
    page_qb.bind_i64(first + 1);

    let rows = page_qb
        .apply_bindings(sqlx::query(&sql))
        .fetch_all(pool)
        .await
        .map_err(crate::db::repository::RepoError::from)?;

    let has_next_page = rows.len() as i64 > first;
    let mut keys = Vec::with_capacity(rows.len().min(first as usize));
    for row in rows.into_iter().take(first as usize) {
        let id: i64 = row
            .try_get("key_id")
            .map_err(crate::db::repository::RepoError::from)?;
        let value = match sort.field.value_type {
            SortValueType::Integer => CursorValue::Integer(
                row.try_get("key_value")
                    .map_err(crate::db::repository::RepoError::from)?,
            ),
            SortValueType::Text => CursorValue::Text(
                row.try_get("key_value")
                    .map_err(crate::db::repository::RepoError::from)?,
            ),
        };
        keys.push(PageKey {
            id,
            cursor: encode_cursor(spec.kind, &sort, value, id)?,
        });
    }

    tracing::debug!(
        collection = %spec.kind,
        sort = sort.field.key,
        total_count,
        returned = keys.len(),
        has_next_page,
        "Page resolved"
    );

    Ok(Page {
        keys,
        has_next_page,
        has_previous_page: request.after.is_some(),
        total_count,
    })
}

/// Rows strictly after `(value, id)` in the sort order
fn add_keyset_condition(
    qb: &mut QueryBuilder,
    id_column: &str,
    sort: &Sort,
    value: CursorValue,
    id: i64,
) {
    let op = sort.direction.after_op();
    if sort.field.column == id_column {
        qb.add_condition(format!("{id_column} {op} ?")).bind_i64(id);
        return;
    }
    let col = sort.field.column;
    qb.add_condition(format!(
        "({col} {op} ? OR ({col} = ? AND {id_column} {op} ?))"
    ))
    .bind(value.to_query_value())
    .bind(value.to_query_value())
    .bind_i64(id);
}
