//! Opaque pagination cursors
//!
//! A cursor is URL-safe base64 (no padding) of a small JSON document holding
//! the collection, the active sort and the last row's sort value and id.
//! Cursors are only valid for the collection and sort that issued them.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use super::builder::QueryValue;
use super::sort::{Direction, Sort, SortValueType};
use crate::utils::{AppError, AppResult};
use shared::models::NodeKind;

/// Sort value of the last row seen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CursorValue {
    Integer(i64),
    Text(String),
}

impl CursorValue {
    fn value_type(&self) -> SortValueType {
        match self {
            CursorValue::Integer(_) => SortValueType::Integer,
            CursorValue::Text(_) => SortValueType::Text,
        }
    }

    pub fn to_query_value(&self) -> QueryValue {
        match self {
            CursorValue::Integer(i) => QueryValue::Integer(*i),
            CursorValue::Text(s) => QueryValue::Text(s.clone()),
        }
    }
}

/// Decoded keyset position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub value: CursorValue,
    pub id: i64,
}

#[derive(Serialize, Deserialize)]
struct CursorPayload {
    #[serde(rename = "k")]
    kind: NodeKind,
    #[serde(rename = "s")]
    sort: String,
    #[serde(rename = "d")]
    direction: Direction,
    #[serde(rename = "v")]
    value: CursorValue,
    #[serde(rename = "i")]
    id: i64,
}

pub fn encode_cursor(kind: NodeKind, sort: &Sort, value: CursorValue, id: i64) -> AppResult<String> {
    let payload = CursorPayload {
        kind,
        sort: sort.field.key.to_string(),
        direction: sort.direction,
        value,
        id,
    };
    let json = serde_json::to_vec(&payload).map_err(|e| {
        tracing::error!(error = %e, collection = %kind, "Failed to encode cursor");
        AppError::internal("Failed to encode cursor")
    })?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a cursor issued for `kind` under `sort`
pub fn decode_cursor(raw: &str, kind: NodeKind, sort: &Sort) -> AppResult<Cursor> {
    let bytes = URL_SAFE_NO_PAD
        .decode(raw.trim())
        .map_err(|_| AppError::invalid_cursor("Malformed cursor"))?;
    let payload: CursorPayload = serde_json::from_slice(&bytes)
        .map_err(|_| AppError::invalid_cursor("Malformed cursor"))?;

    if payload.kind != kind {
        return Err(AppError::invalid_cursor(format!(
            "Cursor belongs to the {} collection",
            payload.kind
        )));
    }
    if payload.sort != sort.field.key || payload.direction != sort.direction {
        return Err(AppError::invalid_cursor(
            "Cursor was issued under a different sort order",
        ));
    }
    if payload.value.value_type() != sort.field.value_type {
        return Err(AppError::invalid_cursor("Malformed cursor"));
    }

    Ok(Cursor {
        value: payload.value,
        id: payload.id,
    })
}
