//! Product Repository

use super::RepoResult;
use crate::query::{fold_case, placeholders};
use crate::utils::money;
use shared::models::Product;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

const PRODUCT_SELECT: &str =
    "SELECT id, name, description, price_cents, stock, created_at FROM product";

/// Ids bound per `IN (...)` query, well under SQLite's variable limit
const ID_CHUNK: usize = 500;

/// Storage shape of a product, price in cents
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: i64,
    pub created_at: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: money::from_cents(row.price_cents),
            stock: row.stock,
            created_at: row.created_at,
        }
    }
}

/// Validated product fields
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: i64,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Product::from))
}

/// Rows with the given ids, in no particular order.
///
/// Takes a connection so the order workflow can read inside its transaction.
/// Long id lists are looked up [`ID_CHUNK`] at a time.
pub async fn find_rows_by_ids(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> RepoResult<Vec<ProductRow>> {
    let mut rows = Vec::with_capacity(ids.len().min(ID_CHUNK));
    for chunk in ids.chunks(ID_CHUNK) {
        let sql = format!("{PRODUCT_SELECT} WHERE id IN ({})", placeholders(chunk.len()));
        let mut query = sqlx::query_as::<_, ProductRow>(&sql);
        for id in chunk {
            query = query.bind(id);
        }
        rows.extend(query.fetch_all(&mut *conn).await?);
    }
    Ok(rows)
}

pub async fn find_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Product>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut conn = pool.acquire().await?;
    let rows = find_rows_by_ids(&mut conn, ids).await?;
    Ok(rows.into_iter().map(Product::from).collect())
}

pub async fn create(pool: &SqlitePool, data: NewProduct) -> RepoResult<Product> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "INSERT INTO product (name, description, price_cents, stock, name_fold, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price_cents)
    .bind(data.stock)
    .bind(fold_case(&data.name))
    .bind(now)
    .execute(pool)
    .await?;

    Ok(ProductRow {
        id: result.last_insert_rowid(),
        name: data.name,
        description: data.description,
        price_cents: data.price_cents,
        stock: data.stock,
        created_at: now,
    }
    .into())
}

/// Take `quantity` units of stock, only if that many are left.
///
/// Returns `false` when the guard fails (or the product is gone).
pub async fn decrement_stock<'e, E>(executor: E, id: i64, quantity: i64) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE product SET stock = stock - ?1 WHERE id = ?2 AND stock >= ?1")
        .bind(quantity)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn widget(stock: i64) -> NewProduct {
        NewProduct {
            name: "Widget".into(),
            description: None,
            price_cents: 1000,
            stock,
        }
    }

    #[tokio::test]
    async fn test_create_keeps_two_decimals() {
        let db = DbService::in_memory().await.unwrap();
        let product = create(&db.pool, widget(1)).await.unwrap();
        assert_eq!(product.price.to_string(), "10.00");

        let found = find_by_id(&db.pool, product.id).await.unwrap().unwrap();
        assert_eq!(found, product);
    }

    #[tokio::test]
    async fn test_decrement_is_guarded() {
        let db = DbService::in_memory().await.unwrap();
        let product = create(&db.pool, widget(2)).await.unwrap();

        assert!(decrement_stock(&db.pool, product.id, 2).await.unwrap());
        assert!(!decrement_stock(&db.pool, product.id, 1).await.unwrap());

        let found = find_by_id(&db.pool, product.id).await.unwrap().unwrap();
        assert_eq!(found.stock, 0);
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_missing() {
        let db = DbService::in_memory().await.unwrap();
        let a = create(&db.pool, widget(1)).await.unwrap();
        let found = find_by_ids(&db.pool, &[a.id, a.id + 100]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(find_by_ids(&db.pool, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_ids_beyond_variable_limit() {
        let db = DbService::in_memory().await.unwrap();
        let a = create(&db.pool, widget(1)).await.unwrap();
        let b = create(&db.pool, widget(2)).await.unwrap();

        let mut ids: Vec<i64> = (1_000..41_000).collect();
        ids.push(a.id);
        ids.insert(0, b.id);
        let found = find_by_ids(&db.pool, &ids).await.unwrap();
        let mut found_ids: Vec<i64> = found.iter().map(|p| p.id).collect();
        found_ids.sort();
        assert_eq!(found_ids, vec![a.id, b.id]);
    }
}
