//! Customer Repository

use super::RepoResult;
use crate::query::{fold_case, placeholders};
use shared::models::Customer;
use sqlx::SqlitePool;

const CUSTOMER_SELECT: &str = "SELECT id, name, email, phone, created_at FROM customer";

/// Validated, normalized customer fields
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Customers with the given ids, in no particular order
pub async fn find_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Customer>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!("{CUSTOMER_SELECT} WHERE id IN ({})", placeholders(ids.len()));
    let mut query = sqlx::query_as::<_, Customer>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(pool).await?)
}

/// Case-insensitive, through the column's NOCASE collation
pub async fn email_exists(pool: &SqlitePool, email: &str) -> RepoResult<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customer WHERE email = ?)")
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

pub async fn create(pool: &SqlitePool, data: NewCustomer) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "INSERT INTO customer (name, email, phone, name_fold, email_fold, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(fold_case(&data.name))
    .bind(fold_case(&data.email))
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Customer {
        id: result.last_insert_rowid(),
        name: data.name,
        email: data.email,
        phone: data.phone,
        created_at: now,
    })
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::RepoError;

    fn alice() -> NewCustomer {
        NewCustomer {
            name: "Alice Wonderland".into(),
            email: "alice@example.com".into(),
            phone: Some("+12223334444".into()),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let db = DbService::in_memory().await.unwrap();
        let created = create(&db.pool, alice()).await.unwrap();
        let found = find_by_id(&db.pool, created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(find_by_id(&db.pool, created.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_unique_case_insensitive() {
        let db = DbService::in_memory().await.unwrap();
        create(&db.pool, alice()).await.unwrap();

        assert!(email_exists(&db.pool, "ALICE@example.com").await.unwrap());
        assert!(!email_exists(&db.pool, "bob@example.com").await.unwrap());

        let mut dup = alice();
        dup.email = "Alice@Example.com".into();
        let err = create(&db.pool, dup).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
        assert_eq!(count(&db.pool).await.unwrap(), 1);
    }
}
