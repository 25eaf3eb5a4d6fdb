//! Product Service

use sqlx::SqlitePool;

use crate::db::repository::product::{self as repo, NewProduct};
use crate::query::{PRODUCTS, PageLimits, paginate};
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, validate_optional_text, validate_price,
    validate_required_text, validate_stock,
};
use crate::utils::AppResult;
use shared::models::{Product, ProductCreate};
use shared::request::ListRequest;
use shared::response::{Connection, ProductPayload};

#[derive(Clone)]
pub struct ProductService {
    pool: SqlitePool,
    limits: PageLimits,
}

impl ProductService {
    pub fn new(pool: SqlitePool, limits: PageLimits) -> Self {
        Self { pool, limits }
    }

    pub async fn create(&self, input: ProductCreate) -> ProductPayload {
        let name = input.name.trim().to_string();
        let description = input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let mut errors = Vec::new();
        if let Err(e) = validate_required_text(&name, "name", MAX_NAME_LEN) {
            errors.push(e);
        }
        if let Err(e) = validate_optional_text(&description, "description", MAX_DESCRIPTION_LEN) {
            errors.push(e);
        }
        let price_cents = match validate_price(input.price) {
            Ok(cents) => Some(cents),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        if let Err(e) = validate_stock(input.stock) {
            errors.push(e);
        }

        let Some(price_cents) = price_cents.filter(|_| errors.is_empty()) else {
            tracing::debug!(name = %name, errors = errors.len(), "Product rejected");
            return ProductPayload::failed(errors);
        };

        let data = NewProduct {
            name,
            description,
            price_cents,
            stock: input.stock,
        };
        match repo::create(&self.pool, data).await {
            Ok(product) => {
                tracing::info!(
                    product_id = product.id,
                    name = %product.name,
                    price = %product.price,
                    stock = product.stock,
                    "Product created"
                );
                ProductPayload::created(product)
            }
            Err(e) => ProductPayload::failed(vec![e.into()]),
        }
    }

    pub async fn list(&self, request: &ListRequest) -> AppResult<Connection<Product>> {
        let page = paginate(&self.pool, &PRODUCTS, request, self.limits).await?;
        let nodes = repo::find_by_ids(&self.pool, &page.ids()).await?;
        Ok(page.into_connection(nodes, |p| p.id))
    }

    pub async fn find(&self, id: i64) -> AppResult<Option<Product>> {
        Ok(repo::find_by_id(&self.pool, id).await?)
    }
}
