//! Customer Service - creation with exhaustive validation, bulk creation, listing

use sqlx::SqlitePool;

use crate::db::repository::customer::{self as repo, NewCustomer};
use crate::db::repository::RepoError;
use crate::query::{CUSTOMERS, PageLimits, paginate};
use crate::utils::validation::{MAX_NAME_LEN, validate_email, validate_phone, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Customer, CustomerCreate};
use shared::request::ListRequest;
use shared::response::{BulkCustomersPayload, Connection, CustomerPayload};

fn email_taken(email: &str) -> AppError {
    AppError::with_message(
        ErrorCode::CustomerEmailExists,
        format!("Email already exists: {email}."),
    )
    .on_field("email")
    .with_detail("value", email)
}

#[derive(Clone)]
pub struct CustomerService {
    pool: SqlitePool,
    limits: PageLimits,
}

impl CustomerService {
    pub fn new(pool: SqlitePool, limits: PageLimits) -> Self {
        Self { pool, limits }
    }

    /// Create one customer; every validation problem is reported together
    /// and nothing is written unless all checks pass.
    pub async fn create(&self, input: CustomerCreate) -> CustomerPayload {
        let data = NewCustomer {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        };

        let mut errors = Vec::new();
        if let Err(e) = validate_required_text(&data.name, "name", MAX_NAME_LEN) {
            errors.push(e);
        }
        let email_valid = match validate_email(&data.email) {
            Ok(()) => true,
            Err(e) => {
                errors.push(e);
                false
            }
        };
        if let Some(phone) = &data.phone
            && let Err(e) = validate_phone(phone)
        {
            errors.push(e);
        }

        if email_valid {
            match repo::email_exists(&self.pool, &data.email).await {
                Ok(true) => errors.push(email_taken(&data.email)),
                Ok(false) => {}
                Err(e) => return CustomerPayload::failed(vec![e.into()]),
            }
        }

        if !errors.is_empty() {
            tracing::debug!(email = %data.email, errors = errors.len(), "Customer rejected");
            return CustomerPayload::failed(errors);
        }

        let email = data.email.clone();
        match repo::create(&self.pool, data).await {
            Ok(customer) => {
                tracing::info!(customer_id = customer.id, email = %customer.email, "Customer created");
                CustomerPayload::created(customer)
            }
            // Lost a race with a concurrent insert of the same email
            Err(RepoError::Duplicate(_)) => CustomerPayload::failed(vec![email_taken(&email)]),
            Err(e) => CustomerPayload::failed(vec![e.into()]),
        }
    }

    /// Create customers one by one; a failing item does not block the rest.
    ///
    /// Items run in input order, so a duplicate within the batch fails on
    /// its second occurrence. Errors carry the item's `index`.
    pub async fn bulk_create(&self, inputs: Vec<CustomerCreate>) -> BulkCustomersPayload {
        let mut payload = BulkCustomersPayload::default();
        for (index, input) in inputs.into_iter().enumerate() {
            let result = self.create(input).await;
            match result.customer {
                Some(customer) => payload.customers.push(customer),
                None => payload.errors.extend(
                    result
                        .errors
                        .into_iter()
                        .map(|e| e.with_detail("index", index)),
                ),
            }
        }
        tracing::info!(
            created = payload.customers.len(),
            errors = payload.errors.len(),
            "Bulk customer creation finished"
        );
        payload
    }

    pub async fn list(&self, request: &ListRequest) -> AppResult<Connection<Customer>> {
        let page = paginate(&self.pool, &CUSTOMERS, request, self.limits).await?;
        let nodes = repo::find_by_ids(&self.pool, &page.ids()).await?;
        Ok(page.into_connection(nodes, |c| c.id))
    }

    pub async fn find(&self, id: i64) -> AppResult<Option<Customer>> {
        Ok(repo::find_by_id(&self.pool, id).await?)
    }
}
