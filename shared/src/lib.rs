//! Shared types for the CRM core
//!
//! Models, inputs, payloads, connection types and the unified error system,
//! used by crm-server and by API clients.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode, ErrorKind};
pub use request::ListRequest;
pub use response::{Connection, Edge, PageInfo};
