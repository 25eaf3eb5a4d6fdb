//! Utility module
//!
//! - [`AppError`] / [`ApiResponse`] re-exported from `shared::error`
//! - logging setup, input validation, money conversion

pub mod logger;
pub mod money;
pub mod validation;

pub use shared::error::{
    ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode, ErrorKind,
};
