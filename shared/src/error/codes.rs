//! Unified error codes for the CRM core
//!
//! This module defines all error codes used by the service layer, the HTTP
//! transport and the mutation payloads. Error codes are organized by category:
//! - 0xxx: General errors (validation, identifiers, query configuration)
//! - 4xxx: Order errors
//! - 6xxx: Product errors
//! - 8xxx: Customer errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Identifier is not a valid id for the expected kind
    InvalidIdentifier = 9,
    /// Pagination cursor is malformed or belongs to another query
    InvalidCursor = 10,
    /// Filter key is not recognized for the collection
    UnknownFilter = 11,
    /// Filter value has the wrong type or format
    InvalidFilterValue = 12,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no products
    OrderEmpty = 4007,
    /// None of the requested products could be linked
    OrderNoValidProducts = 4008,
    /// Order total exceeds the representable amount
    OrderTotalOutOfRange = 4009,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Product is out of stock
    ProductOutOfStock = 6003,
    /// Product stock is below the requested quantity
    ProductInsufficientStock = 6004,
    /// Product stock value is invalid
    ProductInvalidStock = 6005,

    // ==================== 8xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 8001,
    /// Customer email already exists
    CustomerEmailExists = 8002,
    /// Customer email is malformed
    CustomerInvalidEmail = 8003,
    /// Customer phone does not match an accepted format
    CustomerInvalidPhone = 8004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::InvalidIdentifier => "Invalid identifier",
            ErrorCode::InvalidCursor => "Invalid pagination cursor",
            ErrorCode::UnknownFilter => "Unknown filter",
            ErrorCode::InvalidFilterValue => "Invalid filter value",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "At least one product ID must be provided",
            ErrorCode::OrderNoValidProducts => "No valid products could be added to the order",
            ErrorCode::OrderTotalOutOfRange => "Order total exceeds the allowed amount",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Price must be positive",
            ErrorCode::ProductOutOfStock => "Product is out of stock",
            ErrorCode::ProductInsufficientStock => "Insufficient stock",
            ErrorCode::ProductInvalidStock => "Stock cannot be negative",

            // Customer
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::CustomerEmailExists => "Email already exists",
            ErrorCode::CustomerInvalidEmail => "Invalid email address",
            ErrorCode::CustomerInvalidPhone => "Invalid phone number format",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::InvalidIdentifier),
            10 => Ok(ErrorCode::InvalidCursor),
            11 => Ok(ErrorCode::UnknownFilter),
            12 => Ok(ErrorCode::InvalidFilterValue),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderNoValidProducts),
            4009 => Ok(ErrorCode::OrderTotalOutOfRange),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductOutOfStock),
            6004 => Ok(ErrorCode::ProductInsufficientStock),
            6005 => Ok(ErrorCode::ProductInvalidStock),

            // Customer
            8001 => Ok(ErrorCode::CustomerNotFound),
            8002 => Ok(ErrorCode::CustomerEmailExists),
            8003 => Ok(ErrorCode::CustomerInvalidEmail),
            8004 => Ok(ErrorCode::CustomerInvalidPhone),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
