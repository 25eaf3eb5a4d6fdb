//! Error category and kind classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 4xxx: Order errors
/// - 6xxx: Product errors
/// - 8xxx: Customer errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Order errors (4xxx)
    Order,
    /// Product errors (6xxx)
    Product,
    /// Customer errors (8xxx)
    Customer,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            4000..5000 => Self::Order,
            6000..7000 => Self::Product,
            8000..9000 => Self::Customer,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Order => "order",
            Self::Product => "product",
            Self::Customer => "customer",
            Self::System => "system",
        }
    }
}

/// What went wrong, independent of which entity it concerns.
///
/// Mutation payloads carry errors as data; callers branch on the kind
/// rather than on individual codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad input shape or format (invalid phone, non-positive price, unknown filter)
    Validation,
    /// Referenced id does not exist
    NotFound,
    /// Uniqueness violation
    Conflict,
    /// Product unavailable in the requested quantity
    InsufficientStock,
    /// Malformed identifier
    InvalidIdentifier,
    /// Storage or other infrastructure failure
    Internal,
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Get the taxonomy kind for this error code
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound | Self::OrderNotFound | Self::ProductNotFound | Self::CustomerNotFound => {
                ErrorKind::NotFound
            }

            Self::AlreadyExists | Self::CustomerEmailExists => ErrorKind::Conflict,

            Self::ProductOutOfStock | Self::ProductInsufficientStock => {
                ErrorKind::InsufficientStock
            }

            Self::InvalidIdentifier => ErrorKind::InvalidIdentifier,

            Self::Success
            | Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError => ErrorKind::Internal,

            _ => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(12), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(6003), ErrorCategory::Product);
        assert_eq!(ErrorCategory::from_code(8002), ErrorCategory::Customer);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_kind() {
        assert_eq!(ErrorCode::CustomerInvalidPhone.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::ProductInvalidPrice.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::UnknownFilter.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::CustomerNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ErrorCode::ProductNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ErrorCode::CustomerEmailExists.kind(), ErrorKind::Conflict);
        assert_eq!(
            ErrorCode::ProductOutOfStock.kind(),
            ErrorKind::InsufficientStock
        );
        assert_eq!(
            ErrorCode::InvalidIdentifier.kind(),
            ErrorKind::InvalidIdentifier
        );
        assert_eq!(ErrorCode::DatabaseError.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_kind_serialize() {
        let json = serde_json::to_string(&ErrorKind::InsufficientStock).unwrap();
        assert_eq!(json, "\"insufficient_stock\"");
    }
}
