//! Input validation helpers
//!
//! Centralized text length constants and field checks. Each helper returns
//! the finding as an [`AppError`] so callers can collect every problem in
//! one pass.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidateEmail;

use crate::utils::money::{self, MAX_AMOUNT_CENTS};
use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: customer, product
pub const MAX_NAME_LEN: usize = 255;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 20;

/// Product descriptions
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// `+` and 10 to 15 digits, or `ddd-ddd-dddd`
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+\d{10,15}|\d{3}-\d{3}-\d{4})$").expect("phone pattern compiles")
});

// ── Text ────────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, format!("{field} must not be empty"))
                .on_field(field),
        );
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .on_field(field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .on_field(field));
    }
    Ok(())
}

// ── Contact fields ──────────────────────────────────────────────────

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    if is_valid_phone(phone) {
        return Ok(());
    }
    Err(AppError::with_message(
        ErrorCode::CustomerInvalidPhone,
        format!("Invalid phone number format: {phone}."),
    )
    .on_field("phone")
    .with_detail("value", phone))
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.len() <= MAX_EMAIL_LEN && email.validate_email() {
        return Ok(());
    }
    Err(AppError::with_message(
        ErrorCode::CustomerInvalidEmail,
        format!("Invalid email address: {email}."),
    )
    .on_field("email")
    .with_detail("value", email))
}

// ── Product fields ──────────────────────────────────────────────────

/// Validate a price and return it in cents.
///
/// Strictly positive, at most two decimals and ten significant digits.
pub fn validate_price(price: Decimal) -> Result<i64, AppError> {
    let invalid = |message: String| {
        AppError::with_message(ErrorCode::ProductInvalidPrice, message)
            .on_field("price")
            .with_detail("value", price.to_string())
    };

    if price <= Decimal::ZERO {
        return Err(invalid("Price must be positive.".to_string()));
    }
    match money::to_cents(price) {
        Some(cents) if cents <= MAX_AMOUNT_CENTS => Ok(cents),
        Some(_) => Err(invalid(format!(
            "Price must have at most 10 digits: {price}."
        ))),
        None => Err(invalid(format!(
            "Price must have at most {} decimal places: {price}.",
            money::DECIMAL_PLACES
        ))),
    }
}

pub fn validate_stock(stock: i64) -> Result<(), AppError> {
    if stock < 0 {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidStock,
            "Stock cannot be negative.",
        )
        .on_field("stock")
        .with_detail("value", stock));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_phone_formats() {
        assert!(is_valid_phone("+12223334444"));
        assert!(is_valid_phone("123-456-7890"));
        assert!(is_valid_phone("+123456789012345"));
        assert!(!is_valid_phone("+123456789"));
        assert!(!is_valid_phone("1234567890"));
        assert!(!is_valid_phone("123-4567-890"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_validate_phone_message() {
        let err = validate_phone("12").unwrap_err();
        assert_eq!(err.code, ErrorCode::CustomerInvalidPhone);
        assert_eq!(err.message, "Invalid phone number format: 12.");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("Alice", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert!(validate_required_text(&"x".repeat(256), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price(Decimal::from_str("10.00").unwrap()).unwrap(), 1000);
        assert_eq!(validate_price(Decimal::from_str("0.01").unwrap()).unwrap(), 1);

        let err = validate_price(Decimal::ZERO).unwrap_err();
        assert_eq!(err.message, "Price must be positive.");
        assert!(validate_price(Decimal::from_str("-5").unwrap()).is_err());
        assert!(validate_price(Decimal::from_str("1.005").unwrap()).is_err());
        assert!(validate_price(Decimal::from_str("100000000.00").unwrap()).is_err());
        assert!(validate_price(Decimal::from_str("99999999.99").unwrap()).is_ok());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        let err = validate_stock(-1).unwrap_err();
        assert_eq!(err.message, "Stock cannot be negative.");
    }
}
