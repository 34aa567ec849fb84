use crate::error::AppError;
use crate::errors::ErrorCode;

/// Parse a path segment as a positive row id.
pub fn parse_resource_id(raw: &str, code: ErrorCode, what: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::invalid(code, format!("Invalid {what} ID")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_integers() {
        assert_eq!(
            parse_resource_id("42", ErrorCode::InvalidOrderId, "order").ok(),
            Some(42)
        );
    }

    #[test]
    fn rejects_everything_else() {
        for raw in ["abc", "", "0", "-3", "1.5", "9999999999999999999999"] {
            let err = parse_resource_id(raw, ErrorCode::InvalidProductId, "product")
                .expect_err(raw);
            assert_eq!(err.code(), ErrorCode::InvalidProductId);
            assert_eq!(err.to_string(), "Validation error: Invalid product ID");
        }
    }
}
