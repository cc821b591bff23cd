use crate::server::error::internal::InternalError;

/// Parses a u64 value from a stored String ID
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(InternalError::ParseStringId)` - Failed to parse the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, InternalError> {
    value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })
}

/// Borrowing variant of [`parse_u64_from_string`] for request and command input.
pub fn parse_u64_from_str(value: &str) -> Result<u64, InternalError> {
    parse_u64_from_string(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snowflake() {
        assert_eq!(
            parse_u64_from_string("123456789012345678".to_string()).unwrap(),
            123456789012345678
        );
    }

    #[test]
    fn rejects_non_numeric_id() {
        let err = parse_u64_from_str("not-an-id").unwrap_err();

        assert!(matches!(err, InternalError::ParseStringId { ref value, .. } if value == "not-an-id"));
    }
}
