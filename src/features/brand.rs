//! Phone brand extraction from the free-text device descriptor.

/// Leading whitespace-delimited token of a device descriptor.
///
/// Returns `None` for an empty descriptor or one that starts with
/// whitespace. The token is not checked against any brand list.
pub fn extract_brand(descriptor: &str) -> Option<&str> {
    descriptor
        .split(char::is_whitespace)
        .next()
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_token() {
        assert_eq!(extract_brand("Samsung Galaxy S10"), Some("Samsung"));
        assert_eq!(extract_brand("iPhone"), Some("iPhone"));
        assert_eq!(extract_brand("Huawei\tP30"), Some("Huawei"));
    }

    #[test]
    fn test_no_value() {
        assert_eq!(extract_brand(""), None);
        assert_eq!(extract_brand(" Samsung"), None);
    }

    #[test]
    fn test_idempotent_on_single_token() {
        for descriptor in ["Samsung Galaxy S10", "Nokia 3310", "Apple"] {
            let brand = extract_brand(descriptor).unwrap();
            assert_eq!(extract_brand(brand), Some(brand));
        }
    }
}
