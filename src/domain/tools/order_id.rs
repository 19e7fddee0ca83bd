//! Canonical order identifier.

use std::fmt;

use crate::domain::foundation::ValidationError;

const PREFIX: &str = "OP";
const DIGITS: usize = 5;

/// Order identifier in canonical `OP#####` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    /// Normalizes a free-form identifier.
    ///
    /// Every non-digit character is dropped; exactly five digits must
    /// remain. `"op-123 45"`, `"OP12345"` and `"12345"` all yield `OP12345`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::empty_field("orderId"));
        }
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != DIGITS {
            return Err(ValidationError::invalid_format(
                "orderId",
                format!("expected {} digits, found {}", DIGITS, digits.len()),
            ));
        }
        Ok(Self(format!("{}{}", PREFIX, digits)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_id_is_accepted() {
        assert_eq!(OrderId::parse("OP12345").unwrap().as_str(), "OP12345");
    }

    #[test]
    fn noisy_input_is_normalized() {
        assert_eq!(OrderId::parse("op-123 45").unwrap().as_str(), "OP12345");
        assert_eq!(OrderId::parse("#12345").unwrap().as_str(), "OP12345");
    }

    #[test]
    fn wrong_digit_count_is_rejected() {
        assert!(matches!(
            OrderId::parse("OP1234"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(OrderId::parse("OP123456").is_err());
        assert!(OrderId::parse("no digits").is_err());
    }

    #[test]
    fn blank_input_is_an_empty_field() {
        assert!(matches!(
            OrderId::parse("   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }
}
