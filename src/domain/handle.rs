//! Payment handles (Venmo usernames).

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandleParseError {
    #[error("payment handle is empty")]
    Empty,
    #[error("payment handle contains invalid character {0:?}")]
    InvalidChar(char),
    #[error("payment handle must contain a letter or digit")]
    NoAlphanumeric,
}

/// A validated payment handle, stored without the leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaymentHandle(String);

impl PaymentHandle {
    /// Parse a user-entered handle. Accepts an optional leading `@` followed by
    /// ASCII letters, digits, `_`, `.` or `-`, with at least one letter or digit.
    pub fn parse(raw: &str) -> Result<Self, HandleParseError> {
        let trimmed = raw.trim();
        let body = trimmed.strip_prefix('@').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(HandleParseError::Empty);
        }
        if let Some(c) = body
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
        {
            return Err(HandleParseError::InvalidChar(c));
        }
        if !body.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(HandleParseError::NoAlphanumeric);
        }
        Ok(PaymentHandle(body.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PaymentHandle {
    type Err = HandleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PaymentHandle {
    type Error = HandleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PaymentHandle> for String {
    fn from(handle: PaymentHandle) -> Self {
        handle.0
    }
}

impl std::fmt::Display for PaymentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_at_and_whitespace() {
        let handle = PaymentHandle::parse("  @Alice-Smith_2 ").unwrap();
        assert_eq!(handle.as_str(), "Alice-Smith_2");
        assert_eq!(handle.to_string(), "@Alice-Smith_2");
    }

    #[test]
    fn test_parse_without_at() {
        assert_eq!(PaymentHandle::parse("bob.jones").unwrap().as_str(), "bob.jones");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(PaymentHandle::parse(""), Err(HandleParseError::Empty));
        assert_eq!(PaymentHandle::parse("@"), Err(HandleParseError::Empty));
    }

    #[test]
    fn test_parse_rejects_invalid_chars() {
        assert_eq!(
            PaymentHandle::parse("bob smith"),
            Err(HandleParseError::InvalidChar(' '))
        );
        assert_eq!(
            PaymentHandle::parse("@@bob"),
            Err(HandleParseError::InvalidChar('@'))
        );
        assert!(PaymentHandle::parse("bob/../x").is_err());
        for dots in [".", "..", "@...", "_-."] {
            assert_eq!(
                PaymentHandle::parse(dots),
                Err(HandleParseError::NoAlphanumeric),
                "{}",
                dots
            );
        }
    }

    #[test]
    fn test_serde_validates() {
        let handle: PaymentHandle = serde_json::from_str("\"@carol\"").unwrap();
        assert_eq!(handle.as_str(), "carol");
        assert_eq!(serde_json::to_string(&handle).unwrap(), "\"carol\"");
        assert!(serde_json::from_str::<PaymentHandle>("\"c?d\"").is_err());
    }
}
