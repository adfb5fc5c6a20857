use serde_json::Value;

use crate::error::{AppError, Result};

/// Typed outcome of reading the `token` field from a status request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCredential {
    Present(String),
    /// Field absent, null, or empty.
    Missing,
    /// Field present but not a usable string: wrong JSON type, an
    /// undecodable query string, or a value containing NUL.
    Malformed,
}

impl TokenCredential {
    /// From the `token` query parameter of a GET request.
    pub fn from_query(token: Option<String>) -> Self {
        match token {
            Some(value) if value.is_empty() => TokenCredential::Missing,
            Some(value) => Self::from_text(value),
            None => TokenCredential::Missing,
        }
    }

    /// From the raw body of a POST request. An empty body carries no token;
    /// anything else must parse as JSON.
    pub fn from_json_body(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(TokenCredential::Missing);
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|_| AppError::InvalidInput("Invalid JSON body".to_string()))?;

        Ok(Self::from_json_value(value.get("token")))
    }

    fn from_json_value(token: Option<&Value>) -> Self {
        match token {
            None | Some(Value::Null) => TokenCredential::Missing,
            Some(Value::String(s)) if s.is_empty() => TokenCredential::Missing,
            Some(Value::String(s)) => Self::from_text(s.clone()),
            Some(_) => TokenCredential::Malformed,
        }
    }

    // Text columns cannot hold NUL, so such a value can never match a token.
    fn from_text(value: String) -> Self {
        if value.contains('\0') {
            TokenCredential::Malformed
        } else {
            TokenCredential::Present(value)
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            TokenCredential::Present(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_token_present() {
        assert_eq!(
            TokenCredential::from_query(Some("1234567890".into())),
            TokenCredential::Present("1234567890".into())
        );
    }

    #[test]
    fn test_query_token_absent_or_empty() {
        assert_eq!(TokenCredential::from_query(None), TokenCredential::Missing);
        assert_eq!(
            TokenCredential::from_query(Some(String::new())),
            TokenCredential::Missing
        );
    }

    #[test]
    fn test_body_token_present() {
        let credential = TokenCredential::from_json_body(br#"{"token": "1234567890"}"#).unwrap();
        assert_eq!(credential.value(), Some("1234567890"));
    }

    #[test]
    fn test_body_token_missing() {
        let bodies: [&[u8]; 6] = [
            b"",
            b"   \n",
            b"{}",
            br#"{"token": null}"#,
            br#"{"token": ""}"#,
            b"[1, 2]",
        ];
        for body in bodies {
            assert_eq!(
                TokenCredential::from_json_body(body).unwrap(),
                TokenCredential::Missing,
                "body: {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_body_token_malformed() {
        let bodies: [&[u8]; 3] = [
            br#"{"token": 1234567890}"#,
            br#"{"token": ["a"]}"#,
            br#"{"token": {}}"#,
        ];
        for body in bodies {
            assert_eq!(
                TokenCredential::from_json_body(body).unwrap(),
                TokenCredential::Malformed
            );
        }
    }

    #[test]
    fn test_nul_in_token_is_malformed() {
        for value in ["\0", "1234\u{0}567890"] {
            assert_eq!(
                TokenCredential::from_query(Some(value.into())),
                TokenCredential::Malformed
            );
        }
        assert_eq!(
            TokenCredential::from_json_body(br#"{"token": "\u0000"}"#).unwrap(),
            TokenCredential::Malformed
        );
        assert_eq!(
            TokenCredential::from_json_body(br#"{"token": "12345\u000067890"}"#).unwrap(),
            TokenCredential::Malformed
        );
    }

    #[test]
    fn test_body_invalid_json() {
        let err = TokenCredential::from_json_body(b"{not json").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg == "Invalid JSON body"));
    }

    #[test]
    fn test_value_only_for_present() {
        assert_eq!(TokenCredential::Missing.value(), None);
        assert_eq!(TokenCredential::Malformed.value(), None);
    }
}
