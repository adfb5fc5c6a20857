use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::display::display_name;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Token {
    pub id: i64,
    pub account_id: i64,
    /// Bearer credential. Never serialized.
    #[serde(skip_serializing)]
    pub token: String,
    pub comment: String,
    pub last_seen: Option<DateTime<Utc>>,
}

impl Token {
    /// Same format as [`super::Account::display`], with the token's own comment.
    pub fn display(&self, user_name: Option<&str>) -> String {
        display_name(user_name, &self.comment)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewToken {
    pub account_id: i64,
    pub token: String,
    #[serde(default)]
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> Token {
        Token {
            id: 3,
            account_id: 1,
            token: "1234567890".into(),
            comment: "build agent".into(),
            last_seen: None,
        }
    }

    #[test]
    fn test_token_display_uses_own_comment() {
        assert_eq!(token().display(Some("alice")), "alice (build agent)");
        assert_eq!(token().display(None), "build agent");
    }

    #[test]
    fn test_token_value_not_serialized() {
        let json = serde_json::to_value(token()).unwrap();
        assert!(json.get("token").is_none());
        assert_eq!(json["comment"], "build agent");
        assert!(json["last_seen"].is_null());
    }
}
