use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::display::display_name;

/// Owner of zero or more tokens. `user_name` is resolved from the linked
/// user identity, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub comment: String,
}

impl Account {
    pub fn display(&self) -> String {
        display_name(self.user_name.as_deref(), &self.comment)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAccount {
    pub user_id: Option<i64>,
    pub comment: String,
}
