pub mod memory;
pub mod postgres;

pub use memory::InMemoryTokenRepository;
pub use postgres::PgTokenRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Account, NewAccount, NewToken, Token};

/// Storage for accounts and their bearer tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Exact match on the token string.
    async fn find_token_by_value(&self, value: &str) -> Result<Option<Token>>;

    /// Moves `last_seen` forward to `now` in a single-row update. The stored
    /// value never decreases. Returns `None` if the token no longer exists.
    async fn touch_last_seen(
        &self,
        token_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>>;

    async fn find_account(&self, account_id: i64) -> Result<Option<Account>>;

    async fn create_account(&self, account: NewAccount) -> Result<Account>;

    /// Fails with `AppError::Conflict` if the token string is already taken.
    async fn create_token(&self, token: NewToken) -> Result<Token>;

    async fn delete_token(&self, token_id: i64) -> Result<bool>;

    /// Deletes the account and every token it owns.
    async fn delete_account(&self, account_id: i64) -> Result<bool>;

    /// `(connected, tables_exist)`
    async fn health_check(&self) -> Result<(bool, bool)>;
}
