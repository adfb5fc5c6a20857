use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::TokenRepository;
use crate::error::{AppError, Result};
use crate::models::{Account, NewAccount, NewToken, Token};

#[derive(Clone)]
pub struct PgTokenRepository {
    pool: PgPool,
}

impl PgTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps constraint violations on insert to client errors.
fn map_insert_error(err: sqlx::Error, what: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return AppError::Conflict(format!("{} already exists", what));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::InvalidInput(format!("{} references a missing record", what));
        }
    }
    AppError::Database(err)
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn find_token_by_value(&self, value: &str) -> Result<Option<Token>> {
        let token = sqlx::query_as::<_, Token>(
            r#"
            SELECT id, account_id, token, comment, last_seen
            FROM api_tokens
            WHERE token = $1
            "#,
        )
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }

    async fn touch_last_seen(
        &self,
        token_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>> {
        // GREATEST ignores NULL, so the first touch simply stores `now`.
        let last_seen = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            UPDATE api_tokens
            SET last_seen = GREATEST(last_seen, $2)
            WHERE id = $1
            RETURNING last_seen
            "#,
        )
        .bind(token_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(last_seen)
    }

    async fn find_account(&self, account_id: i64) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT a.id, a.user_id, u.username AS user_name, a.comment
            FROM api_accounts a
            LEFT JOIN users u ON u.id = a.user_id
            WHERE a.id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create_account(&self, account: NewAccount) -> Result<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            WITH inserted AS (
                INSERT INTO api_accounts (user_id, comment)
                VALUES ($1, $2)
                RETURNING id, user_id, comment
            )
            SELECT i.id, i.user_id, u.username AS user_name, i.comment
            FROM inserted i
            LEFT JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(account.user_id)
        .bind(&account.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "account"))
    }

    async fn create_token(&self, token: NewToken) -> Result<Token> {
        sqlx::query_as::<_, Token>(
            r#"
            INSERT INTO api_tokens (account_id, token, comment)
            VALUES ($1, $2, $3)
            RETURNING id, account_id, token, comment, last_seen
            "#,
        )
        .bind(token.account_id)
        .bind(&token.token)
        .bind(&token.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "token"))
    }

    async fn delete_token(&self, token_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM api_tokens WHERE id = $1")
            .bind(token_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_account(&self, account_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM api_accounts WHERE id = $1")
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(bool, bool)> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;

        let tables_exist: bool = sqlx::query_scalar(
            r#"
            SELECT to_regclass('api_accounts') IS NOT NULL
               AND to_regclass('api_tokens') IS NOT NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok((true, tables_exist))
    }
}
