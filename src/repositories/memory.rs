use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::TokenRepository;
use crate::error::{AppError, Result};
use crate::models::{Account, NewAccount, NewToken, Token};

#[derive(Debug, Clone)]
struct AccountRow {
    user_id: Option<i64>,
    comment: String,
}

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i64, String>,
    accounts: BTreeMap<i64, AccountRow>,
    tokens: BTreeMap<i64, Token>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn account(&self, id: i64) -> Option<Account> {
        self.accounts.get(&id).map(|row| Account {
            id,
            user_id: row.user_id,
            user_name: row.user_id.and_then(|uid| self.users.get(&uid).cloned()),
            comment: row.comment.clone(),
        })
    }
}

/// Process-local token store with the same semantics as the PostgreSQL one.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user identity accounts can link to.
    pub async fn add_user(&self, username: impl Into<String>) -> i64 {
        let mut store = self.store.write().await;
        let id = store.next_id();
        store.users.insert(id, username.into());
        id
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_token_by_value(&self, value: &str) -> Result<Option<Token>> {
        let store = self.store.read().await;
        Ok(store.tokens.values().find(|t| t.token == value).cloned())
    }

    async fn touch_last_seen(
        &self,
        token_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>> {
        let mut store = self.store.write().await;
        Ok(store.tokens.get_mut(&token_id).map(|token| {
            let last_seen = token.last_seen.map_or(now, |prev| prev.max(now));
            token.last_seen = Some(last_seen);
            last_seen
        }))
    }

    async fn find_account(&self, account_id: i64) -> Result<Option<Account>> {
        Ok(self.store.read().await.account(account_id))
    }

    async fn create_account(&self, account: NewAccount) -> Result<Account> {
        let mut store = self.store.write().await;
        if let Some(uid) = account.user_id {
            if !store.users.contains_key(&uid) {
                return Err(AppError::InvalidInput(
                    "account references a missing record".to_string(),
                ));
            }
        }

        let id = store.next_id();
        store.accounts.insert(
            id,
            AccountRow {
                user_id: account.user_id,
                comment: account.comment,
            },
        );
        store
            .account(id)
            .ok_or_else(|| AppError::Internal(format!("account {} vanished after insert", id)))
    }

    async fn create_token(&self, token: NewToken) -> Result<Token> {
        let mut store = self.store.write().await;
        if !store.accounts.contains_key(&token.account_id) {
            return Err(AppError::InvalidInput(
                "token references a missing record".to_string(),
            ));
        }
        if store.tokens.values().any(|t| t.token == token.token) {
            return Err(AppError::Conflict("token already exists".to_string()));
        }

        let id = store.next_id();
        let created = Token {
            id,
            account_id: token.account_id,
            token: token.token,
            comment: token.comment,
            last_seen: None,
        };
        store.tokens.insert(id, created.clone());
        Ok(created)
    }

    async fn delete_token(&self, token_id: i64) -> Result<bool> {
        Ok(self.store.write().await.tokens.remove(&token_id).is_some())
    }

    async fn delete_account(&self, account_id: i64) -> Result<bool> {
        let mut store = self.store.write().await;
        store.tokens.retain(|_, t| t.account_id != account_id);
        Ok(store.accounts.remove(&account_id).is_some())
    }

    async fn health_check(&self) -> Result<(bool, bool)> {
        Ok((true, true))
    }
}
