use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::TokenCredential;
use crate::repositories::TokenRepository;

/// Outcome of a successful status check.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub account: String,
    pub token: String,
    pub last_seen: DateTime<Utc>,
}

#[derive(Clone)]
pub struct StatusService {
    repository: Arc<dyn TokenRepository>,
}

impl StatusService {
    pub fn new(repository: Arc<dyn TokenRepository>) -> Self {
        Self { repository }
    }

    /// Validates the credential and records the visit. Nothing is written
    /// unless the token exists.
    pub async fn check(
        &self,
        credential: &TokenCredential,
        now: DateTime<Utc>,
    ) -> Result<StatusReport> {
        let value = match credential {
            TokenCredential::Present(value) => value,
            TokenCredential::Missing => {
                debug!("status request without token");
                return Err(AppError::AuthenticationFailure);
            }
            TokenCredential::Malformed => {
                warn!("status request with malformed token");
                return Err(AppError::AuthenticationFailure);
            }
        };

        let token = match self.repository.find_token_by_value(value).await? {
            Some(token) => token,
            None => {
                warn!("status request with unknown token");
                return Err(AppError::AuthenticationFailure);
            }
        };

        let account = self.repository.find_account(token.account_id).await?;
        let user_name = account.as_ref().and_then(|a| a.user_name.as_deref());
        let token_label = token.display(user_name);
        let account_label = account.as_ref().map(|a| a.display()).unwrap_or_default();

        // The row can disappear between lookup and update.
        let last_seen = self
            .repository
            .touch_last_seen(token.id, round_up_to_micros(now))
            .await?
            .ok_or_else(|| {
                warn!(token_id = token.id, "token deleted during status check");
                AppError::AuthenticationFailure
            })?;

        debug!(token_id = token.id, account_id = token.account_id, %last_seen, "status ok");

        Ok(StatusReport {
            account: account_label,
            token: token_label,
            last_seen,
        })
    }
}

/// Stored timestamps keep microseconds. Rounding up keeps the stored value at
/// or after the request time instead of truncating below it.
pub fn round_up_to_micros(at: DateTime<Utc>) -> DateTime<Utc> {
    let sub_micro = at.timestamp_subsec_nanos() % 1_000;
    if sub_micro == 0 {
        at
    } else {
        at + Duration::nanoseconds(i64::from(1_000 - sub_micro))
    }
}
