use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::StatusReport;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub account: String,
    pub token: String,
    pub last_seen: DateTime<Utc>,
}

impl From<StatusReport> for StatusResponse {
    fn from(report: StatusReport) -> Self {
        Self {
            success: true,
            account: report.account,
            token: report.token,
            last_seen: report.last_seen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_shape() {
        let now = Utc::now();
        let response = StatusResponse::from(StatusReport {
            account: "API test user".into(),
            token: "API test user".into(),
            last_seen: now,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["account"], "API test user");
        assert!(json.get("message").is_none());
        assert_eq!(
            json["last_seen"].as_str().unwrap().parse::<DateTime<Utc>>().unwrap(),
            now
        );
    }

    #[test]
    fn test_status_query_optional_token() {
        let query: StatusQuery = serde_json::from_str("{}").unwrap();
        assert!(query.token.is_none());
    }
}
