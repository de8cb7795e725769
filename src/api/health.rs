use crate::api::AppState;
use axum::extract::State;
use axum::Json;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Readiness plus the business date requests default to.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ready",
        "businessDate": state.config.default_as_of().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::resolver::InMemoryRuleSetResolver;
    use chrono::NaiveDate;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_ready_reports_business_date() {
        let config = Config {
            port: 0,
            rules_path: String::new(),
            business_date: NaiveDate::from_ymd_opt(2024, 6, 3),
        };
        let state = AppState::new(Arc::new(InMemoryRuleSetResolver::default()), config);

        let Json(body) = ready(State(state)).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["businessDate"], "2024-06-03");
    }
}
