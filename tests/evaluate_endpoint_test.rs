use axum::http::StatusCode;
use calc_rules::api::{self, AppState};
use calc_rules::config::Config;
use calc_rules::{InMemoryRuleSetResolver, RuleSetResolver};
use chrono::NaiveDate;
use std::sync::Arc;
use tower::util::ServiceExt;

const RULES_FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/short_sell_rules.json"
);

fn setup_test_app() -> axum::Router {
    let resolver = InMemoryRuleSetResolver::from_json_file(RULES_FIXTURE).expect("fixture loads");
    let resolver: Arc<dyn RuleSetResolver> = Arc::new(resolver);

    let config = Config {
        port: 0,
        rules_path: RULES_FIXTURE.to_string(),
        business_date: NaiveDate::from_ymd_opt(2024, 6, 3),
    };

    api::create_router(AppState::new(resolver, config))
}

async fn post_evaluate(
    app: axum::Router,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/v1/evaluate")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_test_app();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_ready_endpoint_reports_business_date() {
    let app = setup_test_app();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/ready")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["businessDate"], "2024-06-03");
}

#[tokio::test]
async fn test_htb_security_is_excluded_in_priority_order() {
    let (status, json) = post_evaluate(
        setup_test_app(),
        serde_json::json!({
            "ruleType": "EXCLUDE",
            "market": "US",
            "context": {
                "security": "XYZ",
                "temperature": "HTB",
                "quantity": 15000,
                "book": "PB2",
                "excluded": false
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["asOf"], "2024-06-03");
    assert_eq!(json["excluded"], true);
    assert_eq!(json["included"], false);
    assert!(json["evaluationId"].is_string());

    // Priority 5 (US haircut) runs before priority 10 (global HTB); JP and draft rules never resolve.
    let verdicts = json["verdicts"].as_array().unwrap();
    let ids: Vec<i64> = verdicts.iter().map(|v| v["ruleId"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![102, 101]);
    assert_eq!(verdicts[0]["outcome"], "MATCHED");
    assert_eq!(verdicts[0]["actionsApplied"], 2);

    let context = &json["context"];
    assert_eq!(context["quantity"], 12000);
    assert_eq!(context["locateRequired"], true);
    assert_eq!(context["excluded"], true);
    assert_eq!(context["exclusionReason"], "HTB");
}

#[tokio::test]
async fn test_expired_rule_is_not_resolved() {
    let (status, json) = post_evaluate(
        setup_test_app(),
        serde_json::json!({
            "ruleType": "EXCLUDE",
            "market": "US",
            "asOf": "2024-12-31",
            "context": { "temperature": "GC", "quantity": 15000, "book": "PB1" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let verdicts = json["verdicts"].as_array().unwrap();
    assert_eq!(verdicts.len(), 1);
    assert_eq!(verdicts[0]["ruleId"], 101);
    assert_eq!(verdicts[0]["outcome"], "NOT_MATCHED");
    assert_eq!(json["excluded"], false);
    assert_eq!(json["context"]["quantity"], 15000);
}

#[tokio::test]
async fn test_general_collateral_is_included() {
    let (status, json) = post_evaluate(
        setup_test_app(),
        serde_json::json!({
            "ruleType": "INCLUDE",
            "market": "TW",
            "context": { "temperature": "GC" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["included"], true);
    assert_eq!(json["context"]["excluded"], false);
}

#[tokio::test]
async fn test_missing_market_is_bad_request() {
    let (status, json) = post_evaluate(
        setup_test_app(),
        serde_json::json!({ "ruleType": "EXCLUDE", "market": " ", "context": {} }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("market"));
}
