use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use ism_assess::catalog::parse_catalog;
use ism_assess::errors::{AssessError, RetryConfig};
use ism_assess::evaluator::{parse_base_url, HttpEvaluator, ReportResolver};
use ism_assess::session::{AssessmentSession, SessionPhase, SessionPolicy};
use reqwest::Url;

const CATALOG: &str = r#"{
    "Access Control": [{"ControlID": "ISM-0434"}, {"ControlID": "ISM-0432"}],
    "Email": [{"ControlID": "ISM-0264"}]
}"#;

/// Serve `router` on an ephemeral local port and return its base URL.
async fn spawn_stub(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    parse_base_url(&format!("http://{}", addr)).unwrap()
}

/// Judges every requested control Effective except ISM-0434.
fn judging_stub(seen: Arc<Mutex<Vec<Value>>>) -> Router {
    Router::new().route(
        "/conduct-assessment",
        post(move |Json(body): Json<Value>| {
            let seen = seen.clone();
            async move {
                seen.lock().unwrap().push(body.clone());
                let assessments: Vec<Value> = body["items"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|id| {
                        let result = if id == "ISM-0434" { "Ineffective" } else { "Effective" };
                        json!({"ism-control": id, "result": result, "explanation": "checked"})
                    })
                    .collect();
                Json(json!({"assessments": assessments, "output_file": "ISM report.docx"}))
            }
        }),
    )
}

fn session_with(ids: &[&str], policy: SessionPolicy) -> AssessmentSession {
    let mut session = AssessmentSession::new(policy);
    for id in ids {
        session.toggle(id).unwrap();
    }
    session
}

#[tokio::test]
async fn test_select_dispatch_aggregate_over_http() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let base = spawn_stub(judging_stub(seen.clone())).await;
    let evaluator = HttpEvaluator::new(base.clone()).with_timeout(Duration::from_secs(5));
    let resolver = ReportResolver::new(base.clone());

    let catalog = parse_catalog(CATALOG).unwrap();
    let mut session = AssessmentSession::default();
    session.select_all_in_category("Access Control", &catalog).unwrap();

    let results = session.dispatch(&evaluator, &resolver).await.unwrap();
    assert_eq!(results.summary.evaluated, 2);
    assert_eq!(results.summary.passed, 1);
    assert_eq!(results.summary.failed, 1);
    assert!(!results.summary.all_passed());

    let report = results.report.clone().unwrap();
    assert_eq!(report.filename, "ISM report.docx");
    assert_eq!(
        report.url,
        format!("{}download-report?filename=ISM+report.docx", base)
    );

    assert_eq!(session.phase(), SessionPhase::Results);
    assert!(session.selection().is_empty());

    // Exactly one request, with the sorted selection
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], json!({"items": ["ISM-0432", "ISM-0434"]}));
}

#[tokio::test]
async fn test_server_error_returns_to_idle_with_selection() {
    let base = spawn_stub(Router::new().route(
        "/conduct-assessment",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model backend unavailable") }),
    ))
    .await;
    let evaluator = HttpEvaluator::new(base.clone());
    let resolver = ReportResolver::new(base);

    let mut session = session_with(&["ISM-0264"], SessionPolicy::default());
    let err = session.dispatch(&evaluator, &resolver).await.unwrap_err();
    match err {
        AssessError::Transport(msg) => assert!(msg.contains("model backend unavailable")),
        other => panic!("expected transport error, got {:?}", other),
    }

    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.selection().contains("ISM-0264"));
    assert!(session.results().is_none());
    assert!(session.last_error().is_some());
}

#[tokio::test]
async fn test_failure_can_clear_selection_by_policy() {
    let base = spawn_stub(Router::new().route(
        "/conduct-assessment",
        post(|| async { StatusCode::BAD_GATEWAY }),
    ))
    .await;
    let evaluator = HttpEvaluator::new(base.clone());
    let resolver = ReportResolver::new(base);

    let policy = SessionPolicy { clear_selection_on_failure: true };
    let mut session = session_with(&["ISM-0264", "ISM-0432"], policy);
    assert!(session.dispatch(&evaluator, &resolver).await.is_err());
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.selection().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_degraded_result() {
    let base = spawn_stub(Router::new().route(
        "/conduct-assessment",
        post(|| async { "<html>gateway page</html>" }),
    ))
    .await;
    let evaluator = HttpEvaluator::new(base.clone());
    let resolver = ReportResolver::new(base);

    let mut session = session_with(&["ISM-0264", "ISM-0432"], SessionPolicy::default());
    let results = session.dispatch(&evaluator, &resolver).await.unwrap();
    assert!(results.summary.degraded);
    assert_eq!(
        (results.summary.evaluated, results.summary.passed, results.summary.failed),
        (0, 0, 0)
    );
    assert!(results.report.is_none());
    assert_eq!(session.phase(), SessionPhase::Results);
}

#[tokio::test]
async fn test_missing_assessments_field_is_degraded_result() {
    let base = spawn_stub(Router::new().route(
        "/conduct-assessment",
        post(|| async { Json(json!({"detail": "no assessments today"})) }),
    ))
    .await;
    let evaluator = HttpEvaluator::new(base.clone());
    let resolver = ReportResolver::new(base);

    let mut session = session_with(&["ISM-0264"], SessionPolicy::default());
    let results = session.dispatch(&evaluator, &resolver).await.unwrap();
    assert!(results.summary.degraded);
    assert_eq!(results.summary.evaluated, 0);
}

#[tokio::test]
async fn test_rate_limit_is_reported() {
    let base = spawn_stub(Router::new().route(
        "/conduct-assessment",
        post(|| async { StatusCode::TOO_MANY_REQUESTS }),
    ))
    .await;
    let evaluator = HttpEvaluator::new(base.clone());
    let resolver = ReportResolver::new(base);

    let mut session = session_with(&["ISM-0264"], SessionPolicy::default());
    let err = session.dispatch(&evaluator, &resolver).await.unwrap_err();
    assert!(matches!(err, AssessError::RateLimit(_)));
    assert!(err.classify().retryable);
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let base = spawn_stub(Router::new().route(
        "/conduct-assessment",
        post(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": "warming up"})))
                } else {
                    (StatusCode::OK, Json(json!({"assessments": [{"result": "Effective"}]})))
                }
            }
        }),
    ))
    .await;
    let evaluator = HttpEvaluator::new(base.clone()).with_retry(RetryConfig { max_retries: 1 });
    let resolver = ReportResolver::new(base);

    let mut session = session_with(&["ISM-0264"], SessionPolicy::default());
    let results = session.dispatch(&evaluator, &resolver).await.unwrap();
    assert!(results.summary.all_passed());
    assert_eq!(results.summary.outcomes[0].control_id.as_deref(), Some("ISM-0264"));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_slow_evaluator_times_out() {
    let base = spawn_stub(Router::new().route(
        "/conduct-assessment",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({"assessments": []}))
        }),
    ))
    .await;
    let evaluator = HttpEvaluator::new(base.clone()).with_timeout(Duration::from_millis(200));
    let resolver = ReportResolver::new(base);

    let mut session = session_with(&["ISM-0264"], SessionPolicy::default());
    let err = session.dispatch(&evaluator, &resolver).await.unwrap_err();
    assert!(matches!(err, AssessError::Timeout(_)), "got {:?}", err);
    assert_eq!(session.phase(), SessionPhase::Idle);
}

#[tokio::test]
async fn test_bearer_token_is_forwarded() {
    let base = spawn_stub(Router::new().route(
        "/conduct-assessment",
        post(|headers: HeaderMap| async move {
            match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                Some("Bearer eval-token") => {
                    (StatusCode::OK, Json(json!({"assessments": [{"result": "Effective"}]})))
                }
                _ => (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"}))),
            }
        }),
    ))
    .await;
    let resolver = ReportResolver::new(base.clone());

    let anonymous = HttpEvaluator::new(base.clone());
    let mut session = session_with(&["ISM-0264"], SessionPolicy::default());
    let err = session.dispatch(&anonymous, &resolver).await.unwrap_err();
    assert!(matches!(err, AssessError::Authentication(_)));

    let authorized = HttpEvaluator::new(base).with_api_token(Some("eval-token".into()));
    let results = session.dispatch(&authorized, &resolver).await.unwrap();
    assert_eq!(results.summary.passed, 1);
}
