// tests/analyze_endpoint_tests.rs

mod test_utils;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use adtruth_common::models::{AnalysisRequest, Verdict};
use adtruth_core::repositories::AnalysisLogRepository;
use adtruth_core::services::{
    FactCheckConfig, GoogleFactCheckClient, LookupOutcome, NoResultReason,
};
use adtruth_core::web::{router, AppState};
use adtruth_core::{Error, HttpResponse};

use test_utils::helpers::{analysis_service, temp_repository, FakeHttpClient, FakeLookup, FakeProvider};

const REFERENCE: &str = "https://www.snopes.com/fact-check/miracle-pill/";

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_misleading_claim_with_reference() -> Result<(), Error> {
    let (_dir, repo) = temp_repository()?;
    let provider = FakeProvider::replying("Misleading");
    let lookup = FakeLookup::returning(LookupOutcome::Found(REFERENCE.to_string()));
    let app = router(AppState::new(analysis_service(provider.clone(), lookup.clone(), repo.clone())));

    let (status, body) = send(app, post_json(json!({"text": "This pill cures everything overnight!"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "success",
            "verdict": "Misleading",
            "trust_score": 30,
            "reference_url": REFERENCE
        })
    );
    assert_eq!(provider.call_count(), 1);
    assert_eq!(lookup.call_count(), 1);

    let rows = repo.list_results().await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ad_text, "This pill cures everything overnight!");
    assert_eq!(rows[0].verdict, Verdict::Misleading);
    assert_eq!(rows[0].trust_score.value(), 30);
    assert_eq!(rows[0].reference_url.as_deref(), Some(REFERENCE));
    Ok(())
}

#[tokio::test]
async fn test_blank_text_is_rejected_without_side_effects() -> Result<(), Error> {
    for payload in [json!({"text": ""}), json!({"text": "   \n\t "}), json!({})] {
        let (_dir, repo) = temp_repository()?;
        let provider = FakeProvider::replying("Safe");
        let lookup = FakeLookup::returning(LookupOutcome::NoResult(NoResultReason::NoReview));
        let app = router(AppState::new(analysis_service(provider.clone(), lookup.clone(), repo.clone())));

        let (status, body) = send(app, post_json(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"status": "error", "message": "No ad text provided"}));
        assert_eq!(provider.call_count(), 0);
        assert_eq!(lookup.call_count(), 0);
        assert!(repo.list_results().await?.is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn test_text_is_trimmed_before_use() -> Result<(), Error> {
    let (_dir, repo) = temp_repository()?;
    let provider = FakeProvider::replying("Exaggerated");
    let lookup = FakeLookup::returning(LookupOutcome::NoResult(NoResultReason::NoReview));
    let service = analysis_service(provider.clone(), lookup, repo.clone());

    let outcome = service
        .analyze(&AnalysisRequest::new("   Best burger in the universe  "))
        .await?;

    assert_eq!(outcome.verdict, Verdict::Exaggerated);
    assert_eq!(outcome.trust_score.value(), 60);
    let prompts = provider.prompts.lock().expect("prompt log").clone();
    assert!(prompts[0].contains("Ad: \"Best burger in the universe\""));
    assert_eq!(repo.list_results().await?[0].ad_text, "Best burger in the universe");
    Ok(())
}

#[tokio::test]
async fn test_classifier_failure_is_500_and_writes_nothing() -> Result<(), Error> {
    let (_dir, repo) = temp_repository()?;
    let provider = FakeProvider::failing("HTTP 429: rate limited");
    let lookup = FakeLookup::returning(LookupOutcome::Found(REFERENCE.to_string()));
    let app = router(AppState::new(analysis_service(provider, lookup.clone(), repo.clone())));

    let (status, body) = send(app, post_json(json!({"text": "Guaranteed 50% returns"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"status": "error", "message": "Cohere API error: HTTP 429: rate limited"})
    );
    assert_eq!(lookup.call_count(), 0);
    assert!(repo.list_results().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unknown_reply_still_looks_up_and_logs() -> Result<(), Error> {
    let (_dir, repo) = temp_repository()?;
    let provider = FakeProvider::replying("I am not able to judge this.");
    let lookup = FakeLookup::returning(LookupOutcome::NoResult(NoResultReason::RequestFailed(
        "timed out".to_string(),
    )));
    let app = router(AppState::new(analysis_service(provider, lookup.clone(), repo.clone())));

    let (status, body) = send(app, post_json(json!({"text": "Our widgets are blue"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verdict"], "Unknown");
    assert_eq!(body["trust_score"], 50);
    assert_eq!(body["reference_url"], "Not found");
    assert_eq!(lookup.call_count(), 1);

    let rows = repo.list_results().await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].reference_url, None);
    Ok(())
}

#[tokio::test]
async fn test_empty_reference_url_reads_as_not_found() -> Result<(), Error> {
    let (_dir, repo) = temp_repository()?;
    let lookup = FakeLookup::returning(LookupOutcome::Found(String::new()));
    let app = router(AppState::new(analysis_service(FakeProvider::replying("Safe"), lookup, repo.clone())));

    let (status, body) = send(app, post_json(json!({"text": "Free returns within 30 days"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "success",
            "verdict": "Safe",
            "trust_score": 90,
            "reference_url": "Not found"
        })
    );
    assert_eq!(repo.list_results().await?[0].reference_url, None);
    Ok(())
}

#[tokio::test]
async fn test_missing_fact_check_key_skips_network() -> Result<(), Error> {
    let (_dir, repo) = temp_repository()?;
    let http = FakeHttpClient::new(HttpResponse {
        status: 200,
        content_type: Some("application/json".to_string()),
        body: json!({"claims": [{"claimReview": [{"url": REFERENCE}]}]}).to_string(),
    });
    let lookup = Arc::new(GoogleFactCheckClient::new(http.clone(), FactCheckConfig::with_api_key(None)));
    let app = router(AppState::new(analysis_service(FakeProvider::replying("Safe"), lookup, repo)));

    let (status, body) = send(app, post_json(json!({"text": "Free returns within 30 days"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verdict"], "Safe");
    assert_eq!(body["trust_score"], 90);
    assert_eq!(body["reference_url"], "Not found");
    assert_eq!(http.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_non_json_fact_check_response_degrades_to_not_found() -> Result<(), Error> {
    let (_dir, repo) = temp_repository()?;
    let http = FakeHttpClient::new(HttpResponse {
        status: 200,
        content_type: Some("text/html; charset=utf-8".to_string()),
        body: "<html>quota page</html>".to_string(),
    });
    let lookup = Arc::new(GoogleFactCheckClient::new(
        http.clone(),
        FactCheckConfig::with_api_key(Some("key".to_string())),
    ));
    let app = router(AppState::new(analysis_service(FakeProvider::replying("Misleading"), lookup, repo.clone())));

    let (status, body) = send(app, post_json(json!({"text": "This pill cures everything overnight!"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reference_url"], "Not found");
    assert_eq!(http.call_count(), 1);
    assert_eq!(repo.list_results().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_body_is_bad_request() -> Result<(), Error> {
    let (_dir, repo) = temp_repository()?;
    let provider = FakeProvider::replying("Safe");
    let app = router(AppState::new(analysis_service(
        provider.clone(),
        FakeLookup::returning(LookupOutcome::NoResult(NoResultReason::NoReview)),
        repo,
    )));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request builds");
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(provider.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_cross_origin_requests_allowed() -> Result<(), Error> {
    let (_dir, repo) = temp_repository()?;
    let app = router(AppState::new(analysis_service(
        FakeProvider::replying("Safe"),
        FakeLookup::returning(LookupOutcome::NoResult(NoResultReason::NoReview)),
        repo,
    )));

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/analyze")
        .header(header::ORIGIN, "chrome-extension://abcdef")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .expect("request builds");
    let response = app.oneshot(preflight).await.expect("router is infallible");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    Ok(())
}
