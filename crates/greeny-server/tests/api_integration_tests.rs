//! Integration tests for the Greeny Credit API endpoints.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use greeny_contact::{
    ContactPipeline, EmailDocument, MailConnector, MailSession, MailSettings, TransportError,
};
use greeny_server::server::BODY_LIMIT;
use greeny_server::{create_router, AppState, RateLimiter};

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// Mail connector that accepts or refuses every send and counts deliveries.
struct MockConnector {
    refuse: bool,
    sent: Arc<AtomicUsize>,
}

#[async_trait]
impl MailConnector for MockConnector {
    async fn open(&self) -> Result<Box<dyn MailSession>, TransportError> {
        Ok(Box::new(MockSession {
            refuse: self.refuse,
            sent: Arc::clone(&self.sent),
        }))
    }
}

struct MockSession {
    refuse: bool,
    sent: Arc<AtomicUsize>,
}

#[async_trait]
impl MailSession for MockSession {
    async fn verify(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn send(&mut self, _document: &EmailDocument) -> Result<(), TransportError> {
        if self.refuse {
            return Err(TransportError::Send("550 mailbox unavailable".into()));
        }
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close(self: Box<Self>) {}
}

/// Create test state with a mock mail transport and default rate limits.
fn create_test_state(refuse_mail: bool) -> (AppState, Arc<AtomicUsize>) {
    create_test_state_with(
        refuse_mail,
        RateLimiter::new(Duration::from_secs(15 * 60), 5),
    )
}

fn create_test_state_with(
    refuse_mail: bool,
    limiter: RateLimiter,
) -> (AppState, Arc<AtomicUsize>) {
    let sent = Arc::new(AtomicUsize::new(0));
    let connector = Arc::new(MockConnector {
        refuse: refuse_mail,
        sent: Arc::clone(&sent),
    });
    let settings = MailSettings {
        sender_address: "noreply@greenycredit.in".into(),
        ..MailSettings::default()
    };

    let state = AppState::new(
        ContactPipeline::new(connector, settings),
        limiter,
        vec!["http://localhost:3001".to_string()],
    );
    (state, sent)
}

fn create_test_app() -> axum::Router {
    create_router(create_test_state(false).0)
}

fn valid_contact() -> Value {
    json!({
        "name": "Ravi Kumar",
        "email": "ravi.kumar@example.com",
        "phone": "+91 98450 12345",
        "inquiryType": "personal-loan",
        "message": "I would like to know about personal loan eligibility.",
        "consent": true
    })
}

/// POST from the peer address `client`, as the server sees it.
fn post_request(uri: &str, body: &Value, client: &str) -> Request<Body> {
    let peer: SocketAddr = format!("{client}:52000").parse().unwrap();
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .extension(ConnectInfo(peer))
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// POST from `peer` claiming to forward for `forwarded_for`.
fn forwarded_request(body: &Value, peer: &str, forwarded_for: &str) -> Request<Body> {
    let mut request = post_request("/api/contact", body, peer);
    request
        .headers_mut()
        .insert("X-Forwarded-For", forwarded_for.parse().unwrap());
    request
}

async fn read_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap_or(json!({}))
}

/// Helper to make a POST request and get JSON response.
async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(post_request(uri, &body, "198.51.100.1"))
        .await
        .unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

// =============================================================================
// HEALTH CHECK TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["status"], "OK");
    assert_eq!(json["service"], "Greeny Credit Backend API");
    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let app = create_test_app();

    for _ in 0..10 {
        let request = Request::builder()
            .uri("/api/health")
            .header("X-Forwarded-For", "203.0.113.9")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

// =============================================================================
// CONTACT FORM TESTS
// =============================================================================

#[tokio::test]
async fn test_contact_success() {
    let (state, sent) = create_test_state(false);
    let app = create_router(state);

    let (status, json) = post_json(app, "/api/contact", valid_contact()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(
        json["message"],
        "Your inquiry has been submitted successfully. We will get back to you soon!"
    );
    assert_eq!(sent.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_contact_validation_errors() {
    let (state, sent) = create_test_state(false);
    let app = create_router(state);

    let body = json!({
        "name": "A1",
        "email": "bad",
        "inquiryType": "personal-loan",
        "message": "short",
        "consent": false
    });
    let (status, json) = post_json(app, "/api/contact", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Validation failed");

    let errors = json["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "email", "message", "consent"]);
    assert!(errors.iter().all(|e| e["msg"].is_string()));
    assert_eq!(sent.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_contact_invalid_body() {
    let app = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = read_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid request body");
}

#[tokio::test]
async fn test_contact_delivery_failure_hides_detail() {
    let (state, _sent) = create_test_state(true);
    let app = create_router(state);

    let (status, json) = post_json(app, "/api/contact", valid_contact()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(
        json["message"],
        "There was an error sending your message. Please try again later or contact us directly."
    );
    assert!(!json.to_string().contains("550"));
}

// =============================================================================
// RATE LIMITING TESTS
// =============================================================================

#[tokio::test]
async fn test_sixth_contact_request_is_rate_limited() {
    let app = create_test_app();
    let body = json!({ "name": "X" });

    for _ in 0..5 {
        let response = app
            .clone()
            .oneshot(post_request("/api/contact", &body, "192.0.2.10"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app
        .clone()
        .oneshot(post_request("/api/contact", &body, "192.0.2.10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));

    let json = read_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(
        json["message"],
        "Too many requests from this IP, please try again later."
    );

    // Another client still gets through.
    let response = app
        .oneshot(post_request("/api/contact", &body, "192.0.2.11"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forwarded_for_is_ignored_without_trusted_proxy() {
    let app = create_test_app();
    let body = json!({ "name": "X" });

    let mut limited = 0;
    for i in 0..20 {
        let request = forwarded_request(&body, "192.0.2.30", &format!("10.0.0.{i}"));
        let response = app.clone().oneshot(request).await.unwrap();
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            limited += 1;
        }
    }
    assert_eq!(limited, 15);
}

#[tokio::test]
async fn test_trusted_proxy_limits_forwarded_client() {
    let limiter = RateLimiter::new(Duration::from_secs(15 * 60), 5).with_trusted_proxy(true);
    let app = create_router(create_test_state_with(false, limiter).0);
    let body = json!({ "name": "X" });

    for _ in 0..5 {
        let request = forwarded_request(&body, "192.0.2.40", "203.0.113.5");
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let request = forwarded_request(&body, "192.0.2.40", "203.0.113.5");
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Same proxy, different client behind it.
    let request = forwarded_request(&body, "192.0.2.40", "203.0.113.6");
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_calculators_are_not_rate_limited() {
    let app = create_test_app();
    let body = json!({ "principal": 100000, "annualRatePercent": 10, "tenureMonths": 12 });

    for _ in 0..8 {
        let response = app
            .clone()
            .oneshot(post_request("/api/calculators/emi", &body, "192.0.2.20"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

// =============================================================================
// CALCULATOR TESTS
// =============================================================================

#[tokio::test]
async fn test_emi_calculator() {
    let app = create_test_app();

    let (status, json) = post_json(
        app,
        "/api/calculators/emi",
        json!({ "principal": 100000, "annualRatePercent": 10, "tenureMonths": 12 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let emi = json["result"]["monthlyPayment"].as_f64().unwrap();
    assert!((emi - 8791.59).abs() < 0.01, "emi {emi}");
    let total = json["result"]["totalPayment"].as_f64().unwrap();
    assert!((total - 105_499.06).abs() < 0.05, "total {total}");
}

#[tokio::test]
async fn test_emi_calculator_rejects_bad_input() {
    let app = create_test_app();

    let (status, json) = post_json(
        app,
        "/api/calculators/emi",
        json!({ "principal": 0, "annualRatePercent": 10, "tenureMonths": 12 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("principal"));
}

#[tokio::test]
async fn test_deposit_calculator() {
    let app = create_test_app();

    let (status, json) = post_json(
        app,
        "/api/calculators/deposit",
        json!({ "type": "fd", "principal": 10000, "annualRatePercent": 6, "tenureMonths": 12 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let maturity = json["result"]["maturityValue"].as_f64().unwrap();
    assert!((maturity - 10_613.64).abs() < 0.01, "maturity {maturity}");
    assert_eq!(json["result"]["totalInvestment"], 10_000.0);
}

#[tokio::test]
async fn test_deposit_calculator_rejects_overflow() {
    let app = create_test_app();

    let (status, json) = post_json(
        app,
        "/api/calculators/deposit",
        json!({ "type": "fd", "principal": 10000, "annualRatePercent": 1000, "tenureMonths": 120000 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("tenureMonths"));
}

#[tokio::test]
async fn test_deposit_calculator_unknown_type() {
    let app = create_test_app();

    let (status, json) = post_json(
        app,
        "/api/calculators/deposit",
        json!({ "type": "ppf", "principal": 10000, "annualRatePercent": 6, "tenureMonths": 12 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid request body");
}

// =============================================================================
// FALLBACK, HEADERS AND LIMITS
// =============================================================================

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/api/unknown")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = read_json(response).await;
    assert_eq!(json, json!({ "success": false, "message": "Endpoint not found" }));
}

#[tokio::test]
async fn test_security_headers() {
    let app = create_test_app();

    for uri in ["/api/health", "/nowhere"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let headers = response.headers();

        assert_eq!(headers["x-content-type-options"], "nosniff", "{uri}");
        assert_eq!(headers["x-frame-options"], "SAMEORIGIN", "{uri}");
        assert_eq!(headers["referrer-policy"], "no-referrer", "{uri}");
        assert_eq!(headers["x-xss-protection"], "0", "{uri}");
    }
}

#[tokio::test]
async fn test_cors_allows_listed_origin_only() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "http://localhost:3001")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3001"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );

    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_test_app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/contact")
        .header(header::ORIGIN, "http://localhost:3001")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3001"
    );
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("Content-Type", "application/json")
        .header(header::CONTENT_LENGTH, (BODY_LIMIT + 1).to_string())
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_large_submission_within_body_limit() {
    let (state, sent) = create_test_state(false);
    let app = create_router(state);

    let mut body = valid_contact();
    body["attachmentNote"] = Value::String("x".repeat(3 * 1024 * 1024));

    let response = app
        .oneshot(post_request("/api/contact", &body, "198.51.100.2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(sent.load(Ordering::SeqCst), 2);
}
