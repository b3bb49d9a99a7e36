use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{
    app, app_with_credentials, Credentials, EchoedRequest, ErrorBody, ModuleList, DEMO_PASSWORD,
    DEMO_USERNAME, VERSION,
};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn basic(user: &str, pass: &str) -> String {
    use base64::Engine as _;
    let token = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{pass}"));
    format!("Basic {token}")
}

// --- version ---

#[tokio::test]
async fn version_returns_plain_text() {
    let resp = app().oneshot(get_request("/yambas/rest/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"), "{content_type}");
    assert_eq!(body_bytes(resp).await, VERSION.as_bytes());
}

#[tokio::test]
async fn version_requires_trailing_slash() {
    let resp = app().oneshot(get_request("/yambas/rest")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- echo ---

#[tokio::test]
async fn echo_reports_path_query_and_headers() {
    let req = Request::builder()
        .uri("/yambas/rest/echo/apps/demo?tag=a&tag=b")
        .header("X-Apiomat-System", "STAGING")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: EchoedRequest = body_json(resp).await;
    assert_eq!(echoed.path, "/yambas/rest/echo/apps/demo");
    assert_eq!(echoed.query.as_deref(), Some("tag=a&tag=b"));
    assert_eq!(echoed.headers["x-apiomat-system"], "STAGING");
}

#[tokio::test]
async fn echo_without_query() {
    let resp = app().oneshot(get_request("/yambas/rest/echo")).await.unwrap();

    let echoed: EchoedRequest = body_json(resp).await;
    assert_eq!(echoed.path, "/yambas/rest/echo");
    assert!(echoed.query.is_none());
}

// --- modules ---

#[tokio::test]
async fn modules_without_auth_returns_401_body() {
    let resp = app().oneshot(get_request("/yambas/rest/modules")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.status, 401);
}

#[tokio::test]
async fn modules_defaults_to_live_system() {
    let req = Request::builder()
        .uri("/yambas/rest/modules")
        .header(http::header::AUTHORIZATION, basic(DEMO_USERNAME, DEMO_PASSWORD))
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: ModuleList = body_json(resp).await;
    assert_eq!(list.system, "LIVE");
    assert!(!list.modules.is_empty());
}

#[tokio::test]
async fn modules_reports_requested_system() {
    let req = Request::builder()
        .uri("/yambas/rest/modules")
        .header(http::header::AUTHORIZATION, basic(DEMO_USERNAME, DEMO_PASSWORD))
        .header("X-Apiomat-System", "TEST")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    let list: ModuleList = body_json(resp).await;
    assert_eq!(list.system, "TEST");
}

#[tokio::test]
async fn modules_uses_configured_credentials() {
    let app = app_with_credentials(Credentials {
        username: "other".to_string(),
        password: "pw".to_string(),
    });
    let req = Request::builder()
        .uri("/yambas/rest/modules")
        .header(http::header::AUTHORIZATION, basic(DEMO_USERNAME, DEMO_PASSWORD))
        .body(String::new())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- error ---

#[tokio::test]
async fn error_endpoint_returns_500_with_body() {
    let resp = app().oneshot(get_request("/yambas/rest/error")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.status, 500);
    assert_eq!(body.message, "Internal server error");
}
