//! In-process stand-in for the parts of an ApiOmat server the client talks to.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const BASE_PATH: &str = "/yambas/rest";
pub const VERSION: &str = "Yambas REST interface v2.6.2-107E on null:80";
pub const DEMO_USERNAME: &str = "apinaut";
pub const DEMO_PASSWORD: &str = "secret";

/// What the echo endpoint saw of a request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EchoedRequest {
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModuleList {
    pub system: String,
    pub modules: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: DEMO_USERNAME.to_string(),
            password: DEMO_PASSWORD.to_string(),
        }
    }
}

pub fn app() -> Router {
    app_with_credentials(Credentials::default())
}

pub fn app_with_credentials(credentials: Credentials) -> Router {
    Router::new()
        .route(&format!("{BASE_PATH}/"), get(version))
        .route(&format!("{BASE_PATH}/echo"), get(echo))
        .route(&format!("{BASE_PATH}/echo/{{*rest}}"), get(echo))
        .route(&format!("{BASE_PATH}/modules"), get(modules))
        .route(&format!("{BASE_PATH}/error"), get(server_error))
        .with_state(Arc::new(credentials))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn version() -> &'static str {
    VERSION
}

async fn echo(uri: Uri, headers: HeaderMap) -> Json<EchoedRequest> {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().to_string(), value.to_string()))
        })
        .collect();
    Json(EchoedRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
    })
}

async fn modules(
    State(credentials): State<Arc<Credentials>>,
    headers: HeaderMap,
) -> Result<Json<ModuleList>, (StatusCode, Json<ErrorBody>)> {
    if !is_authorized(&headers, &credentials) {
        return Err(error_body(StatusCode::UNAUTHORIZED, "Unauthorized request"));
    }
    let system = headers
        .get("x-apiomat-system")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("LIVE")
        .to_string();
    Ok(Json(ModuleList {
        system,
        modules: vec!["Basics".to_string(), "Push".to_string()],
    }))
}

async fn server_error() -> (StatusCode, Json<ErrorBody>) {
    error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

fn is_authorized(headers: &HeaderMap, credentials: &Credentials) -> bool {
    let Some(encoded) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
    else {
        return false;
    };
    let Ok(decoded) = STANDARD.decode(encoded) else {
        return false;
    };
    let expected = format!("{}:{}", credentials.username, credentials.password);
    decoded == expected.as_bytes()
}

fn error_body(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            status: status.as_u16(),
            message: message.to_string(),
        }),
    )
}
