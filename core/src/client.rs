//! Blocking ApiOmat client built on a shared `ureq` agent.
//!
//! # Design
//! `DefaultClient` holds only immutable configuration and an agent, so it can
//! be cloned and used from many threads at once. Each `get` is one
//! independent request/response cycle: `build_get` produces the
//! `http::Request`, the agent sends it, and the whole body is read back as
//! text whatever the status code.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ureq::http::{header, Request, Uri};
use ureq::Agent;
use url::Url;

use crate::constants::{ACCEPT_JSON, SDK_VERSION, SDK_VERSION_HEADER, SYSTEM_HEADER};
use crate::error::ApiError;
use crate::types::{ClientConfig, QueryParams, System};

/// Operations every ApiOmat client offers.
///
/// Implement `get` to wrap or replace [`DefaultClient`]; `get_version`
/// follows from it.
pub trait Client {
    /// Send a GET to `base_url + path` and return the raw body. `path` may
    /// be empty, `params` may be `None`.
    fn get(&self, path: &str, params: Option<&QueryParams>) -> Result<String, ApiError>;

    /// Version of the ApiOmat instance, for example
    /// `"Yambas REST interface v2.6.2-107E on null:80"`.
    fn get_version(&self) -> Result<String, ApiError> {
        self.get("", None)
    }
}

/// Client for one ApiOmat base URL.
#[derive(Clone)]
pub struct DefaultClient {
    base_url: String,
    username: String,
    password: String,
    system: Option<System>,
    agent: Agent,
}

impl DefaultClient {
    /// `base_url` looks like `"https://epdemo.apiomat.enterprises/yambas/rest"`;
    /// trailing slashes are removed. If `username` or `password` is empty no
    /// `Authorization` header is sent. Without a `system` the server uses LIVE.
    pub fn new(base_url: &str, username: &str, password: &str, system: Option<System>) -> Self {
        Self::with_config(ClientConfig {
            base_url: base_url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            system,
        })
    }

    /// Same as [`DefaultClient::new`], taking the settings as one struct.
    pub fn with_config(config: ClientConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username,
            password: config.password,
            system: config.system,
            agent,
        }
    }

    /// Base URL with trailing slashes removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Target system, `None` when the server default applies.
    pub fn system(&self) -> Option<System> {
        self.system
    }

    /// True only when both username and password are set.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Build the GET request `get` would send, without sending it.
    ///
    /// The joined URL is normalized while parsing: `.` and `..` segments are
    /// resolved, so `"../x"` leaves the base path.
    pub fn build_get(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<Request<()>, ApiError> {
        let url = self.request_url(path, params)?;

        let mut builder = Request::get(url.as_str())
            .header(header::ACCEPT, ACCEPT_JSON)
            .header(SDK_VERSION_HEADER, SDK_VERSION);
        if let Some(system) = self.system {
            builder = builder.header(SYSTEM_HEADER, system.as_str());
        }
        if let Some(credentials) = self.basic_auth() {
            builder = builder.header(header::AUTHORIZATION, credentials);
        }

        builder.body(()).map_err(ApiError::RequestConstruction)
    }

    /// Join base URL and path and replace any query with `params`.
    fn request_url(&self, path: &str, params: Option<&QueryParams>) -> Result<Url, ApiError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url =
            Url::parse(&raw).map_err(|source| ApiError::UrlConstruction { url: raw, source })?;

        url.set_query(None);
        url.set_fragment(None);
        if let Some(params) = params.filter(|p| p.values().any(|values| !values.is_empty())) {
            let mut pairs = url.query_pairs_mut();
            for (key, values) in params {
                for value in values {
                    pairs.append_pair(key, value);
                }
            }
        }

        Ok(url)
    }

    fn basic_auth(&self) -> Option<String> {
        if !self.has_credentials() {
            return None;
        }
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        Some(format!("Basic {token}"))
    }
}

impl Client for DefaultClient {
    fn get(&self, path: &str, params: Option<&QueryParams>) -> Result<String, ApiError> {
        let request = self.build_get(path, params)?;
        let method = request.method().clone();
        let url = redacted_url(request.uri());

        tracing::debug!(
            %method,
            %url,
            system = ?self.system,
            auth = self.has_credentials(),
            "sending ApiOmat request"
        );

        let mut response = self
            .agent
            .run(request)
            .map_err(|source| ApiError::Transport {
                method,
                url: url.clone(),
                source,
            })?;

        tracing::debug!(status = response.status().as_u16(), %url, "received ApiOmat response");

        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(ApiError::BodyRead)?;

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// URL text for logs and errors, without any password embedded in it.
fn redacted_url(uri: &Uri) -> String {
    match Url::parse(&uri.to_string()) {
        Ok(mut url) => {
            // Fails only for URLs that cannot carry credentials.
            let _ = url.set_password(None);
            url.to_string()
        }
        Err(_) => uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default(),
    }
}

impl fmt::Debug for DefaultClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("system", &self.system)
            .finish_non_exhaustive()
    }
}
