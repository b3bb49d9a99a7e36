//! Synchronous client for the ApiOmat (Yambas) REST interface.
//!
//! # Overview
//! Builds authenticated GET requests against an ApiOmat base URL, sends them
//! over a shared `ureq` agent and hands back the raw response body. The most
//! common call is [`Client::get_version`], which returns the server's version
//! string as-is.
//!
//! # Design
//! - `DefaultClient` is immutable after construction. It holds the base URL,
//!   optional credentials, an optional target [`System`] and one agent whose
//!   connection pool is shared by all clones.
//! - `get` is split into `build_get` (produces an `http::Request`) and the
//!   round-trip itself, so request construction can be inspected without a
//!   server.
//! - HTTP error statuses are not errors here: a 500 response body is returned
//!   like any other. [`ApiError`] only covers local failures, tagged by
//!   [`ErrorKind`].
//! - Behaviour is extended through the [`Client`] trait, by wrapping a
//!   `DefaultClient` and delegating.

pub mod client;
pub mod constants;
pub mod error;
pub mod types;

pub use client::{Client, DefaultClient};
pub use constants::SDK_VERSION;
pub use error::{ApiError, ErrorKind};
pub use types::{ClientConfig, ParseSystemError, QueryParams, System};
