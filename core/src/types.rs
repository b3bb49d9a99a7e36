//! Configuration and parameter types for the ApiOmat client.
//!
//! # Design
//! `System` carries the wire literal used in the `X-Apiomat-System` header.
//! An unset system is modelled as `Option::None` rather than a fourth
//! variant, since the header is then omitted and the server picks LIVE.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// URL query parameters. Keys serialize in sorted order, repeated values of
/// one key in insertion order.
pub type QueryParams = BTreeMap<String, Vec<String>>;

/// Logical ApiOmat environment that should service a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum System {
    Live,
    Staging,
    Test,
}

impl System {
    pub fn as_str(&self) -> &'static str {
        match self {
            System::Live => "LIVE",
            System::Staging => "STAGING",
            System::Test => "TEST",
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `System::from_str` for anything but the three literals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ApiOmat system: {0:?}")]
pub struct ParseSystemError(pub String);

impl FromStr for System {
    type Err = ParseSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIVE" => Ok(System::Live),
            "STAGING" => Ok(System::Staging),
            "TEST" => Ok(System::Test),
            other => Err(ParseSystemError(other.to_string())),
        }
    }
}

/// Settings for a [`crate::DefaultClient`].
///
/// Empty `username` or `password` means requests are sent without an
/// `Authorization` header.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// e.g. `"https://epdemo.apiomat.enterprises/yambas/rest"`
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub system: Option<System>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("system", &self.system)
            .finish()
    }
}
