//! Protocol constants sent with every ApiOmat request.

/// ApiOmat version this client targets. Servers may run backward
/// compatibility code depending on it.
pub const SDK_VERSION: &str = "2.6.0";

pub const SDK_VERSION_HEADER: &str = "X-Apiomat-SdkVersion";

/// Omitted when no system is configured; the server then uses LIVE.
pub const SYSTEM_HEADER: &str = "X-Apiomat-System";

pub const ACCEPT_JSON: &str = "application/json";
