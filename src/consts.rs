//! Project-wide constants.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// The public yes/no oracle.
pub const DEFAULT_API_URL: &str = "https://yesno.wtf/api";

/// Request timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the API URL.
pub const ENV_API_URL: &str = "YESNO_API_URL";

/// Environment variable overriding the request timeout (seconds).
pub const ENV_TIMEOUT_SECS: &str = "YESNO_TIMEOUT_SECS";
