//! Default values for configuration options.

use std::time::Duration;

/// Default API host.
pub const BASE_URL: &str = crate::client::DEFAULT_BASE_URL;

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Directory under the platform config dir holding the config file.
pub const CONFIG_DIR: &str = "postmark";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Output path of `postmark init`.
pub const INIT_OUTPUT: &str = "postmark.toml";

/// Page size of `postmark templates list`.
pub const LIST_COUNT: u32 = 100;

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
