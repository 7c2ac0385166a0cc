//! TOML configuration file parsing.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API credentials and endpoint
    #[serde(default)]
    pub api: ApiSection,

    /// Logging configuration
    #[serde(default)]
    pub log: LogSection,
}

/// API section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Server token for email and template calls
    pub server_token: Option<String>,

    /// Account token for account-scoped calls
    pub account_token: Option<String>,

    /// API host override
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Logging section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// Enable debug logging
    #[serde(default)]
    pub verbose: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# postmark configuration file
#
# Values here are overridden by command-line flags and by the
# POSTMARK_SERVER_TOKEN, POSTMARK_ACCOUNT_TOKEN and POSTMARK_BASE_URL
# environment variables.

[api]
# Server token (required for every API command)
# server_token = "00000000-0000-0000-0000-000000000000"

# Account token (only needed for account-scoped calls)
# account_token = ""

# API host (default: https://api.postmarkapp.com)
# base_url = "https://api.postmarkapp.com"

# Request timeout in seconds (default: 30)
timeout = 30

[log]
# Enable debug logging
# verbose = false
"#
    .to_string()
}
