//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration used by the
//! binary. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
pub struct ValidatedConfig {
    /// Server token (required)
    pub server_token: String,

    /// Account token; empty when not configured
    pub account_token: String,

    /// API host
    pub base_url: Url,

    /// Per-request timeout
    pub timeout: Duration,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("server_token", &"<redacted>")
            .field("account_token", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ base_url: {}, timeout: {}s, account_token: {} }}",
            self.base_url,
            self.timeout.as_secs(),
            if self.account_token.is_empty() {
                "unset"
            } else {
                "set"
            },
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and their environment variables) take precedence over TOML values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `server_token` is missing or blank
    /// - `base_url` is not an absolute http(s) URL
    /// - `timeout` is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let server_token = Self::resolve_server_token(cli, toml)?;

        let account_token = cli
            .account_token
            .clone()
            .or_else(|| toml.and_then(|t| t.api.account_token.clone()))
            .unwrap_or_default();

        let base_url = Self::resolve_base_url(cli, toml)?;

        let timeout = Self::resolve_timeout(cli, toml)?;

        let verbose = cli.verbose || toml.is_some_and(|t| t.log.verbose);

        Ok(Self {
            server_token,
            account_token,
            base_url,
            timeout,
            verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// Reads `cli.config` if set, otherwise the file at [`default_config_path`]
    /// when one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| default_config_path().filter(|p| p.is_file()));

        let toml = match path {
            Some(ref path) => Some(TomlConfig::load(path)?),
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_server_token(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        cli.server_token
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.server_token.as_deref()))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ConfigError::missing(
                    field::SERVER_TOKEN,
                    "Use --server-token, set POSTMARK_SERVER_TOKEN, or set api.server_token in config file",
                )
            })
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.base_url.as_deref()))
            .unwrap_or(defaults::BASE_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.api.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Location of the per-user config file, if the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(defaults::CONFIG_DIR).join(defaults::CONFIG_FILE))
}

/// Writes a default configuration file to the given path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
