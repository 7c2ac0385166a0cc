//! Configuration layer for the `postmark` command-line tool.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments or environment variables** (`POSTMARK_SERVER_TOKEN`,
//!    `POSTMARK_ACCOUNT_TOKEN`, `POSTMARK_BASE_URL`)
//! 2. **TOML config file** - `--config`, else `<config_dir>/postmark/config.toml` if present
//! 3. **Built-in defaults**
//!
//! `server_token` has no default and must come from one of the first two sources.
//!
//! `--verbose` uses OR semantics: set in either the CLI or the file, it is on.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;

pub use cli::{
    Cli, Command, EnvelopeArgs, SendArgs, SendTemplateArgs, TemplatesCommand, ValidateArgs,
};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, default_config_path, write_default_config};
