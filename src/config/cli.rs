//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands,
//! plus the conversions from subcommand arguments to request payloads.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::ConfigError;
use super::defaults;
use crate::emails::{Email, EmailWithTemplate, Envelope, Header, TemplateModel};
use crate::templates::TemplateValidation;

/// postmark: send email and manage templates through the Postmark API
#[derive(Debug, Parser)]
#[command(name = "postmark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Server token
    #[arg(long, env = "POSTMARK_SERVER_TOKEN", hide_env_values = true, global = true)]
    pub server_token: Option<String>,

    /// Account token
    #[arg(long, env = "POSTMARK_ACCOUNT_TOKEN", hide_env_values = true, global = true)]
    pub account_token: Option<String>,

    /// API host
    #[arg(long, env = "POSTMARK_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for postmark
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::INIT_OUTPUT)]
        output: PathBuf,
    },

    /// Send an email with inline content
    Send(SendArgs),

    /// Send an email rendered from a stored template
    SendTemplate(SendTemplateArgs),

    /// Manage stored templates
    #[command(subcommand)]
    Templates(TemplatesCommand),
}

/// Template subcommands.
#[derive(Debug, Subcommand)]
pub enum TemplatesCommand {
    /// List templates
    List {
        /// Maximum number of templates to return
        #[arg(long, default_value_t = defaults::LIST_COUNT)]
        count: u32,

        /// Number of templates to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Show one template
    Get {
        /// Template identifier
        id: i64,
    },

    /// Delete a template
    Delete {
        /// Template identifier
        id: i64,
    },

    /// Validate template content without storing it
    Validate(ValidateArgs),
}

/// Addressing flags shared by both send commands.
#[derive(Debug, Args)]
pub struct EnvelopeArgs {
    /// Sender address
    #[arg(long)]
    pub from: String,

    /// Recipient addresses, comma separated
    #[arg(long)]
    pub to: String,

    /// Carbon-copy recipients
    #[arg(long)]
    pub cc: Option<String>,

    /// Blind carbon-copy recipients
    #[arg(long)]
    pub bcc: Option<String>,

    /// Tag for statistics
    #[arg(long)]
    pub tag: Option<String>,

    /// Reply-To address
    #[arg(long = "reply-to")]
    pub reply_to: Option<String>,

    /// Custom header in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V")]
    pub headers: Vec<String>,

    /// Track opens
    #[arg(long = "track-opens")]
    pub track_opens: bool,
}

/// Arguments of `postmark send`.
#[derive(Debug, Args)]
pub struct SendArgs {
    #[command(flatten)]
    pub envelope: EnvelopeArgs,

    /// Subject line
    #[arg(long)]
    pub subject: String,

    /// HTML body
    #[arg(long = "html-body")]
    pub html_body: Option<String>,

    /// Plain text body
    #[arg(long = "text-body")]
    pub text_body: Option<String>,
}

/// Arguments of `postmark send-template`.
#[derive(Debug, Args)]
pub struct SendTemplateArgs {
    #[command(flatten)]
    pub envelope: EnvelopeArgs,

    /// Template identifier
    #[arg(long = "template-id")]
    pub template_id: i64,

    /// Template model as a JSON object
    #[arg(long, default_value = "{}")]
    pub model: String,

    /// Inline CSS in the rendered HTML
    #[arg(long = "inline-css")]
    pub inline_css: bool,
}

/// Arguments of `postmark templates validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Subject template
    #[arg(long, default_value = "")]
    pub subject: String,

    /// HTML body template
    #[arg(long = "html-body", default_value = "")]
    pub html_body: String,

    /// Text body template
    #[arg(long = "text-body", default_value = "")]
    pub text_body: String,

    /// Test render model as a JSON object
    #[arg(long, default_value = "{}")]
    pub model: String,

    /// Inline CSS in the HTML test render
    #[arg(long = "inline-css")]
    pub inline_css: bool,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}

impl EnvelopeArgs {
    fn to_envelope(&self) -> Result<Envelope, ConfigError> {
        let headers = self
            .headers
            .iter()
            .map(|raw| parse_header_string(raw).map(|(name, value)| Header::new(name, value)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Envelope {
            from: self.from.clone(),
            to: self.to.clone(),
            cc: self.cc.clone().unwrap_or_default(),
            bcc: self.bcc.clone().unwrap_or_default(),
            tag: self.tag.clone().unwrap_or_default(),
            reply_to: self.reply_to.clone().unwrap_or_default(),
            headers,
            track_opens: self.track_opens,
            attachments: Vec::new(),
        })
    }
}

impl SendArgs {
    /// Builds the email to send.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] for a malformed `--header`.
    pub fn to_email(&self) -> Result<Email, ConfigError> {
        Ok(Email {
            envelope: self.envelope.to_envelope()?,
            subject: self.subject.clone(),
            html_body: self.html_body.clone().unwrap_or_default(),
            text_body: self.text_body.clone().unwrap_or_default(),
        })
    }
}

impl SendTemplateArgs {
    /// Builds the templated email to send.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] for a malformed `--header`, or
    /// [`ConfigError::InvalidModel`] when `--model` is not a JSON object.
    pub fn to_email(&self) -> Result<EmailWithTemplate, ConfigError> {
        Ok(EmailWithTemplate {
            envelope: self.envelope.to_envelope()?,
            template_id: self.template_id.to_string(),
            template_model: parse_model(&self.model)?,
            inline_css: self.inline_css,
        })
    }
}

impl ValidateArgs {
    /// Builds the validation request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidModel`] when `--model` is not a JSON object.
    pub fn to_validation(&self) -> Result<TemplateValidation, ConfigError> {
        Ok(TemplateValidation {
            subject: self.subject.clone(),
            html_body: self.html_body.clone(),
            text_body: self.text_body.clone(),
            test_render_model: parse_model(&self.model)?,
            inline_css_for_html_test_render: self.inline_css,
        })
    }
}

fn parse_model(raw: &str) -> Result<TemplateModel, ConfigError> {
    serde_json::from_str(raw).map_err(|e| ConfigError::InvalidModel {
        reason: e.to_string(),
    })
}

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // The first separator splits, so values may contain either character.
    let Some(at) = s.find(['=', ':']) else {
        return Err(ConfigError::InvalidHeader {
            value: s.to_string(),
        });
    };

    let (name, value) = s.split_at(at);
    Ok((name.trim().to_string(), value[1..].trim().to_string()))
}
