//! Application execution logic.
//!
//! Turns a parsed subcommand into one API call, runs it with Ctrl-C
//! cancellation, and prints the result as JSON.

use serde::Serialize;
use thiserror::Error;
use tokio::signal;

use postmark::config::{ConfigError, TemplatesCommand, ValidatedConfig};
use postmark::transport::ReqwestClient;
use postmark::{
    CancellationToken, Email, EmailWithTemplate, Emails, Postmark, TemplateValidation, Templates,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The API call failed.
    #[error("Request failed: {0}")]
    Request(#[from] postmark::Error),

    /// Failed to render the result.
    #[error("Failed to render output: {0}")]
    Output(#[source] serde_json::Error),
}

/// One API operation requested on the command line.
#[derive(Debug)]
pub enum Job {
    Send(Email),
    SendTemplate(EmailWithTemplate),
    ListTemplates { count: u32, offset: u32 },
    GetTemplate(i64),
    DeleteTemplate(i64),
    ValidateTemplate(TemplateValidation),
}

impl Job {
    /// Builds the job for a `templates` subcommand.
    pub fn from_templates(command: &TemplatesCommand) -> Result<Self, ConfigError> {
        Ok(match command {
            TemplatesCommand::List { count, offset } => Self::ListTemplates {
                count: *count,
                offset: *offset,
            },
            TemplatesCommand::Get { id } => Self::GetTemplate(*id),
            TemplatesCommand::Delete { id } => Self::DeleteTemplate(*id),
            TemplatesCommand::Validate(args) => Self::ValidateTemplate(args.to_validation()?),
        })
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Send(_) => "send",
            Self::SendTemplate(_) => "send-template",
            Self::ListTemplates { .. } => "templates list",
            Self::GetTemplate(_) => "templates get",
            Self::DeleteTemplate(_) => "templates delete",
            Self::ValidateTemplate(_) => "templates validate",
        }
    }
}

/// Executes one job against the configured API.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the call fails,
/// or the response cannot be rendered.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, job: Job) -> Result<(), RunError> {
    let http = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(RunError::ClientBuild)?;

    let client = Postmark::new(config.server_token, config.account_token)
        .with_base_url(config.base_url.as_str())
        .with_client(ReqwestClient::from_client(http));

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    let result = dispatch(&client.emails(), &client.templates(), &cancel, job).await;
    watcher.abort();

    print_json(&result?)
}

/// Runs `job` through the given facades and returns the response as JSON.
///
/// Generic over the facades so the same path drives the live client and
/// the in-memory fake.
pub async fn dispatch<E, T>(
    emails: &E,
    templates: &T,
    cancel: &CancellationToken,
    job: Job,
) -> Result<serde_json::Value, postmark::Error>
where
    E: Emails,
    T: Templates,
{
    tracing::debug!(job = job.name(), "Dispatching");

    match job {
        Job::Send(email) => to_json(&emails.email(cancel, &email).await?),
        Job::SendTemplate(email) => to_json(&emails.email_with_template(cancel, &email).await?),
        Job::ListTemplates { count, offset } => {
            to_json(&templates.list(cancel, count, offset).await?)
        }
        Job::GetTemplate(id) => to_json(&templates.get(cancel, id).await?),
        Job::DeleteTemplate(id) => to_json(&templates.delete(cancel, id).await?),
        Job::ValidateTemplate(validation) => {
            to_json(&templates.validate(cancel, &validation).await?)
        }
    }
}

fn to_json<S: Serialize>(value: &S) -> Result<serde_json::Value, postmark::Error> {
    Ok(serde_json::to_value(value)?)
}

fn print_json(value: &serde_json::Value) -> Result<(), RunError> {
    let rendered = serde_json::to_string_pretty(value).map_err(RunError::Output)?;
    println!("{rendered}");
    Ok(())
}

/// Cancels `cancel` on the first Ctrl-C.
async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if signal::ctrl_c().await.is_ok() {
        tracing::warn!("Interrupted, cancelling request");
        cancel.cancel();
    }
}
