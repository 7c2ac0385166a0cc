//! Wire shapes for the template endpoints.

use serde::{Deserialize, Serialize};

use crate::emails::TemplateModel;

/// A stored template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Template {
    pub template_id: i64,
    /// Display name.
    pub name: String,
    /// Subject line template.
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub associated_server_id: i64,
    pub active: bool,
}

/// Result of creating, editing or deleting a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateResponse {
    pub template_id: i64,
    pub name: String,
    pub active: bool,
    pub error_code: i64,
    pub message: String,
}

/// One page of templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateList {
    pub template_count: i64,
    pub templates: Vec<Template>,
}

/// Candidate template content submitted for server-side validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateValidation {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    /// Model used to render the test output.
    pub test_render_model: TemplateModel,
    /// Inline CSS when rendering the HTML test output.
    pub inline_css_for_html_test_render: bool,
}

/// Outcome of a validation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateValidationResponse {
    pub all_content_is_valid: bool,
    pub content_is_valid: bool,
    pub validation_errors: Vec<TemplateValidationError>,
    pub rendered_content: String,
    /// Model the server inferred from the template's variables.
    pub suggested_template_model: TemplateModel,
}

/// A single problem found during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateValidationError {
    pub message: String,
    pub line: i64,
    pub character_position: i64,
}
