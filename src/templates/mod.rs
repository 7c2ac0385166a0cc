//! Managing the server's template catalog.

mod api;
mod types;


pub use api::{TEMPLATES_PATH, TEMPLATES_VALIDATE_PATH, Templates, TemplatesApi};
pub use types::{
    Template, TemplateList, TemplateResponse, TemplateValidation, TemplateValidationError,
    TemplateValidationResponse,
};
