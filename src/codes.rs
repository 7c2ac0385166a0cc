//! Provider error codes and their documented meanings.
//!
//! The table is partial: the API publishes far more codes than a client
//! needs to name. Anything missing renders as [`UNKNOWN`].

/// Rendered meaning for codes absent from the table.
pub const UNKNOWN: &str = "unknown";

/// Bad or missing API token.
pub const BAD_OR_MISSING_TOKEN: i64 = 10;
/// The requested template does not exist.
pub const TEMPLATE_NOT_FOUND: i64 = 1101;
/// No template model was supplied.
pub const EMPTY_TEMPLATE_MODEL: i64 = 1109;
/// The model lacks a variable the template requires.
pub const MISSING_REQUIRED_VARIABLE: i64 = 1120;
/// The model carries a variable the template does not declare.
pub const UNKNOWN_VARIABLE: i64 = 1123;

/// Looks up the documented meaning of a provider error code.
#[must_use]
pub const fn lookup(code: i64) -> Option<&'static str> {
    let meaning = match code {
        0 => "success",
        BAD_OR_MISSING_TOKEN => "bad or missing API token",
        100 => "maintenance",
        300 => "invalid email request",
        400 => "sender signature not found",
        401 => "sender signature not confirmed",
        402 => "invalid JSON",
        403 => "incompatible JSON",
        405 => "not allowed to send",
        406 => "inactive recipient",
        407 => "bounce not found",
        408 => "bounce query exception",
        409 => "JSON required",
        410 => "too many batch messages",
        411 => "forbidden attachment type",
        412 => "account is pending",
        413 => "account may not send",
        1100 => "template query exception",
        TEMPLATE_NOT_FOUND => "template not found",
        1105 => "template limit would be exceeded",
        EMPTY_TEMPLATE_MODEL => "no template data received",
        MISSING_REQUIRED_VARIABLE => "a required template field is missing",
        1121 => "template field is too large",
        1122 => "a templated field has been submitted that is invalid",
        UNKNOWN_VARIABLE => "a field was included in the request body that is not allowed",
        _ => return None,
    };
    Some(meaning)
}

/// Returns the meaning of `code`, or [`UNKNOWN`] when the table has no entry.
#[must_use]
pub fn meaning(code: i64) -> &'static str {
    lookup(code).unwrap_or(UNKNOWN)
}
