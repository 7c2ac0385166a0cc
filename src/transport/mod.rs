//! HTTP seam between the API engine and the network.
//!
//! This module provides:
//! - Buffered request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The pluggable client abstraction ([`HttpClient`])
//! - The production client over reqwest ([`ReqwestClient`])

mod client;
mod error;
mod http;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
