//! Outbound HTTP transport.
//!
//! This module provides types and traits for:
//! - Describing a request from the caller's side ([`RequestOptions`])
//! - Wire-level request/response values ([`HttpRequest`], [`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Timed, logged, classified execution ([`Requester`], [`ResponseEnvelope`])
//! - File payloads for multipart bodies ([`Attachment`])

mod attachment;
mod client;
mod envelope;
mod error;
mod options;
mod requester;
mod wire;

#[cfg(test)]
mod attachment_tests;
#[cfg(test)]
mod options_tests;

pub use attachment::{Attachment, FileSource, OCTET_STREAM, PDF};
pub use client::ReqwestClient;
pub use envelope::{ResponseEnvelope, Timing};
pub use error::{AttachmentError, RequestError, ResponseFailure, TransportError};
pub use options::{BasicAuth, FORM_URLENCODED, RequestOptions};
pub use requester::{PREVIEW_LIMIT, Requester, preview_body};
pub use wire::{ConnectionSettings, FormPart, HttpClient, HttpRequest, HttpResponse};
