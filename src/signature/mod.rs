//! Authentication of inbound provider webhooks.
//!
//! The provider signs each callback with HMAC-SHA1 keyed by the account's
//! auth token, over the full request URL followed by the sorted, concatenated
//! POST parameters, and sends the base64 digest in [`SIGNATURE_HEADER`].
//! Requests with a non-form body are signed over the URL alone and carry a
//! SHA-256 of the body in the [`BODY_HASH_PARAM`] query parameter.
//!
//! The web layer builds a [`WebhookPayload`] once when it parses the
//! request and hands it to [`RequestValidator::validate`].

mod params;
mod validator;

#[cfg(test)]
mod validator_tests;

pub use params::{WebhookParams, WebhookPayload, is_public_key};
pub use validator::{
    BODY_HASH_PARAM, MISSING_SIGNATURE, RequestValidator, SIGNATURE_HEADER, build_hash_for,
    secure_compare, signature_from_headers, validate,
};
