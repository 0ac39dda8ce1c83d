//! Webhook request signature validation.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use super::{WebhookParams, WebhookPayload};

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the provider's request signature.
pub const SIGNATURE_HEADER: &str = "X-Twilio-Signature";

/// Stand-in for an absent signature header.
///
/// A base64 HMAC-SHA1 is always 28 characters, so this never matches.
pub const MISSING_SIGNATURE: &str = "--";

/// Query parameter holding the hex SHA-256 of a non-form body.
pub const BODY_HASH_PARAM: &str = "bodySHA256";

/// Validates inbound webhook signatures with the account's auth token.
///
/// Stateless apart from the secret; safe to share across threads.
///
/// # Example
///
/// ```
/// use phone_relay::signature::{RequestValidator, WebhookParams, WebhookPayload};
///
/// let validator = RequestValidator::new("auth-token");
/// let url = "https://example.com/twilio/connect?number_to=%2B15550002222";
/// let params = WebhookParams::new().with("CallSid", "CA1").with("From", "+15550001111");
///
/// let signature = validator.build_signature_for(url, &params);
/// assert!(validator.validate(url, &WebhookPayload::Form(params), &signature));
/// ```
#[derive(Clone)]
pub struct RequestValidator {
    secret: String,
}

impl fmt::Debug for RequestValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestValidator")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl RequestValidator {
    /// Creates a validator for the given auth token.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Returns true if `signature` authenticates the request.
    ///
    /// Never fails: malformed input of any kind is simply not authentic.
    #[must_use]
    pub fn validate(&self, url: &str, payload: &WebhookPayload, signature: &str) -> bool {
        match payload {
            WebhookPayload::Form(params) => self.validate_params(url, params, signature),
            WebhookPayload::Body(body) => self.validate_body(url, body, signature),
        }
    }

    /// Validates a form-encoded request.
    #[must_use]
    pub fn validate_params(&self, url: &str, params: &WebhookParams, signature: &str) -> bool {
        let expected = self.build_signature_for(url, params);
        secure_compare(&expected, signature)
    }

    /// Validates a request with a raw body.
    ///
    /// The signature covers the URL alone; the body is bound through the
    /// `bodySHA256` query parameter, which must match the body's digest.
    #[must_use]
    pub fn validate_body(&self, url: &str, body: &str, signature: &str) -> bool {
        let expected_signature = self.build_signature_for(url, &WebhookParams::new());
        let claimed_hash =
            body_hash_from_url(url).unwrap_or_else(|| MISSING_SIGNATURE.to_string());
        let expected_hash = build_hash_for(body);

        secure_compare(&expected_signature, signature) && secure_compare(&expected_hash, &claimed_hash)
    }

    /// Computes the base64 HMAC-SHA1 of the URL plus canonical parameters.
    #[must_use]
    pub fn build_signature_for(&self, url: &str, params: &WebhookParams) -> String {
        let mut mac = HmacSha1::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take a key of any size");
        mac.update(url.as_bytes());
        mac.update(params.canonical_string().as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}

/// Hex-encoded SHA-256 of a request body.
#[must_use]
pub fn build_hash_for(body: &str) -> String {
    hex::encode(Sha256::digest(body.as_bytes()))
}

/// Compares two strings in time independent of their contents.
///
/// Only the lengths leak: unequal lengths return immediately.
#[must_use]
pub fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut acc = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        acc |= x ^ y;
    }
    acc == 0
}

/// Reads the signature header; header names are case-insensitive.
#[must_use]
pub fn signature_from_headers(headers: &http::HeaderMap) -> Option<&str> {
    headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
}

/// One-shot validation with an explicit secret.
///
/// Equivalent to `RequestValidator::new(secret).validate(url, payload, signature)`.
#[must_use]
pub fn validate(url: &str, payload: &WebhookPayload, signature: &str, secret: &str) -> bool {
    RequestValidator::new(secret).validate(url, payload, signature)
}

fn body_hash_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == BODY_HASH_PARAM)
        .map(|(_, value)| value.into_owned())
}
