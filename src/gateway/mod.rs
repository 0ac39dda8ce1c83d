//! Telephony provider gateway.
//!
//! This module provides:
//! - Account configuration ([`GatewayConfig`])
//! - Outbound call and message operations ([`TelephonyGateway`])
//! - Authentication and replies for the connect callback ([`WebhookReply`])
//! - Call-control documents ([`dial_forward_document`], [`hangup_document`])

mod config;
mod error;
mod telephony;
mod twiml;


pub use config::{API_VERSION, DEFAULT_API_BASE, GatewayConfig, default_api_base};
pub use error::{GatewayError, provider_detail};
pub use telephony::{
    CONNECT_PATH, NUMBER_TO_PARAM, ProviderResource, TelephonyGateway, WebhookReply,
};
pub use twiml::{TWIML_CONTENT_TYPE, dial_forward_document, hangup_document};
