//! phone-relay: Twilio call forwarding and SMS verification
//!
//! A library for placing forwarded calls and sending verification codes
//! through the Twilio REST API, and for authenticating the webhook
//! callbacks Twilio sends back.

pub mod config;
pub mod gateway;
pub mod signature;
pub mod time;
pub mod transport;
pub mod verification;
