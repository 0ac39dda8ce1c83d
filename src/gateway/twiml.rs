//! Call-control documents returned to provider callbacks.

use quick_xml::escape::escape;

/// Content type of call-control documents.
pub const TWIML_CONTENT_TYPE: &str = "text/xml";

/// Document that bridges the answered call to `number`.
///
/// ```
/// use phone_relay::gateway::dial_forward_document;
///
/// assert_eq!(
///     dial_forward_document("+15550002222"),
///     "<Response><Dial>+15550002222</Dial></Response>"
/// );
/// ```
#[must_use]
pub fn dial_forward_document(number: &str) -> String {
    format!("<Response><Dial>{}</Dial></Response>", escape(number))
}

/// Document that ends the call.
#[must_use]
pub const fn hangup_document() -> &'static str {
    "<Response><Hangup/></Response>"
}
