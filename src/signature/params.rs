//! Canonical webhook parameter types.

/// Parameters of an inbound webhook request, in arrival order.
///
/// Repeated keys are kept; signing sorts pairs by key and then value, so
/// arrival order never affects the signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookParams {
    pairs: Vec<(String, String)>,
}

impl WebhookParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Builds a parameter set from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parses an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn parse_form(body: &str) -> Self {
        Self::from_pairs(url::form_urlencoded::parse(body.as_bytes()))
    }

    /// Appends a pair.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Appends a pair, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over pairs in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sorted `key + value` concatenation of the public pairs.
    #[must_use]
    pub fn canonical_string(&self) -> String {
        let mut pairs: Vec<&(String, String)> =
            self.pairs.iter().filter(|(k, _)| is_public_key(k)).collect();
        pairs.sort();

        let mut out = String::new();
        for (key, value) in pairs {
            out.push_str(key);
            out.push_str(value);
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for WebhookParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

/// Returns true if `key` is a provider parameter (differs from its lower-case form).
#[must_use]
pub fn is_public_key(key: &str) -> bool {
    key.to_lowercase() != key
}

/// Body of an inbound webhook as handed over by the web layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookPayload {
    /// Form-encoded parameters
    Form(WebhookParams),
    /// Raw body (JSON or other text); authenticated with the `bodySHA256`
    /// query parameter
    Body(String),
}

impl WebhookPayload {
    /// Classifies a raw body by its content type.
    ///
    /// `application/x-www-form-urlencoded` (with or without parameters) is
    /// parsed into [`WebhookPayload::Form`]; anything else stays raw.
    #[must_use]
    pub fn from_body(content_type: Option<&str>, body: &str) -> Self {
        let is_form = content_type
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|mime| {
                mime.trim()
                    .eq_ignore_ascii_case(crate::transport::FORM_URLENCODED)
            });

        if is_form {
            Self::Form(WebhookParams::parse_form(body))
        } else {
            Self::Body(body.to_string())
        }
    }
}

impl From<WebhookParams> for WebhookPayload {
    fn from(params: WebhookParams) -> Self {
        Self::Form(params)
    }
}
