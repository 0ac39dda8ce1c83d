//! Tests for `RequestValidator`.
//!
//! Expected digests were computed independently with HMAC-SHA1/SHA-256
//! reference implementations.

use super::{
    MISSING_SIGNATURE, RequestValidator, SIGNATURE_HEADER, WebhookParams, WebhookPayload,
    build_hash_for, secure_compare, signature_from_headers, validate,
};

const TOKEN: &str = "12345";
const FORM_URL: &str = "https://mycompany.com/myapp.php?foo=1&bar=2";
const FORM_SIGNATURE: &str = "0/KCTR6DLpKmkAf8muzZqo1nDgQ=";

const BODY: &str = r#"{"property": "value", "boolean": true}"#;
const BODY_HASH: &str = "0a1ff7634d9ab3b95db5c9a2dfe9416e41502b283a80c7cf19632632f96e6620";
const BODY_URL: &str = "https://mycompany.com/myapp.php?bodySHA256=0a1ff7634d9ab3b95db5c9a2dfe9416e41502b283a80c7cf19632632f96e6620";
const BODY_SIGNATURE: &str = "y77kIzt2vzLz71DgmJGsen2scGs=";

fn call_params() -> WebhookParams {
    WebhookParams::new()
        .with("CallSid", "CA1234567890ABCDE")
        .with("Caller", "+12349013030")
        .with("Digits", "1234")
        .with("From", "+12349013030")
        .with("To", "+18005551212")
}

fn validator() -> RequestValidator {
    RequestValidator::new(TOKEN)
}

mod form_requests {
    use super::*;

    #[test]
    fn known_signature_matches() {
        assert_eq!(
            validator().build_signature_for(FORM_URL, &call_params()),
            FORM_SIGNATURE
        );
        assert!(validator().validate_params(FORM_URL, &call_params(), FORM_SIGNATURE));
    }

    #[test]
    fn parameter_order_does_not_matter() {
        let reversed: WebhookParams = call_params().iter().collect::<Vec<_>>().into_iter().rev().collect();

        assert!(validator().validate_params(FORM_URL, &reversed, FORM_SIGNATURE));
    }

    #[test]
    fn internal_parameters_are_ignored() {
        let params = call_params().with("number_to", "+15550002222");

        assert!(validator().validate_params(FORM_URL, &params, FORM_SIGNATURE));
    }

    #[test]
    fn round_trip_holds_for_arbitrary_input() {
        let cases = [
            ("https://a.example/x", WebhookParams::new()),
            ("https://a.example/x?q=1", WebhookParams::new().with("Body", "héllo wörld")),
            ("http://localhost:3000/cb", WebhookParams::new().with("A", "").with("B", "&=?")),
        ];

        for (url, params) in cases {
            let signature = validator().build_signature_for(url, &params);
            assert!(
                validator().validate(url, &WebhookPayload::Form(params.clone()), &signature),
                "Round trip failed for {url} {params:?}"
            );
        }
    }

    #[test]
    fn changed_value_fails() {
        let tampered = WebhookParams::new()
            .with("CallSid", "CA1234567890ABCDE")
            .with("Caller", "+12349013030")
            .with("Digits", "1234")
            .with("From", "+12349013030")
            .with("To", "+18005551213");

        assert!(!validator().validate_params(FORM_URL, &tampered, FORM_SIGNATURE));
    }

    #[test]
    fn added_parameter_fails() {
        let params = call_params().with("Extra", "1");

        assert!(!validator().validate_params(FORM_URL, &params, FORM_SIGNATURE));
    }

    #[test]
    fn changed_url_fails() {
        let url = "https://mycompany.com/myapp.php?foo=1&bar=3";

        assert!(!validator().validate_params(url, &call_params(), FORM_SIGNATURE));
    }

    #[test]
    fn changed_secret_fails() {
        let other = RequestValidator::new("54321");

        assert!(!other.validate_params(FORM_URL, &call_params(), FORM_SIGNATURE));
    }

    #[test]
    fn missing_or_empty_signature_fails() {
        for claimed in ["", MISSING_SIGNATURE] {
            assert!(!validator().validate_params(FORM_URL, &call_params(), claimed));
        }
    }

    #[test]
    fn free_function_matches_method() {
        let payload = WebhookPayload::Form(call_params());

        assert!(validate(FORM_URL, &payload, FORM_SIGNATURE, TOKEN));
        assert!(!validate(FORM_URL, &payload, FORM_SIGNATURE, "wrong"));
    }
}

mod body_requests {
    use super::*;

    #[test]
    fn body_hash_is_hex_sha256() {
        assert_eq!(build_hash_for(BODY), BODY_HASH);
    }

    #[test]
    fn known_body_request_is_valid() {
        let payload = WebhookPayload::Body(BODY.to_string());

        assert!(validator().validate(BODY_URL, &payload, BODY_SIGNATURE));
    }

    #[test]
    fn modified_body_fails() {
        let payload = WebhookPayload::Body(r#"{"property": "value", "boolean": false}"#.to_string());

        assert!(!validator().validate(BODY_URL, &payload, BODY_SIGNATURE));
    }

    #[test]
    fn missing_body_hash_fails() {
        let url = "https://mycompany.com/myapp.php";
        let signature = validator().build_signature_for(url, &WebhookParams::new());

        assert!(!validator().validate_body(url, BODY, &signature));
    }

    #[test]
    fn unparseable_url_fails() {
        let url = "not a url";
        let signature = validator().build_signature_for(url, &WebhookParams::new());

        assert!(!validator().validate_body(url, BODY, &signature));
    }

    #[test]
    fn bad_signature_fails_even_with_valid_hash() {
        let payload = WebhookPayload::Body(BODY.to_string());

        assert!(!validator().validate(BODY_URL, &payload, FORM_SIGNATURE));
    }
}

mod constant_time_compare {
    use super::*;

    #[test]
    fn equal_strings_match() {
        assert!(secure_compare("abc", "abc"));
        assert!(secure_compare("", ""));
    }

    #[test]
    fn different_lengths_do_not_match() {
        assert!(!secure_compare("abc", "abcd"));
        assert!(!secure_compare("abcd", "abc"));
        assert!(!secure_compare("", "a"));
    }

    #[test]
    fn mismatch_position_does_not_matter() {
        let base = "0/KCTR6DLpKmkAf8muzZqo1nDgQ=";
        for i in 0..base.len() {
            let mut bytes = base.as_bytes().to_vec();
            bytes[i] ^= 0x01;
            let altered = String::from_utf8(bytes).unwrap();
            assert!(!secure_compare(base, &altered), "Mismatch at {i} not detected");
        }
    }
}

mod headers {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            "x-twilio-signature",
            http::HeaderValue::from_static("abc="),
        );

        assert_eq!(signature_from_headers(&headers), Some("abc="));
        assert_eq!(SIGNATURE_HEADER, "X-Twilio-Signature");
    }

    #[test]
    fn absent_header_is_none() {
        assert_eq!(signature_from_headers(&http::HeaderMap::new()), None);
    }
}

#[test]
fn debug_redacts_secret() {
    let debug = format!("{:?}", RequestValidator::new("super-secret"));

    assert!(!debug.contains("super-secret"));
}
