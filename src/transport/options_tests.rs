//! Tests for `RequestOptions` and its lowering to `HttpRequest`.

use std::collections::BTreeMap;
use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_TYPE};

use super::{Attachment, BasicAuth, ConnectionSettings, FORM_URLENCODED, FormPart, RequestOptions};

fn url() -> url::Url {
    url::Url::parse("https://api.example.com/2010-04-01/Accounts/AC1/Calls.json").unwrap()
}

mod defaults {
    use super::*;

    #[test]
    fn new_has_documented_defaults() {
        let options = RequestOptions::new(http::Method::POST, url());

        assert!(options.tls_verify);
        assert!(!options.return_failed_response);
        assert!(options.body.is_none());
        assert!(options.basic_auth.is_none());
        assert!(options.proxy.is_none());
        assert!(options.timeout.is_none());
        assert!(options.attachments.is_empty());
    }

    #[test]
    fn log_url_falls_back_to_url() {
        let options = RequestOptions::get(url());

        assert_eq!(options.log_url(), url().as_str());
    }

    #[test]
    fn log_url_override_is_used() {
        let options = RequestOptions::get(url()).with_log_url("https://api.example.com/[redacted]");

        assert_eq!(options.log_url(), "https://api.example.com/[redacted]");
    }

    #[test]
    fn with_settings_copies_all_connection_fields() {
        let settings = ConnectionSettings {
            timeout: Some(Duration::from_secs(7)),
            proxy: Some(url::Url::parse("http://proxy.local:8080").unwrap()),
            tls_verify: false,
        };

        let options = RequestOptions::get(url()).with_settings(&settings);

        assert_eq!(options.settings(), settings);
    }
}

mod form_body {
    use super::*;

    #[test]
    fn form_is_url_encoded_with_content_type() {
        let options = RequestOptions::post(url())
            .with_form_field("To", "+15550001111")
            .with_form_field("Body", "Your code is 1234");

        let request = options.to_http_request().unwrap();

        assert_eq!(request.headers.get(CONTENT_TYPE).unwrap(), FORM_URLENCODED);
        assert_eq!(
            request.body.as_deref(),
            Some(b"Body=Your+code+is+1234&To=%2B15550001111".as_slice())
        );
    }

    #[test]
    fn encoding_does_not_depend_on_insertion_order() {
        let forward = RequestOptions::post(url())
            .with_form_field("A", "1")
            .with_form_field("B", "2");
        let backward = RequestOptions::post(url())
            .with_form_field("B", "2")
            .with_form_field("A", "1");

        assert_eq!(
            forward.to_http_request().unwrap().body,
            backward.to_http_request().unwrap().body
        );
    }

    #[test]
    fn caller_content_type_is_kept() {
        let options = RequestOptions::post(url())
            .with_header(
                CONTENT_TYPE,
                http::HeaderValue::from_static("application/x-www-form-urlencoded; charset=utf-8"),
            )
            .with_form(BTreeMap::from([("k".to_string(), "v".to_string())]));

        let request = options.to_http_request().unwrap();

        assert_eq!(request.headers.get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(
            request.headers.get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded; charset=utf-8"
        );
    }

    #[test]
    fn no_body_means_no_content_type() {
        let request = RequestOptions::get(url()).to_http_request().unwrap();

        assert!(request.body.is_none());
        assert!(!request.headers.contains_key(CONTENT_TYPE));
    }

    #[test]
    fn caller_map_is_not_mutated() {
        let body = BTreeMap::from([("To".to_string(), "+1".to_string())]);
        let options = RequestOptions::post(url()).with_form(body.clone());

        let _ = options.to_http_request().unwrap();

        assert_eq!(options.body, Some(body));
    }
}

mod basic_auth {
    use super::*;

    #[test]
    fn header_is_base64_of_user_and_password() {
        let options = RequestOptions::get(url()).with_basic_auth("AC123", "token");

        let request = options.to_http_request().unwrap();

        // base64("AC123:token")
        assert_eq!(
            request.headers.get(AUTHORIZATION).unwrap(),
            "Basic QUMxMjM6dG9rZW4="
        );
    }

    #[test]
    fn header_value_is_sensitive() {
        let value = BasicAuth::new("user", "pass").header_value().unwrap();

        assert!(value.is_sensitive());
    }

    #[test]
    fn debug_redacts_password() {
        let debug = format!("{:?}", BasicAuth::new("user", "hunter2"));

        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }
}

mod multipart {
    use super::*;

    #[test]
    fn attachments_turn_form_fields_into_parts() {
        let attachment = Attachment::pdf(b"%PDF-1.4".as_slice(), Some("invoice.pdf")).unwrap();
        let options = RequestOptions::post(url())
            .with_form_field("To", "+15550001111")
            .with_attachment("Media", attachment.clone());

        let request = options.to_http_request().unwrap();

        assert!(request.body.is_none());
        assert!(!request.headers.contains_key(CONTENT_TYPE));
        assert_eq!(
            request.parts,
            vec![
                FormPart::Text {
                    name: "To".to_string(),
                    value: "+15550001111".to_string(),
                },
                FormPart::File {
                    name: "Media".to_string(),
                    attachment,
                },
            ]
        );
    }
}
