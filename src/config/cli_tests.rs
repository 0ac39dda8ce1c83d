//! Tests for CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

use super::cli::{Cli, Command, TwimlCommand};

mod parsing {
    use super::*;

    #[test]
    fn parse_call_command() {
        let cli = Cli::parse_from_iter([
            "phone-relay",
            "call",
            "--from",
            "+15550001111",
            "--to",
            "+15550002222",
        ]);

        match cli.command {
            Command::Call { from, to } => {
                assert_eq!(from, "+15550001111");
                assert_eq!(to, "+15550002222");
            }
            other => panic!("Expected Call, got {other:?}"),
        }
    }

    #[test]
    fn parse_account_options() {
        let cli = Cli::parse_from_iter([
            "phone-relay",
            "--account-sid",
            "AC123",
            "--auth-token",
            "secret",
            "--from-number",
            "+15559990000",
            "--api-base",
            "http://localhost:8080",
            "--app-host",
            "https://relay.example.com",
            "twiml",
            "hangup",
        ]);

        assert_eq!(cli.account_sid.as_deref(), Some("AC123"));
        assert_eq!(cli.auth_token.as_deref(), Some("secret"));
        assert_eq!(cli.from_number.as_deref(), Some("+15559990000"));
        assert_eq!(cli.api_base.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.app_host.as_deref(), Some("https://relay.example.com"));
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "phone-relay",
            "call",
            "--from",
            "+1",
            "--to",
            "+2",
            "--timeout",
            "5",
            "--proxy",
            "http://proxy:3128",
            "--insecure",
            "-v",
        ]);

        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.proxy.as_deref(), Some("http://proxy:3128"));
        assert!(cli.insecure);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_sms_with_body() {
        let cli = Cli::parse_from_iter(["phone-relay", "sms", "--to", "+1", "--body", "hello"]);

        let Command::Sms(args) = cli.command else {
            panic!("Expected Sms");
        };
        assert_eq!(args.to, "+1");
        assert_eq!(args.body.as_deref(), Some("hello"));
        assert!(!args.code);
        assert_eq!(args.code_length, 6);
    }

    #[test]
    fn parse_sms_with_code() {
        let cli = Cli::parse_from_iter([
            "phone-relay",
            "sms",
            "--to",
            "+1",
            "--code",
            "--code-length",
            "8",
        ]);

        let Command::Sms(args) = cli.command else {
            panic!("Expected Sms");
        };
        assert!(args.code);
        assert_eq!(args.code_length, 8);
    }

    #[test]
    fn parse_verify_params() {
        let cli = Cli::parse_from_iter([
            "phone-relay",
            "verify",
            "--url",
            "https://example.com/twilio/connect?number_to=%2B1",
            "--signature",
            "abc=",
            "--param",
            "From=+15550001111",
            "--param",
            "Body=a=b",
            "--param",
            "Empty=",
        ]);

        let Command::Verify(args) = cli.command else {
            panic!("Expected Verify");
        };
        assert_eq!(args.signature.as_deref(), Some("abc="));
        assert_eq!(
            args.params,
            vec![
                ("From".to_string(), "+15550001111".to_string()),
                ("Body".to_string(), "a=b".to_string()),
                ("Empty".to_string(), String::new()),
            ]
        );
        assert!(args.body_file.is_none());
        assert!(args.content_type.is_none());
    }

    #[test]
    fn parse_twiml_documents() {
        let dial = Cli::parse_from_iter(["phone-relay", "twiml", "dial", "+15550002222"]);
        assert!(matches!(
            dial.command,
            Command::Twiml { document: TwimlCommand::Dial { ref number } } if number == "+15550002222"
        ));

        let hangup = Cli::parse_from_iter(["phone-relay", "twiml", "hangup"]);
        assert!(matches!(
            hangup.command,
            Command::Twiml {
                document: TwimlCommand::Hangup
            }
        ));
    }
}

mod init_command {
    use super::*;

    #[test]
    fn init_uses_default_output() {
        let cli = Cli::parse_from_iter(["phone-relay", "init"]);

        assert!(cli.is_offline());
        match cli.command {
            Command::Init { output } => assert_eq!(output, PathBuf::from("phone-relay.toml")),
            other => panic!("Expected Init, got {other:?}"),
        }
    }

    #[test]
    fn init_custom_output() {
        let cli = Cli::parse_from_iter(["phone-relay", "init", "-o", "custom.toml"]);

        match cli.command {
            Command::Init { output } => assert_eq!(output, PathBuf::from("custom.toml")),
            other => panic!("Expected Init, got {other:?}"),
        }
    }

    #[test]
    fn account_commands_are_not_offline() {
        let cli = Cli::parse_from_iter(["phone-relay", "sms", "--to", "+1", "--code"]);

        assert!(!cli.is_offline());
    }
}

mod rejection {
    use super::*;

    #[test]
    fn missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["phone-relay"]).is_err());
    }

    #[test]
    fn sms_requires_body_or_code() {
        assert!(Cli::try_parse_from(["phone-relay", "sms", "--to", "+1"]).is_err());
    }

    #[test]
    fn sms_body_and_code_conflict() {
        let result =
            Cli::try_parse_from(["phone-relay", "sms", "--to", "+1", "--body", "x", "--code"]);

        assert!(result.is_err());
    }

    #[test]
    fn code_length_out_of_range() {
        let result = Cli::try_parse_from([
            "phone-relay",
            "sms",
            "--to",
            "+1",
            "--code",
            "--code-length",
            "3",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn param_without_separator() {
        let result = Cli::try_parse_from([
            "phone-relay",
            "verify",
            "--url",
            "https://example.com",
            "--param",
            "From",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn body_file_conflicts_with_params() {
        let result = Cli::try_parse_from([
            "phone-relay",
            "verify",
            "--url",
            "https://example.com",
            "--param",
            "A=1",
            "--body-file",
            "body.json",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn content_type_requires_body_file() {
        let result = Cli::try_parse_from([
            "phone-relay",
            "verify",
            "--url",
            "https://example.com",
            "--content-type",
            "application/x-www-form-urlencoded",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn repeated_account_option_is_rejected() {
        let result = Cli::try_parse_from([
            "phone-relay",
            "--app-host",
            "https://a.example.com",
            "--app-host",
            "https://b.example.com",
            "twiml",
            "hangup",
        ]);

        assert!(result.is_err());
    }
}
