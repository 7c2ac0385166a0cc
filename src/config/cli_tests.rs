//! Tests for CLI argument parsing.

use std::path::PathBuf;

use serde_json::json;

use super::ConfigError;
use super::cli::{Cli, Command, TemplatesCommand};

mod parsing {
    use super::*;

    #[test]
    fn parse_global_options_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "postmark",
            "templates",
            "list",
            "--server-token",
            "abc",
            "--base-url",
            "https://example.test",
            "--timeout",
            "5",
            "-v",
        ]);

        assert_eq!(cli.server_token.as_deref(), Some("abc"));
        assert_eq!(cli.base_url.as_deref(), Some("https://example.test"));
        assert_eq!(cli.timeout, Some(5));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from_iter(["postmark", "-c", "/tmp/pm.toml", "templates", "get", "7"]);

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/pm.toml")));
    }

    #[test]
    fn parse_init_with_default_output() {
        let cli = Cli::parse_from_iter(["postmark", "init"]);

        assert!(matches!(
            cli.command,
            Command::Init { ref output } if output == &PathBuf::from("postmark.toml")
        ));
    }

    #[test]
    fn parse_init_with_custom_output() {
        let cli = Cli::parse_from_iter(["postmark", "init", "-o", "custom.toml"]);

        assert!(matches!(
            cli.command,
            Command::Init { ref output } if output == &PathBuf::from("custom.toml")
        ));
    }

    #[test]
    fn parse_templates_list_defaults() {
        let cli = Cli::parse_from_iter(["postmark", "templates", "list"]);

        assert!(matches!(
            cli.command,
            Command::Templates(TemplatesCommand::List {
                count: 100,
                offset: 0
            })
        ));
    }

    #[test]
    fn parse_templates_list_paging() {
        let cli = Cli::parse_from_iter([
            "postmark", "templates", "list", "--count", "10", "--offset", "20",
        ]);

        assert!(matches!(
            cli.command,
            Command::Templates(TemplatesCommand::List {
                count: 10,
                offset: 20
            })
        ));
    }

    #[test]
    fn parse_templates_get_and_delete() {
        let get = Cli::parse_from_iter(["postmark", "templates", "get", "1234"]);
        assert!(matches!(
            get.command,
            Command::Templates(TemplatesCommand::Get { id: 1234 })
        ));

        let delete = Cli::parse_from_iter(["postmark", "templates", "delete", "9"]);
        assert!(matches!(
            delete.command,
            Command::Templates(TemplatesCommand::Delete { id: 9 })
        ));
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        let result = <Cli as clap::Parser>::try_parse_from(["postmark"]);

        assert!(result.is_err());
    }

    #[test]
    fn send_requires_subject() {
        let result = <Cli as clap::Parser>::try_parse_from([
            "postmark", "send", "--from", "a@x", "--to", "b@x",
        ]);

        assert!(result.is_err());
    }
}

mod send {
    use super::*;

    fn send_args(extra: &[&str]) -> super::super::SendArgs {
        let mut args = vec![
            "postmark",
            "send",
            "--from",
            "sender@example.com",
            "--to",
            "receiver@example.com",
            "--subject",
            "Hello",
        ];
        args.extend(extra);
        match Cli::parse_from_iter(args).command {
            Command::Send(args) => args,
            other => panic!("expected send, got {other:?}"),
        }
    }

    #[test]
    fn minimal_send_builds_email() {
        let email = send_args(&["--text-body", "Hi"]).to_email().unwrap();

        assert_eq!(email.envelope.from, "sender@example.com");
        assert_eq!(email.envelope.to, "receiver@example.com");
        assert_eq!(email.subject, "Hello");
        assert_eq!(email.text_body, "Hi");
        assert!(email.html_body.is_empty());
        assert!(email.envelope.headers.is_empty());
    }

    #[test]
    fn headers_accept_both_separators_in_order() {
        let email = send_args(&[
            "--header",
            "X-First=1",
            "--header",
            "X-Second: 2",
        ])
        .to_email()
        .unwrap();

        let headers: Vec<(&str, &str)> = email
            .envelope
            .headers
            .iter()
            .map(|h| (h.name.as_str(), h.value.as_str()))
            .collect();
        assert_eq!(headers, [("X-First", "1"), ("X-Second", "2")]);
    }

    #[test]
    fn header_splits_on_first_separator() {
        let email = send_args(&[
            "--header",
            "X-Query: a=b",
            "--header",
            "X-Time=12:30",
        ])
        .to_email()
        .unwrap();

        let headers: Vec<(&str, &str)> = email
            .envelope
            .headers
            .iter()
            .map(|h| (h.name.as_str(), h.value.as_str()))
            .collect();
        assert_eq!(headers, [("X-Query", "a=b"), ("X-Time", "12:30")]);
    }

    #[test]
    fn malformed_header_is_rejected() {
        let result = send_args(&["--header", "no-separator"]).to_email();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidHeader { ref value }) if value == "no-separator"
        ));
    }

    #[test]
    fn optional_addressing_fields_are_copied() {
        let email = send_args(&[
            "--cc",
            "cc@example.com",
            "--bcc",
            "bcc@example.com",
            "--tag",
            "welcome",
            "--reply-to",
            "reply@example.com",
            "--track-opens",
        ])
        .to_email()
        .unwrap();

        assert_eq!(email.envelope.cc, "cc@example.com");
        assert_eq!(email.envelope.bcc, "bcc@example.com");
        assert_eq!(email.envelope.tag, "welcome");
        assert_eq!(email.envelope.reply_to, "reply@example.com");
        assert!(email.envelope.track_opens);
    }
}

mod send_template {
    use super::*;

    fn send_template(extra: &[&str]) -> super::super::SendTemplateArgs {
        let mut args = vec![
            "postmark",
            "send-template",
            "--from",
            "sender@example.com",
            "--to",
            "receiver@example.com",
            "--template-id",
            "42",
        ];
        args.extend(extra);
        match Cli::parse_from_iter(args).command {
            Command::SendTemplate(args) => args,
            other => panic!("expected send-template, got {other:?}"),
        }
    }

    #[test]
    fn model_is_parsed_and_id_stringified() {
        let email = send_template(&["--model", r#"{"name":"Ada"}"#, "--inline-css"])
            .to_email()
            .unwrap();

        assert_eq!(email.template_id, "42");
        assert_eq!(email.template_model.get("name"), Some(&json!("Ada")));
        assert!(email.inline_css);
    }

    #[test]
    fn default_model_is_empty_object() {
        let email = send_template(&[]).to_email().unwrap();

        assert!(email.template_model.is_empty());
    }

    #[test]
    fn non_object_model_is_rejected() {
        let result = send_template(&["--model", "[1,2]"]).to_email();

        assert!(matches!(result, Err(ConfigError::InvalidModel { .. })));
    }
}

mod validate {
    use super::*;

    #[test]
    fn validate_args_build_request() {
        let cli = Cli::parse_from_iter([
            "postmark",
            "templates",
            "validate",
            "--subject",
            "Hi {{name}}",
            "--model",
            r#"{"name":"Ada"}"#,
        ]);
        let Command::Templates(TemplatesCommand::Validate(args)) = cli.command else {
            panic!("expected templates validate");
        };

        let validation = args.to_validation().unwrap();

        assert_eq!(validation.subject, "Hi {{name}}");
        assert!(validation.html_body.is_empty());
        assert_eq!(validation.test_render_model.get("name"), Some(&json!("Ada")));
        assert!(!validation.inline_css_for_html_test_render);
    }
}
