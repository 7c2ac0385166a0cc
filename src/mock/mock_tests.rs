//! Tests for the in-memory fake.

use std::sync::Arc;

use http::StatusCode;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::{LIST_CEILING, MockPostmark, TEST_SERVER_TOKEN};
use crate::client::SERVER_TOKEN_HEADER;
use crate::codes;
use crate::emails::{Email, EmailWithTemplate, Emails, Envelope};
use crate::error::Error;
use crate::templates::{Template, TemplateValidation, Templates};
use crate::test_fixtures::{FixedClock, RecordingClient, TEST_BASE_URL, model};

fn templated(id: &str, model_json: serde_json::Value) -> EmailWithTemplate {
    EmailWithTemplate {
        envelope: Envelope {
            from: "sender@example.com".to_string(),
            to: "receiver@example.com".to_string(),
            ..Envelope::default()
        },
        template_id: id.to_string(),
        template_model: model(model_json),
        ..EmailWithTemplate::default()
    }
}

fn assert_rejected<T: std::fmt::Debug>(result: Result<T, Error>, code: i64) {
    match result {
        Err(Error::Api(api)) => {
            assert_eq!(api.error_code, code);
            assert_eq!(api.status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(api.message, codes::meaning(code));
        }
        other => panic!("expected provider error {code}, got {other:?}"),
    }
}

mod templated_send {
    use super::*;

    #[tokio::test]
    async fn exact_key_set_is_accepted() {
        let mock = MockPostmark::new();
        let email = templated("1", json!({"val1": "a", "val2": "b", "val3": "c"}));

        let sent = mock
            .emails()
            .email_with_template(&CancellationToken::new(), &email)
            .await
            .unwrap();

        assert_eq!(sent.to, "receiver@example.com");
        assert_eq!(sent.error_code, 0);
        assert_eq!(sent.message, "OK");
        assert_eq!(sent.status_code, 200);
        assert!(uuid::Uuid::parse_str(&sent.message_id).is_ok());
    }

    #[tokio::test]
    async fn key_order_does_not_matter() {
        let mock = MockPostmark::new();
        let email = templated("5", json!({"val3": "c", "val1": "a", "val2": "b"}));

        let sent = mock
            .emails()
            .email_with_template(&CancellationToken::new(), &email)
            .await;

        assert!(sent.is_ok());
    }

    #[tokio::test]
    async fn missing_key_is_1120() {
        let mock = MockPostmark::new();
        let email = templated("1", json!({"val1": "a", "val2": "b"}));

        let result = mock
            .emails()
            .email_with_template(&CancellationToken::new(), &email)
            .await;

        assert_rejected(result, codes::MISSING_REQUIRED_VARIABLE);
    }

    #[tokio::test]
    async fn extra_key_is_1123() {
        let mock = MockPostmark::new();
        let email = templated(
            "1",
            json!({"val1": "a", "val2": "b", "val3": "c", "val4": "d"}),
        );

        let result = mock
            .emails()
            .email_with_template(&CancellationToken::new(), &email)
            .await;

        assert_rejected(result, codes::UNKNOWN_VARIABLE);
    }

    #[tokio::test]
    async fn unknown_template_is_1101() {
        let mock = MockPostmark::new();
        let email = templated("999", json!({"val1": "a"}));

        let result = mock
            .emails()
            .email_with_template(&CancellationToken::new(), &email)
            .await;

        assert_rejected(result, codes::TEMPLATE_NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_model_is_1109() {
        let mock = MockPostmark::new();
        let email = templated("1", json!({}));

        let result = mock
            .emails()
            .email_with_template(&CancellationToken::new(), &email)
            .await;

        assert_rejected(result, codes::EMPTY_TEMPLATE_MODEL);
    }

    #[tokio::test]
    async fn unknown_template_wins_over_empty_model() {
        let mock = MockPostmark::new();

        let result = mock
            .emails()
            .email_with_template(&CancellationToken::new(), &templated("42", json!({})))
            .await;

        assert_rejected(result, codes::TEMPLATE_NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_local_error() {
        let mock = MockPostmark::new();

        let result = mock
            .emails()
            .email_with_template(&CancellationToken::new(), &templated("abc", json!({"a": 1})))
            .await;

        assert!(matches!(
            result,
            Err(Error::InvalidTemplateId { ref value, .. }) if value == "abc"
        ));
    }

    #[tokio::test]
    async fn submitted_at_comes_from_clock() {
        let mock = MockPostmark::new().with_clock(FixedClock::at(1_700_000_000));
        let email = templated("1", json!({"val1": "a", "val2": "b", "val3": "c"}));

        let sent = mock
            .emails()
            .email_with_template(&CancellationToken::new(), &email)
            .await
            .unwrap();

        assert_eq!(sent.submitted_at.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn templates_email_matches_emails_facade() {
        let mock = MockPostmark::new();
        let good = templated("1", json!({"val1": "a", "val2": "b", "val3": "c"}));
        let bad = templated("1", json!({"val1": "a"}));

        assert!(
            mock.templates()
                .email(&CancellationToken::new(), &good)
                .await
                .is_ok()
        );
        assert_rejected(
            mock.templates().email(&CancellationToken::new(), &bad).await,
            codes::MISSING_REQUIRED_VARIABLE,
        );
    }

    #[tokio::test]
    async fn cancelled_token_is_honored() {
        let mock = MockPostmark::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = mock
            .emails()
            .email_with_template(&cancel, &templated("1", json!({"val1": "a"})))
            .await;

        assert!(matches!(result, Err(Error::Cancelled)));
    }
}

mod raw_send {
    use super::*;

    #[tokio::test]
    async fn raw_send_goes_through_transport_with_test_token() {
        let recorder = RecordingClient::json(
            StatusCode::OK,
            r#"{"To":"receiver@example.com","SubmittedAt":"2014-02-17T07:25:01-05:00","MessageID":"abc","ErrorCode":0,"Message":"Test job accepted"}"#,
        );
        let mock = MockPostmark::new().with_client(Arc::clone(&recorder));
        let email = Email {
            envelope: Envelope {
                from: "sender@example.com".to_string(),
                to: "receiver@example.com".to_string(),
                ..Envelope::default()
            },
            subject: "Hello".to_string(),
            text_body: "Hi".to_string(),
            ..Email::default()
        };

        let sent = mock
            .emails()
            .email(&CancellationToken::new(), &email)
            .await
            .unwrap();

        let request = recorder.only_request();
        assert!(request.url.as_str().ends_with("/email"));
        assert_eq!(
            request.headers.get(SERVER_TOKEN_HEADER).unwrap(),
            TEST_SERVER_TOKEN
        );
        assert_eq!(sent.message, "Test job accepted");
    }

    #[test]
    fn parent_targets_production_host() {
        let mock = MockPostmark::new();

        assert_eq!(mock.parent().base_url(), crate::client::DEFAULT_BASE_URL);
        assert_ne!(mock.parent().base_url(), TEST_BASE_URL);
    }
}

mod catalog {
    use super::*;

    #[tokio::test]
    async fn seeded_catalog_lists_five_templates() {
        let mock = MockPostmark::new();

        let list = mock
            .templates()
            .list(&CancellationToken::new(), 100, 0)
            .await
            .unwrap();

        let ids: Vec<i64> = list.templates.iter().map(|t| t.template_id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
        assert_eq!(list.template_count, 5);
        assert_eq!(list.templates[1].html_body, "TEST BODY");
        assert!(!list.templates[1].active);
    }

    #[tokio::test]
    async fn offset_skips_leading_ids() {
        let mock = MockPostmark::new();

        let list = mock
            .templates()
            .list(&CancellationToken::new(), 100, 2)
            .await
            .unwrap();

        let ids: Vec<i64> = list.templates.iter().map(|t| t.template_id).collect();
        assert_eq!(ids, [3, 4, 5]);
    }

    #[tokio::test]
    async fn count_limits_page_size() {
        let mock = MockPostmark::new();

        let list = mock
            .templates()
            .list(&CancellationToken::new(), 2, 0)
            .await
            .unwrap();

        assert_eq!(list.template_count, 2);
        assert_eq!(list.templates.len(), 2);
    }

    #[tokio::test]
    async fn offset_at_ceiling_lists_nothing() {
        let mock = MockPostmark::new();
        let offset = u32::try_from(LIST_CEILING).unwrap();

        let list = mock
            .templates()
            .list(&CancellationToken::new(), 10, offset)
            .await
            .unwrap();

        assert!(list.templates.is_empty());
        assert_eq!(list.template_count, 0);
    }

    #[tokio::test]
    async fn get_returns_seeded_template() {
        let mock = MockPostmark::new();

        let template = mock
            .templates()
            .get(&CancellationToken::new(), 3)
            .await
            .unwrap();

        assert_eq!(template.name, "Template 3");
        assert_eq!(template.subject, "Subject 3");
        assert_eq!(template.text_body, "ANOTHER TEST TEXT BODY");
    }

    #[tokio::test]
    async fn get_unknown_is_1101() {
        let mock = MockPostmark::new();

        assert_rejected(
            mock.templates().get(&CancellationToken::new(), 77).await,
            codes::TEMPLATE_NOT_FOUND,
        );
    }

    #[test]
    fn template_keys_reports_expected_variables() {
        let mock = MockPostmark::new();

        assert_eq!(mock.template_keys(2), ["val2", "val5", "val4"]);
        assert!(mock.template_keys(404).is_empty());
    }
}

mod mutation {
    use super::*;

    fn draft(name: &str) -> Template {
        Template {
            name: name.to_string(),
            subject: "Subject".to_string(),
            active: true,
            ..Template::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_next_id() {
        let mock = MockPostmark::new();
        let cancel = CancellationToken::new();

        let created = mock.templates().create(&cancel, &draft("New")).await.unwrap();

        assert_eq!(created.template_id, 6);
        assert_eq!(created.name, "New");
        assert!(created.active);
        assert_eq!(created.message, "OK");
        assert_eq!(
            mock.templates().get(&cancel, 6).await.unwrap().name,
            "New"
        );
    }

    #[tokio::test]
    async fn created_template_expects_no_keys() {
        let mock = MockPostmark::new();
        mock.templates()
            .create(&CancellationToken::new(), &draft("New"))
            .await
            .unwrap();

        assert!(mock.template_keys(6).is_empty());
        assert_rejected(
            mock.emails()
                .email_with_template(&CancellationToken::new(), &templated("6", json!({"x": 1})))
                .await,
            codes::UNKNOWN_VARIABLE,
        );
    }

    #[tokio::test]
    async fn edit_replaces_and_keeps_keys() {
        let mock = MockPostmark::new();
        let cancel = CancellationToken::new();

        let edited = mock
            .templates()
            .edit(&cancel, 2, &draft("Renamed"))
            .await
            .unwrap();

        assert_eq!(edited.template_id, 2);
        assert_eq!(edited.name, "Renamed");
        let stored = mock.templates().get(&cancel, 2).await.unwrap();
        assert_eq!(stored.template_id, 2);
        assert_eq!(stored.name, "Renamed");
        assert_eq!(mock.template_keys(2), ["val2", "val5", "val4"]);
    }

    #[tokio::test]
    async fn edit_unknown_id_is_1101() {
        let mock = MockPostmark::new();

        assert_rejected(
            mock.templates()
                .edit(&CancellationToken::new(), 50, &draft("x"))
                .await,
            codes::TEMPLATE_NOT_FOUND,
        );
    }

    #[tokio::test]
    async fn edit_with_unknown_payload_id_is_1101() {
        let mock = MockPostmark::new();
        let template = Template {
            template_id: 50,
            ..draft("x")
        };

        assert_rejected(
            mock.templates()
                .edit(&CancellationToken::new(), 2, &template)
                .await,
            codes::TEMPLATE_NOT_FOUND,
        );
        assert_eq!(
            mock.templates()
                .get(&CancellationToken::new(), 2)
                .await
                .unwrap()
                .name,
            "Template 2"
        );
    }

    #[tokio::test]
    async fn delete_removes_template() {
        let mock = MockPostmark::new();
        let cancel = CancellationToken::new();

        let deleted = mock.templates().delete(&cancel, 4).await.unwrap();

        assert_eq!(deleted.message, "Template 4 removed");
        assert_rejected(
            mock.templates().get(&cancel, 4).await,
            codes::TEMPLATE_NOT_FOUND,
        );
    }

    #[tokio::test]
    async fn delete_unknown_still_succeeds() {
        let mock = MockPostmark::new();

        let deleted = mock
            .templates()
            .delete(&CancellationToken::new(), 404)
            .await
            .unwrap();

        assert_eq!(deleted.message, "Template 404 removed");
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let mock = MockPostmark::new();
        let cancel = CancellationToken::new();
        mock.templates().delete(&cancel, 5).await.unwrap();

        let created = mock.templates().create(&cancel, &draft("New")).await.unwrap();

        assert_eq!(created.template_id, 6);
    }

    #[tokio::test]
    async fn reset_restores_seed_and_counter() {
        let mock = MockPostmark::new();
        let cancel = CancellationToken::new();
        mock.templates().delete(&cancel, 1).await.unwrap();
        mock.templates().create(&cancel, &draft("New")).await.unwrap();

        mock.reset();

        let ids: Vec<i64> = mock
            .templates()
            .list(&cancel, 100, 0)
            .await
            .unwrap()
            .templates
            .iter()
            .map(|t| t.template_id)
            .collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
        let created = mock.templates().create(&cancel, &draft("Again")).await.unwrap();
        assert_eq!(created.template_id, 6);
    }

    #[tokio::test]
    async fn private_catalogs_are_isolated() {
        let first = MockPostmark::new();
        let second = MockPostmark::new();

        first
            .templates()
            .delete(&CancellationToken::new(), 1)
            .await
            .unwrap();

        assert!(
            second
                .templates()
                .get(&CancellationToken::new(), 1)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn clones_share_a_catalog() {
        let first = MockPostmark::new();
        let second = first.clone();

        first
            .templates()
            .delete(&CancellationToken::new(), 1)
            .await
            .unwrap();

        assert!(
            second
                .templates()
                .get(&CancellationToken::new(), 1)
                .await
                .is_err()
        );
    }
}

mod validation {
    use super::*;

    #[tokio::test]
    async fn validate_is_unsupported() {
        let mock = MockPostmark::new();

        let result = mock
            .templates()
            .validate(&CancellationToken::new(), &TemplateValidation::default())
            .await;

        match result {
            Err(Error::ValidationUnsupported(response)) => {
                assert_eq!(response.validation_errors.len(), 1);
                assert!(!response.all_content_is_valid);
            }
            other => panic!("expected unsupported validation, got {other:?}"),
        }
    }
}

mod documented_cases {
    use super::*;

    async fn send(mock: &MockPostmark, id: &str, model_json: serde_json::Value) -> Result<(), Error> {
        mock.emails()
            .email_with_template(&CancellationToken::new(), &templated(id, model_json))
            .await
            .map(|_| ())
    }

    #[tokio::test]
    async fn template_two_missing_val4_is_1120() {
        let mock = MockPostmark::new();

        assert_rejected(
            send(&mock, "2", json!({"val2": "b", "val5": "e"})).await,
            codes::MISSING_REQUIRED_VARIABLE,
        );
    }

    #[tokio::test]
    async fn template_three_with_extra_key_is_1123() {
        let mock = MockPostmark::new();

        assert_rejected(
            send(
                &mock,
                "3",
                json!({"val6": 1, "val9": 2, "val12": 3, "extra": 4}),
            )
            .await,
            codes::UNKNOWN_VARIABLE,
        );
    }

    #[tokio::test]
    async fn template_ninety_nine_is_1101() {
        let mock = MockPostmark::new();

        assert_rejected(
            send(&mock, "99", json!({"x": 1})).await,
            codes::TEMPLATE_NOT_FOUND,
        );
    }

    #[tokio::test]
    async fn reset_then_list_pages_by_offset() {
        let mock = MockPostmark::new();
        let cancel = CancellationToken::new();
        mock.reset();

        let first: Vec<i64> = mock
            .templates()
            .list(&cancel, 10, 0)
            .await
            .unwrap()
            .templates
            .iter()
            .map(|t| t.template_id)
            .collect();
        let skipped: Vec<i64> = mock
            .templates()
            .list(&cancel, 10, 2)
            .await
            .unwrap()
            .templates
            .iter()
            .map(|t| t.template_id)
            .collect();

        assert_eq!(first, [1, 2, 3, 4, 5]);
        assert_eq!(skipped, [3, 4, 5]);
    }

    #[test]
    fn shared_handles_see_one_catalog() {
        let first = MockPostmark::shared();
        let second = MockPostmark::shared();

        first.reset();
        assert_eq!(first.template_keys(1), second.template_keys(1));
        assert_eq!(second.template_keys(1), ["val1", "val2", "val3"]);
    }
}
