mod common;

use common::{fake_provider, mock_provider, not_found, FakeGmail, MockGmail};
use gmail_provider::error::GmailError;
use gmail_provider::models::FilterConfig;
use gmail_provider::resources::{self, Change, FilterResource, Resource};
use google_gmail1::api::Filter;
use mockall::predicate::*;
use mockall::Sequence;

fn from_filter(sender: &str) -> FilterConfig {
    let mut config = FilterConfig::default();
    config.criteria.from = sender.to_string();
    config.action.add_labels.insert("L1".to_string());
    config
}

#[tokio::test]
async fn test_create_sends_only_set_fields() {
    let mut mock = MockGmail::new();
    mock.expect_create_filter()
        .with(
            eq("me"),
            function(|filter: &Filter| {
                let criteria = filter.criteria.as_ref().unwrap();
                let action = filter.action.as_ref().unwrap();
                criteria.from.as_deref() == Some("a@x")
                    && criteria.to.is_none()
                    && criteria.has_attachment.is_none()
                    && criteria.size.is_none()
                    && action.add_label_ids == Some(vec!["L1".to_string()])
                    && action.remove_label_ids.is_none()
                    && action.forward.is_none()
            }),
        )
        .times(1)
        .returning(|_, filter| {
            Ok(Filter {
                id: Some("ANe1Bmj".to_string()),
                ..filter
            })
        });
    mock.expect_get_filter()
        .with(eq("me"), eq("ANe1Bmj"))
        .times(1)
        .returning(|_, _| {
            Ok(Filter {
                id: Some("ANe1Bmj".to_string()),
                criteria: Some(google_gmail1::api::FilterCriteria {
                    from: Some("a@x".to_string()),
                    ..Default::default()
                }),
                action: Some(google_gmail1::api::FilterAction {
                    add_label_ids: Some(vec!["L1".to_string()]),
                    ..Default::default()
                }),
                ..Default::default()
            })
        });

    let provider = mock_provider(mock);
    let state = FilterResource
        .create(&provider, &from_filter("a@x"))
        .await
        .unwrap();

    assert_eq!(state.id, "ANe1Bmj");
    assert_eq!(state.to_config(None), from_filter("a@x"));
}

#[tokio::test]
async fn test_changed_sender_replaces_filter() {
    let prior = from_filter("a@x");
    let proposed = from_filter("b@x");
    assert_eq!(FilterResource::plan(&prior, &proposed), Change::Replace);

    let mut mock = MockGmail::new();
    let mut seq = Sequence::new();

    mock.expect_delete_filter()
        .with(eq("me"), eq("F1"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));
    mock.expect_create_filter()
        .withf(|_, filter| {
            filter
                .criteria
                .as_ref()
                .and_then(|c| c.from.as_deref())
                == Some("b@x")
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, filter| {
            Ok(Filter {
                id: Some("F2".to_string()),
                ..filter
            })
        });
    mock.expect_get_filter()
        .with(eq("me"), eq("F2"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| {
            Ok(Filter {
                id: Some("F2".to_string()),
                ..Default::default()
            })
        });

    let provider = mock_provider(mock);
    let state = resources::replace(&FilterResource, &provider, "F1", &prior, &proposed)
        .await
        .unwrap();

    assert_eq!(state.id, "F2");
}

#[tokio::test]
async fn test_replace_leaves_a_single_filter() {
    let fake = FakeGmail::new();
    let provider = fake_provider(&fake);

    let created = FilterResource
        .create(&provider, &from_filter("a@x"))
        .await
        .unwrap();
    let replaced = resources::replace(
        &FilterResource,
        &provider,
        &created.id,
        &from_filter("a@x"),
        &from_filter("b@x"),
    )
    .await
    .unwrap();

    let filters = fake.filters("me");
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0].id.as_deref(), Some(replaced.id.as_str()));
    assert_ne!(replaced.id, created.id);
    assert_eq!(replaced.criteria.from, "b@x");
}

#[tokio::test]
async fn test_replace_deletes_from_prior_mailbox() {
    let fake = FakeGmail::new();
    let provider = fake_provider(&fake);

    let created = FilterResource
        .create(&provider, &from_filter("a@x"))
        .await
        .unwrap();

    let mut moved = from_filter("a@x");
    moved.user_id = Some("team@example.com".to_string());
    resources::replace(&FilterResource, &provider, &created.id, &from_filter("a@x"), &moved)
        .await
        .unwrap();

    assert!(fake.filters("me").is_empty());
    assert_eq!(fake.filters("team@example.com").len(), 1);
}

#[tokio::test]
async fn test_failed_delete_aborts_replace() {
    let mut mock = MockGmail::new();
    mock.expect_delete_filter()
        .times(1)
        .returning(|_, _| Err(GmailError::Forbidden("insufficient scope".to_string())));
    mock.expect_create_filter().never();

    let provider = mock_provider(mock);
    let err = resources::replace(
        &FilterResource,
        &provider,
        "F1",
        &from_filter("a@x"),
        &from_filter("b@x"),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("failed to delete filter 'F1'"));
}

#[tokio::test]
async fn test_read_missing_filter_clears_identity() {
    let mut mock = MockGmail::new();
    mock.expect_get_filter()
        .with(eq("me"), eq("gone"))
        .times(1)
        .returning(|_, _| Err(not_found()));

    let provider = mock_provider(mock);
    assert!(FilterResource
        .read(&provider, None, "gone")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_filter_deleted_out_of_band_reads_as_absent() {
    let fake = FakeGmail::new();
    let provider = fake_provider(&fake);

    let created = FilterResource
        .create(&provider, &from_filter("a@x"))
        .await
        .unwrap();
    fake.remove_filter_out_of_band("me", &created.id);

    assert!(FilterResource
        .read(&provider, None, &created.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_read_surfaces_server_errors() {
    let mut mock = MockGmail::new();
    mock.expect_get_filter().returning(|_, _| {
        Err(GmailError::ServerError {
            status: 503,
            message: "backend unavailable".to_string(),
        })
    });

    let provider = mock_provider(mock);
    let err = FilterResource
        .read(&provider, None, "F1")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("failed to read filter 'F1'"));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_read_after_create_is_consistent() {
    let fake = FakeGmail::new();
    let provider = fake_provider(&fake);

    let mut config = from_filter("a@x");
    config.criteria.has_attachment = true;
    config.criteria.size = 1_000_000;
    config.criteria.size_comparison = "larger".to_string();
    config.action.remove_labels.insert("INBOX".to_string());
    config.action.forward = "archive@example.com".to_string();

    let created = FilterResource.create(&provider, &config).await.unwrap();
    let read = FilterResource
        .read(&provider, None, &created.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(read, created);
    assert_eq!(read.to_config(None), config);
}

#[tokio::test]
async fn test_delete_filter_in_overridden_mailbox() {
    let mut mock = MockGmail::new();
    mock.expect_delete_filter()
        .with(eq("team@example.com"), eq("F1"))
        .times(1)
        .returning(|_, _| Ok(()));

    let provider = mock_provider(mock);
    FilterResource
        .delete(&provider, Some("team@example.com"), "F1")
        .await
        .unwrap();
}
