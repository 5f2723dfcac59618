//! Email worker delivery tests.

use std::sync::Arc;

use mockall::predicate::eq;

use common::AppError;
use domain::NotificationStatus;
use notification_service_lib::jobs::{deliver, DeliveryContext, EmailJob, LogMailer, MockMailer};
use notification_service_lib::repository::MockNotificationRepository;

fn job() -> EmailJob {
    EmailJob {
        notification_id: 21,
        to: "jane@foundation.com".to_string(),
        from: "noreply@foundation.com".to_string(),
        subject: "Your demande status has been updated".to_string(),
        html: "<p>Approved</p>".to_string(),
        reply_to: None,
    }
}

#[tokio::test]
async fn test_delivered_email_is_marked_sent() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_set_status()
        .withf(|id, status, sent_at| {
            *id == 21 && *status == NotificationStatus::Sent && sent_at.is_some()
        })
        .times(1)
        .returning(|_, _, _| Ok(()));
    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .withf(|j| j.to == "jane@foundation.com")
        .times(1)
        .returning(|_| Ok(()));

    let ctx = DeliveryContext {
        notifications: Arc::new(repo),
        mailer: Arc::new(mailer),
    };
    deliver(&job(), &ctx).await.unwrap();
}

#[tokio::test]
async fn test_transport_failure_is_marked_failed_and_retried() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_set_status()
        .with(eq(21), eq(NotificationStatus::Failed), eq(None))
        .times(1)
        .returning(|_, _, _| Ok(()));
    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .returning(|_| Err(AppError::internal("SMTP connection refused")));

    let ctx = DeliveryContext {
        notifications: Arc::new(repo),
        mailer: Arc::new(mailer),
    };
    let err = deliver(&job(), &ctx).await.unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
}

#[tokio::test]
async fn test_log_mailer_always_succeeds() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_set_status()
        .with(eq(21), eq(NotificationStatus::Sent), mockall::predicate::always())
        .returning(|_, _, _| Ok(()));

    let ctx = DeliveryContext {
        notifications: Arc::new(repo),
        mailer: Arc::new(LogMailer),
    };
    deliver(&job(), &ctx).await.unwrap();
}

#[test]
fn test_job_payload_without_reply_to_deserializes() {
    let job: EmailJob = serde_json::from_value(serde_json::json!({
        "notification_id": 3,
        "to": "jane@foundation.com",
        "from": "noreply@foundation.com",
        "subject": "Hello",
        "html": "<p>Hi</p>"
    }))
    .unwrap();
    assert_eq!(job.reply_to, None);
}
