//! Notification service tests against a mocked repository and queue.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::predicate::eq;

use common::{AppError, CurrentUser, PageRequest};
use domain::{Notification, NotificationStatus, NotificationType};
use notification_service_lib::config::EmailConfig;
use notification_service_lib::jobs::MockEmailQueue;
use notification_service_lib::repository::{MockNotificationRepository, NewNotification};
use notification_service_lib::service::{
    ContactNotice, DemandeStatusNotice, EmailMessage, EventNotice, NewsNotice,
    NotificationManager, NotificationService,
};

fn stored(id: i64, new: NewNotification) -> Notification {
    Notification {
        id,
        recipient_email: new.recipient_email,
        subject: new.subject,
        content: new.content,
        notification_type: new.notification_type,
        status: NotificationStatus::Queued,
        sent_at: None,
        is_read: false,
        created_at: Utc::now(),
    }
}

fn notification(id: i64, recipient: &str, is_read: bool) -> Notification {
    Notification {
        id,
        recipient_email: recipient.to_string(),
        subject: "Your demande status has been updated".to_string(),
        content: "<p>Approved</p>".to_string(),
        notification_type: NotificationType::DemandeStatus,
        status: NotificationStatus::Sent,
        sent_at: Some(Utc::now()),
        is_read,
        created_at: Utc::now(),
    }
}

fn member() -> CurrentUser {
    CurrentUser {
        id: 7,
        email: "Awa.Diallo@foundation.com".to_string(),
        name: "Awa Diallo".to_string(),
        matricule: None,
        roles: vec!["USER".to_string()],
    }
}

fn service(repo: MockNotificationRepository, queue: MockEmailQueue) -> NotificationManager {
    NotificationManager::new(Arc::new(repo), Arc::new(queue), EmailConfig::default())
}

#[tokio::test]
async fn test_send_email_records_then_queues_with_default_sender() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_create()
        .withf(|n| {
            n.recipient_email == "jane@foundation.com"
                && n.notification_type == NotificationType::Email
        })
        .returning(|n| Ok(stored(31, n)));
    let mut queue = MockEmailQueue::new();
    queue
        .expect_enqueue()
        .withf(|job| {
            job.notification_id == 31
                && job.from == "noreply@foundation.com"
                && job.to == "jane@foundation.com"
        })
        .times(1)
        .returning(|_| Ok(()));

    let message = EmailMessage {
        to: " Jane@Foundation.com ".to_string(),
        subject: "Welcome".to_string(),
        html: "<p>Hello</p>".to_string(),
        from: None,
        reply_to: None,
    };
    let created = service(repo, queue).send_email(message).await.unwrap();
    assert_eq!(created.id, 31);
    assert_eq!(created.status, NotificationStatus::Queued);
}

#[tokio::test]
async fn test_queue_failure_marks_notification_failed() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_create().returning(|n| Ok(stored(32, n)));
    repo.expect_set_status()
        .with(eq(32), eq(NotificationStatus::Failed), eq(None))
        .times(1)
        .returning(|_, _, _| Ok(()));
    let mut queue = MockEmailQueue::new();
    queue
        .expect_enqueue()
        .returning(|_| Err(AppError::internal("Failed to queue email: pool timed out")));

    let message = EmailMessage {
        to: "jane@foundation.com".to_string(),
        subject: "Welcome".to_string(),
        html: "<p>Hello</p>".to_string(),
        from: Some("board@foundation.com".to_string()),
        reply_to: None,
    };
    let err = service(repo, queue).send_email(message).await.unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
}

#[tokio::test]
async fn test_contact_goes_to_support_with_reply_to_sender() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_create()
        .withf(|n| {
            n.recipient_email == "support@foundation.com"
                && n.subject == "New Contact Form Submission: Partenariat"
                && n.notification_type == NotificationType::Contact
                && n.content.contains("&lt;b&gt;")
        })
        .returning(|n| Ok(stored(40, n)));
    let mut queue = MockEmailQueue::new();
    queue
        .expect_enqueue()
        .withf(|job| job.reply_to.as_deref() == Some("jean@example.com"))
        .returning(|_| Ok(()));

    let notice = ContactNotice {
        full_name: "Jean Martin".to_string(),
        email: "jean@example.com".to_string(),
        subject: "Partenariat".to_string(),
        message: "Bonjour <b>équipe</b>".to_string(),
    };
    service(repo, queue).notify_contact(notice).await.unwrap();
}

#[tokio::test]
async fn test_demande_status_uses_badge_color() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_create()
        .withf(|n| {
            n.subject == "Your demande status has been updated"
                && n.content.contains("#dc3545")
                && n.content.contains("Dossier incomplet")
        })
        .returning(|n| Ok(stored(41, n)));
    let mut queue = MockEmailQueue::new();
    queue.expect_enqueue().returning(|_| Ok(()));

    let notice = DemandeStatusNotice {
        to: "awa.diallo@foundation.com".to_string(),
        user_name: "Awa".to_string(),
        demande_id: 12,
        prestation_title: "Aide au logement".to_string(),
        status: "REJECTED".to_string(),
        admin_comment: Some("Dossier incomplet".to_string()),
    };
    let created = service(repo, queue)
        .notify_demande_status(notice)
        .await
        .unwrap();
    assert_eq!(created.notification_type, NotificationType::DemandeStatus);
}

#[tokio::test]
async fn test_news_fans_out_once_per_distinct_recipient() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_create()
        .withf(|n| n.subject == "New article published: Rapport annuel")
        .times(2)
        .returning(|n| {
            let id = if n.recipient_email.starts_with("awa") { 1 } else { 2 };
            Ok(stored(id, n))
        });
    let mut queue = MockEmailQueue::new();
    queue.expect_enqueue().times(2).returning(|_| Ok(()));

    let notice = NewsNotice {
        recipients: vec![
            "awa@foundation.com".to_string(),
            "AWA@foundation.com".to_string(),
            "jean@foundation.com".to_string(),
        ],
        title: "Rapport annuel".to_string(),
        summary: None,
        link: Some("https://foundation.org/news/rapport-annuel".to_string()),
    };
    let sent = service(repo, queue).notify_news(notice).await.unwrap();
    assert_eq!(sent.queued.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 2]);
    assert!(sent.failed.is_empty());
}

#[tokio::test]
async fn test_news_reports_recipients_that_failed() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_create().times(2).returning(|n| {
        let id = if n.recipient_email.starts_with("awa") { 1 } else { 2 };
        Ok(stored(id, n))
    });
    repo.expect_set_status()
        .with(eq(2), eq(NotificationStatus::Failed), eq(None))
        .times(1)
        .returning(|_, _, _| Ok(()));
    let mut queue = MockEmailQueue::new();
    queue.expect_enqueue().times(2).returning(|job| {
        if job.to == "jean@foundation.com" {
            Err(AppError::internal("Failed to queue email: pool timed out"))
        } else {
            Ok(())
        }
    });

    let notice = NewsNotice {
        recipients: vec![
            "awa@foundation.com".to_string(),
            "jean@foundation.com".to_string(),
        ],
        title: "Rapport annuel".to_string(),
        summary: None,
        link: None,
    };
    let sent = service(repo, queue).notify_news(notice).await.unwrap();
    assert_eq!(sent.queued.len(), 1);
    assert_eq!(sent.queued[0].id, 1);
    assert_eq!(sent.failed, vec!["jean@foundation.com".to_string()]);
}

#[tokio::test]
async fn test_news_fails_when_no_recipient_is_queued() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_create().returning(|n| Ok(stored(3, n)));
    repo.expect_set_status().returning(|_, _, _| Ok(()));
    let mut queue = MockEmailQueue::new();
    queue
        .expect_enqueue()
        .returning(|_| Err(AppError::internal("Failed to queue email: pool timed out")));

    let notice = NewsNotice {
        recipients: vec!["awa@foundation.com".to_string()],
        title: "Rapport annuel".to_string(),
        summary: None,
        link: None,
    };
    let err = service(repo, queue).notify_news(notice).await.unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
}

#[tokio::test]
async fn test_event_without_recipients_is_rejected() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_create().never();

    let notice = EventNotice {
        recipients: vec!["  ".to_string()],
        title: "Gala".to_string(),
        start_date: Utc.with_ymd_and_hms(2025, 6, 14, 19, 0, 0).unwrap(),
        location: None,
        link: None,
    };
    let err = service(repo, MockEmailQueue::new())
        .notify_event(notice)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_event_subject() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_create()
        .withf(|n| {
            n.subject == "New event: Gala"
                && n.notification_type == NotificationType::Event
                && n.content.contains("2025-06-14 19:00 UTC")
        })
        .returning(|n| Ok(stored(50, n)));
    let mut queue = MockEmailQueue::new();
    queue.expect_enqueue().returning(|_| Ok(()));

    let notice = EventNotice {
        recipients: vec!["jean@foundation.com".to_string()],
        title: "Gala".to_string(),
        start_date: Utc.with_ymd_and_hms(2025, 6, 14, 19, 0, 0).unwrap(),
        location: Some("Dakar".to_string()),
        link: None,
    };
    let sent = service(repo, queue).notify_event(notice).await.unwrap();
    assert_eq!(sent.queued.len(), 1);
}

#[tokio::test]
async fn test_inbox_uses_normalized_token_email() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_list_for_recipient()
        .withf(|email, page| email == "awa.diallo@foundation.com" && page.page == 2)
        .returning(|_, _| Ok((vec![], 11)));

    let page = service(repo, MockEmailQueue::new())
        .my_notifications(&member(), PageRequest::new(2, 10))
        .await
        .unwrap();
    assert_eq!(page.total_elements, 11);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn test_unread_count() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_unread_count()
        .withf(|email| email == "awa.diallo@foundation.com")
        .returning(|_| Ok(3));

    let count = service(repo, MockEmailQueue::new())
        .unread_count(&member())
        .await
        .unwrap();
    assert_eq!(count, 3);
}

#[tokio::test]
async fn test_mark_read_by_recipient() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_find_by_id()
        .with(eq(8))
        .returning(|id| Ok(Some(notification(id, "awa.diallo@foundation.com", false))));
    repo.expect_mark_read().with(eq(8)).times(1).returning(|_| Ok(()));

    let read = service(repo, MockEmailQueue::new())
        .mark_read(8, &member())
        .await
        .unwrap();
    assert!(read.is_read);
}

#[tokio::test]
async fn test_mark_read_already_read_is_noop() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(notification(id, "awa.diallo@foundation.com", true))));
    repo.expect_mark_read().never();

    assert!(service(repo, MockEmailQueue::new())
        .mark_read(8, &member())
        .await
        .unwrap()
        .is_read);
}

#[tokio::test]
async fn test_mark_read_of_someone_else() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(notification(id, "jean@foundation.com", false))));
    repo.expect_mark_read().never();

    let err = service(repo, MockEmailQueue::new())
        .mark_read(8, &member())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_mark_read_missing() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let err = service(repo, MockEmailQueue::new())
        .mark_read(8, &member())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
