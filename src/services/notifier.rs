use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

/// Outbound notifications emitted after a successful write.
#[derive(Debug, Clone)]
pub enum Notification {
    BookingConfirmation { email: String, booking_id: i32 },
    InquiryReceived { email: String, inquiry_id: i32 },
    ContactReceived { email: String, subject: String },
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification channel unavailable: {0}")]
    Unavailable(String),
}

/// Capability for sending confirmation emails. The request flow treats the
/// outcome as advisory: a failed send never fails the primary operation.
#[rocket::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Stand-in for a real mail integration: logs the email that would go out.
pub struct LogNotifier;

#[rocket::async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        match notification {
            Notification::BookingConfirmation { email, booking_id } => {
                info!(%email, booking_id, "booking confirmation email would be sent");
            }
            Notification::InquiryReceived { email, inquiry_id } => {
                info!(%email, inquiry_id, "inquiry confirmation email would be sent");
            }
            Notification::ContactReceived { email, subject } => {
                info!(%email, %subject, "contact form email would be sent");
            }
        }
        Ok(())
    }
}

/// Fire-and-forget dispatch: spawns the send and logs any failure.
pub fn dispatch(notifier: &Arc<dyn Notifier>, notification: Notification) {
    let notifier = Arc::clone(notifier);
    tokio::spawn(async move {
        if let Err(e) = notifier.send(notification).await {
            error!("failed to send notification: {e}");
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
    }

    #[rocket::async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(notification);
            Ok(())
        }
    }

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        let result = LogNotifier
            .send(Notification::BookingConfirmation {
                email: "jane@example.com".to_string(),
                booking_id: 1,
            })
            .await;
        assert!(result.is_ok());
    }

    struct FailingNotifier;

    #[rocket::async_trait]
    impl Notifier for FailingNotifier {
        async fn send(&self, _notification: Notification) -> Result<(), NotifyError> {
            Err(NotifyError::Unavailable("smtp relay down".to_string()))
        }
    }

    #[tokio::test]
    async fn dispatch_swallows_send_failures() {
        let notifier: Arc<dyn Notifier> = Arc::new(FailingNotifier);
        dispatch(
            &notifier,
            Notification::InquiryReceived {
                email: "jane@example.com".to_string(),
                inquiry_id: 1,
            },
        );
        // The spawned send fails; nothing propagates to the caller.
        tokio::task::yield_now().await;
    }

    #[tokio::test]
    async fn recording_notifier_captures_sends() {
        let notifier = RecordingNotifier {
            sent: Mutex::new(Vec::new()),
        };
        notifier
            .send(Notification::ContactReceived {
                email: "jane@example.com".to_string(),
                subject: "Tasting menu".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }
}
