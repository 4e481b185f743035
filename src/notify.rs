use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

// Topic the registration event is published under
pub const USER_REGISTERED: &str = "user-registered";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    UserRegistered { email: String },
}

impl Notification {
    pub fn topic(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => USER_REGISTERED,
        }
    }
}

/// Fire-and-forget publisher. Publishing never blocks and never fails the caller.
#[derive(Debug, Clone)]
pub struct NotificationSink {
    tx: mpsc::Sender<Notification>,
}

impl NotificationSink {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    pub fn publish(&self, notification: Notification) {
        let topic = notification.topic();
        match self.tx.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(topic, "notification queue full, dropping event");
            }
            Err(TrySendError::Closed(_)) => {
                tracing::warn!(topic, "notification worker gone, dropping event");
            }
        }
    }
}

// Background worker -> hands events to the mail side-channel one by one
pub async fn notification_worker(mut rx: mpsc::Receiver<Notification>) {
    tracing::info!("notification worker started");

    while let Some(notification) = rx.recv().await {
        match notification {
            Notification::UserRegistered { email } => {
                tracing::info!(topic = USER_REGISTERED, %email, "welcome mail handed off");
            }
        }
    }

    tracing::info!("notification worker stopped");
}
