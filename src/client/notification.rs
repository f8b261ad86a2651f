//! Transient notifications with auto-dismiss

use crate::client::debounce::Debouncer;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Holds at most one visible notification
///
/// Showing a notification replaces the current one and restarts the
/// auto-dismiss timer. A zero duration disables auto-dismiss.
#[derive(Debug)]
pub struct Notifier {
    current: Arc<Mutex<Option<Notification>>>,
    timer: Debouncer,
}

impl Notifier {
    pub const DEFAULT_AUTO_DISMISS: Duration = Duration::from_secs(5);

    pub fn new(auto_dismiss: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            timer: Debouncer::new(auto_dismiss),
        }
    }

    pub fn show(&self, kind: NotificationKind, message: impl Into<String>) {
        *self.current.lock() = Some(Notification {
            kind,
            message: message.into(),
        });

        if self.timer.delay().is_zero() {
            return;
        }

        let current = Arc::clone(&self.current);
        self.timer.schedule(async move {
            current.lock().take();
        });
    }

    /// Hide the notification now and cancel its auto-dismiss
    pub fn dismiss(&self) {
        self.timer.cancel();
        self.current.lock().take();
    }

    pub fn current(&self) -> Option<Notification> {
        self.current.lock().clone()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_AUTO_DISMISS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss() {
        let notifier = Notifier::default();
        notifier.show(NotificationKind::Success, "ok");

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert!(notifier.current().is_some());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(notifier.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_notification_restarts_timer() {
        let notifier = Notifier::default();
        notifier.show(NotificationKind::Error, "first");

        tokio::time::sleep(Duration::from_secs(4)).await;
        notifier.show(NotificationKind::Success, "second");

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(
            notifier.current(),
            Some(Notification {
                kind: NotificationKind::Success,
                message: "second".to_string()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_dismiss() {
        let notifier = Notifier::default();
        notifier.show(NotificationKind::Error, "boom");
        notifier.dismiss();

        assert!(notifier.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_keeps_notification() {
        let notifier = Notifier::new(Duration::ZERO);
        notifier.show(NotificationKind::Error, "sticky");

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(notifier.current().is_some());
    }
}
