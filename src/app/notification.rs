use std::time::{Duration, Instant};

pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

/// The single toast slot.
///
/// Time is passed in rather than read so the UI tick and the tests drive the
/// same code.
#[derive(Debug, Default)]
pub struct NotificationState {
    current: Option<(Notification, Instant)>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is showing; the dismissal deadline restarts.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        let notification = Notification {
            message: message.into(),
            kind,
        };
        tracing::debug!("Notification ({:?}): {}", kind, notification.message);
        self.current = Some((notification, now + NOTIFICATION_TIMEOUT));
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Clear the toast once its deadline has passed. Returns true if it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.current {
            Some((_, deadline)) if now >= *deadline => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(n, _)| n)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|(_, d)| *d)
    }
}
