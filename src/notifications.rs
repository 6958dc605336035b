//! Transient user-facing notifications with per-notification expiry timers.

use crate::config::DEFAULT_NOTIFICATION_DURATION_MS;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub type NotificationId = String;

/// Called with the id of a notification whose timer ran out
pub type ExpiryCallback = Arc<dyn Fn(NotificationId) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Error => "✕",
            Severity::Info => "i",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
    pub auto_dismiss: bool,
}

/// Ordered queue of active notifications
pub struct NotificationCenter {
    active: Vec<Notification>,
    timers: HashMap<NotificationId, CancellationToken>,
    on_expire: Option<ExpiryCallback>,
}

impl NotificationCenter {
    /// A center without timers; notifications stay until dismissed
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            timers: HashMap::new(),
            on_expire: None,
        }
    }

    /// A center that reports expired notifications through `on_expire`.
    /// The owner is expected to call [`dismiss`](Self::dismiss) in response.
    pub fn with_expiry(on_expire: ExpiryCallback) -> Self {
        let mut center = Self::new();
        center.on_expire = Some(on_expire);
        center
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.show_with(
            message,
            severity,
            Duration::from_millis(DEFAULT_NOTIFICATION_DURATION_MS),
            true,
        )
    }

    pub fn show_with(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
        auto_dismiss: bool,
    ) -> NotificationId {
        let notification = Notification {
            id: uuid::Uuid::new_v4().to_string(),
            message: message.into(),
            severity,
            duration,
            auto_dismiss,
        };
        let id = notification.id.clone();

        tracing::debug!(?severity, "Notification: {}", notification.message);

        if auto_dismiss {
            self.start_timer(&id, duration);
        }
        self.active.push(notification);

        id
    }

    fn start_timer(&mut self, id: &str, duration: Duration) {
        let Some(on_expire) = self.on_expire.clone() else {
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime, notification {} will not expire", id);
            return;
        };

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let expired_id = id.to_string();
        handle.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(duration) => on_expire(expired_id),
            }
        });

        self.timers.insert(id.to_string(), token);
    }

    /// Remove a notification and stop its timer. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: &str) -> bool {
        if let Some(token) = self.timers.remove(id) {
            token.cancel();
        }

        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != before
    }

    /// Dismiss the most recent notification
    pub fn dismiss_latest(&mut self) -> bool {
        match self.active.last().map(|n| n.id.clone()) {
            Some(id) => self.dismiss(&id),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for (_, token) in self.timers.drain() {
            token.cancel();
        }
        self.active.clear();
    }

    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Number of timers still pending
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("active", &self.active)
            .field("pending_timers", &self.timers.len())
            .field("has_expiry", &self.on_expire.is_some())
            .finish()
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        for token in self.timers.values() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn center_with_channel() -> (NotificationCenter, mpsc::UnboundedReceiver<NotificationId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let center = NotificationCenter::with_expiry(Arc::new(move |id| {
            let _ = tx.send(id);
        }));
        (center, rx)
    }

    #[test]
    fn test_show_appends_in_order_without_dedup() {
        let mut center = NotificationCenter::new();
        center.show("Saved", Severity::Success);
        center.show("Saved", Severity::Success);
        center.show("Careful", Severity::Info);

        let messages: Vec<&str> = center.active().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["Saved", "Saved", "Careful"]);
        assert_eq!(center.active()[0].duration, Duration::from_millis(3000));
        assert!(center.active()[0].auto_dismiss);
        assert_ne!(center.active()[0].id, center.active()[1].id);
    }

    #[test]
    fn test_dismiss_by_id() {
        let mut center = NotificationCenter::new();
        let first = center.show("one", Severity::Info);
        let second = center.show("two", Severity::Error);

        assert!(center.dismiss(&first));
        assert_eq!(center.len(), 1);
        assert_eq!(center.active()[0].id, second);

        // Second dismissal of the same id is a no-op
        assert!(!center.dismiss(&first));
        assert!(!center.dismiss("missing"));
        assert_eq!(center.len(), 1);
    }

    #[test]
    fn test_dismiss_latest_and_clear() {
        let mut center = NotificationCenter::new();
        center.show("one", Severity::Info);
        center.show("two", Severity::Info);

        assert!(center.dismiss_latest());
        assert_eq!(center.active()[0].message, "one");

        center.show("three", Severity::Info);
        center.clear();
        assert!(center.is_empty());
        assert!(!center.dismiss_latest());
    }

    #[test]
    fn test_no_timers_without_callback() {
        let mut center = NotificationCenter::new();
        center.show("stays", Severity::Info);
        assert_eq!(center.pending_timers(), 0);
    }

    #[test]
    fn test_with_expiry_starts_empty() {
        let (center, _rx) = center_with_channel();
        assert!(center.is_empty());
        assert_eq!(center.pending_timers(), 0);
        assert!(format!("{:?}", center).contains("has_expiry: true"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_after_duration() {
        let (mut center, mut rx) = center_with_channel();
        let id = center.show("Box added successfully!", Severity::Success);
        assert_eq!(center.pending_timers(), 1);

        let expired = rx.recv().await.unwrap();
        assert_eq!(expired, id);

        assert!(center.dismiss(&expired));
        assert!(center.is_empty());
        assert_eq!(center.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_early_dismiss_cancels_timer() {
        let (mut center, mut rx) = center_with_channel();
        let id = center.show("gone early", Severity::Info);
        assert!(center.dismiss(&id));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_are_independent() {
        let (mut center, mut rx) = center_with_channel();
        let slow = center.show_with("slow", Severity::Info, Duration::from_secs(5), true);
        let fast = center.show_with("fast", Severity::Info, Duration::from_secs(1), true);
        center.show_with("sticky", Severity::Error, Duration::from_secs(1), false);
        assert_eq!(center.pending_timers(), 2);

        assert_eq!(rx.recv().await.unwrap(), fast);
        center.dismiss(&fast);
        assert_eq!(rx.recv().await.unwrap(), slow);
        center.dismiss(&slow);

        assert_eq!(center.len(), 1);
        assert_eq!(center.active()[0].message, "sticky");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timers() {
        let (mut center, mut rx) = center_with_channel();
        center.show("one", Severity::Info);
        center.show("two", Severity::Info);
        drop(center);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }
}
