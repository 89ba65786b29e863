//! Auto-dismissing notifications
//!
//! Each notification gets its own dismiss timer on the timer host. Manual
//! dismissal cancels that timer; overflowing `max_visible` drops the oldest.

use crate::config::NotificationConfig;
use crate::{Result, StorefrontError};
use debounce::{TimerHost, TokioTimer};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::{Arc, Weak};
use std::time::{Duration, SystemTime};
use tracing::debug;
use ulid::Ulid;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
            NotificationKind::Danger => "danger",
        }
    }

    /// Alert style class used by the page templates
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "alert-success",
            NotificationKind::Info => "alert-info",
            NotificationKind::Warning => "alert-warning",
            NotificationKind::Danger => "alert-danger",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = StorefrontError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(NotificationKind::Success),
            "info" => Ok(NotificationKind::Info),
            "warning" => Ok(NotificationKind::Warning),
            "danger" | "error" => Ok(NotificationKind::Danger),
            _ => Err(StorefrontError::UnknownNotificationKind(s.to_string())),
        }
    }
}

/// A visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Ulid,
    pub kind: NotificationKind,
    pub message: String,
    /// Taken from the id's timestamp, so ordering by id orders by time
    pub created_at: SystemTime,
}

/// Notification stack with auto-dismiss
pub struct Notifier<H: TimerHost = TokioTimer> {
    inner: Arc<Inner<H>>,
}

struct Inner<H: TimerHost> {
    host: H,
    auto_dismiss: Duration,
    max_visible: usize,
    active: Mutex<Vec<Entry<H::Handle>>>,
}

struct Entry<T> {
    notification: Notification,
    timer: T,
}

impl Notifier<TokioTimer> {
    /// Create a notifier on the current tokio runtime
    pub fn new(config: &NotificationConfig) -> Result<Self> {
        Ok(Self::with_host(
            config.auto_dismiss()?,
            config.max_visible,
            TokioTimer::current()?,
        ))
    }
}

impl<H: TimerHost> Notifier<H> {
    pub fn with_host(auto_dismiss: Duration, max_visible: usize, host: H) -> Self {
        Self {
            inner: Arc::new(Inner {
                host,
                auto_dismiss,
                max_visible: max_visible.max(1),
                active: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Show a notification and schedule its dismissal
    pub fn show(&self, kind: NotificationKind, message: impl Into<String>) -> Notification {
        let id = Ulid::new();
        let notification = Notification {
            id,
            kind,
            message: message.into(),
            created_at: id.datetime(),
        };

        let id = notification.id;
        let weak: Weak<Inner<H>> = Arc::downgrade(&self.inner);

        // Hold the lock across scheduling so expiry can't run before the push
        let mut active = self.inner.active.lock();
        let timer = self.inner.host.schedule(
            self.inner.auto_dismiss,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.expire(id);
                }
            }),
        );

        active.push(Entry {
            notification: notification.clone(),
            timer,
        });

        while active.len() > self.inner.max_visible {
            let oldest = active.remove(0);
            debug!(id = %oldest.notification.id, "Dropping oldest notification");
            self.inner.host.cancel(oldest.timer);
        }

        debug!(id = %id, kind = kind.as_str(), "Showing notification");
        notification
    }

    /// Dismiss a notification before its timer runs out
    pub fn dismiss(&self, id: Ulid) -> bool {
        let mut active = self.inner.active.lock();
        match active.iter().position(|e| e.notification.id == id) {
            Some(index) => {
                let entry = active.remove(index);
                self.inner.host.cancel(entry.timer);
                true
            }
            None => false,
        }
    }

    /// Visible notifications, oldest first
    pub fn active(&self) -> Vec<Notification> {
        self.inner
            .active
            .lock()
            .iter()
            .map(|e| e.notification.clone())
            .collect()
    }

    /// Dismiss everything
    pub fn clear(&self) {
        let drained: Vec<_> = self.inner.active.lock().drain(..).collect();
        for entry in drained {
            self.inner.host.cancel(entry.timer);
        }
    }
}

impl<H: TimerHost> Inner<H> {
    fn expire(&self, id: Ulid) {
        let mut active = self.active.lock();
        if let Some(index) = active.iter().position(|e| e.notification.id == id) {
            active.remove(index);
            debug!(id = %id, "Notification auto-dismissed");
        }
    }
}

impl<H: TimerHost> Drop for Notifier<H> {
    fn drop(&mut self) {
        self.clear();
    }
}
