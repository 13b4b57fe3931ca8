//! Toast notifications.
//!
//! Stores push toasts onto a shared queue; whatever renders them pops
//! them off in order.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Default duration for toast notifications.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

/// Default maximum number of queued toasts.
pub const DEFAULT_TOAST_CAPACITY: usize = 32;

/// Severity of a toast, used by the renderer to pick an accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
///
/// # Example
///
/// ```
/// use starterkit::toast::{Toast, ToastQueue};
///
/// let toasts = ToastQueue::new();
/// toasts.push(Toast::error("Connection failed"));
/// toasts.success("Profile saved");
/// assert_eq!(toasts.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    /// How long to show the toast.
    pub duration: Duration,
}

impl Toast {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    /// Set a custom duration for this toast.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl From<String> for Toast {
    fn from(message: String) -> Self {
        Toast::info(message)
    }
}

impl From<&str> for Toast {
    fn from(message: &str) -> Self {
        Toast::info(message)
    }
}

/// Bounded FIFO of pending toasts. Cheap to clone; clones share the queue.
///
/// Pushing onto a full queue drops the oldest toast.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    messages: Arc<Mutex<VecDeque<Toast>>>,
    capacity: usize,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TOAST_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    fn messages_mut(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a toast.
    pub fn push(&self, toast: impl Into<Toast>) {
        let mut messages = self.messages_mut();
        while messages.len() >= self.capacity {
            if let Some(dropped) = messages.pop_front() {
                log::debug!("toast queue full, dropping: {}", dropped.message);
            }
        }
        messages.push_back(toast.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(Toast::info(message));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Toast::success(message));
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(Toast::warning(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Toast::error(message));
    }

    /// Pop the oldest toast.
    pub fn pop(&self) -> Option<Toast> {
        self.messages_mut().pop_front()
    }

    /// Take every queued toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        self.messages_mut().drain(..).collect()
    }

    /// Copy of the queued toasts, oldest first.
    pub fn messages(&self) -> Vec<Toast> {
        self.messages_mut().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages_mut().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages_mut().is_empty()
    }

    pub fn clear(&self) {
        self.messages_mut().clear();
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_pop_in_order() {
        let toasts = ToastQueue::new();
        toasts.error("first");
        toasts.success("second");

        let first = toasts.pop().unwrap();
        assert_eq!(first.level, ToastLevel::Error);
        assert_eq!(first.message, "first");
        assert_eq!(toasts.pop().unwrap().level, ToastLevel::Success);
        assert!(toasts.pop().is_none());
    }

    #[test]
    fn test_full_queue_drops_oldest() {
        let toasts = ToastQueue::with_capacity(2);
        toasts.info("a");
        toasts.info("b");
        toasts.info("c");

        let messages: Vec<String> = toasts.drain().into_iter().map(|t| t.message).collect();
        assert_eq!(messages, vec!["b", "c"]);
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_clones_share_queue() {
        let toasts = ToastQueue::new();
        let other = toasts.clone();
        other.warning("shared");
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.messages()[0].message, "shared");
    }

    #[test]
    fn test_from_str_is_info_with_default_duration() {
        let toast = Toast::from("hello");
        assert_eq!(toast.level, ToastLevel::Info);
        assert_eq!(toast.duration, DEFAULT_TOAST_DURATION);

        let toast = toast.with_duration(Duration::from_secs(1));
        assert_eq!(toast.duration, Duration::from_secs(1));
    }
}
