//! User-visible cart notices.
//!
//! The cart store never returns typed errors from its operations. Failures and
//! stock rejections are reported through a [`Notifier`] instead, which the
//! embedding wires to whatever shows messages to the user.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// A user-visible message emitted by the cart store.
///
/// Every notice is error severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// Requested quantity exceeds available stock.
    InsufficientStock,
    /// Adding a product failed.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Changing a product's quantity failed.
    UpdateFailed,
    /// Clearing the persisted cart failed.
    ClearFailed,
}

impl Notice {
    /// Message shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InsufficientStock => "Requested quantity is out of stock",
            Self::AddFailed => "Could not add the product to the cart",
            Self::RemoveFailed => "Could not remove the product from the cart",
            Self::UpdateFailed => "Could not change the product quantity",
            Self::ClearFailed => "Could not clear the cart",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Sink for user-visible notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Emits notices as `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::error!(notice = ?notice, "{}", notice.message());
    }
}

/// Records notices in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices recorded so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_display_uses_message() {
        assert_eq!(
            Notice::InsufficientStock.to_string(),
            "Requested quantity is out of stock"
        );
        assert_eq!(Notice::RemoveFailed.to_string(), Notice::RemoveFailed.message());
    }

    #[test]
    fn test_memory_notifier_clones_share_log() {
        let notifier = MemoryNotifier::new();
        let handle = notifier.clone();

        notifier.notify(Notice::AddFailed);
        notifier.notify(Notice::InsufficientStock);

        assert_eq!(
            handle.notices(),
            vec![Notice::AddFailed, Notice::InsufficientStock]
        );
        assert_eq!(notifier.notices(), handle.notices());
    }
}
