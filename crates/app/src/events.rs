//! Presentation events.

use gelateria::status::OrderStatus;

/// Notifications pushed to the presentation layer. The rendering side
/// subscribes and redraws; nothing here mutates storefront state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorefrontEvent {
    /// Transient toast message.
    Toast(String),

    /// The order advanced to a new stage.
    StatusChanged(OrderStatus),
}

impl StorefrontEvent {
    /// One-line display text for the event.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Toast(message) => message,
            Self::StatusChanged(status) => status.announcement(),
        }
    }
}
