/// Severity of a transient, user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Neutral information, e.g. that the bundled catalog is shown.
    Info,
    /// Something degraded that the user may want to fix.
    Warning,
}

/// A short notice for the presentation layer, separate from the catalog
/// session's `error` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub notification_type: NotificationType,
    pub message: String,
}

impl NotificationMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Warning,
            message: message.into(),
        }
    }
}
