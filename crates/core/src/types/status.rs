//! Status values: order statuses and notification kinds.

use serde::{Deserialize, Serialize};

/// Order status as understood by the server.
///
/// The set of valid statuses (and which transitions are allowed) is owned by
/// the server, so this is an open string. The well-known values are provided
/// as constants for hosts that want to offer a picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    pub const PENDING: &'static str = "pending";
    pub const PAID: &'static str = "paid";
    pub const SHIPPED: &'static str = "shipped";
    pub const DELIVERED: &'static str = "delivered";
    pub const REFUND_REQUESTED: &'static str = "refund_requested";
    pub const REFUNDED: &'static str = "refunded";
    pub const CANCELLED: &'static str = "cancelled";

    /// Status names the server is known to accept, in lifecycle order.
    pub const KNOWN: [&'static str; 7] = [
        Self::PENDING,
        Self::PAID,
        Self::SHIPPED,
        Self::DELIVERED,
        Self::REFUND_REQUESTED,
        Self::REFUNDED,
        Self::CANCELLED,
    ];

    /// Create a status from any string value. Not validated.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// Get the raw status string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of [`Self::KNOWN`].
    #[must_use]
    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderStatus {
    fn from(status: &str) -> Self {
        Self::new(status)
    }
}

/// Kind of a transient notification banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    /// Contextual alert class applied to the banner.
    #[must_use]
    pub const fn alert_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Error => "alert-danger",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            _ => Err(format!("invalid notification kind: {s}")),
        }
    }
}

/// A message shown to the user as a transient banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    /// A success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    /// An error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}
