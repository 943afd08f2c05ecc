//! Order status vocabulary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The status of a cash-on-delivery order.
///
/// Typical progression:
/// ```text
/// Pending ──► Confirmed / Processing ──► Ordered on Markaz / Shipped ──► Delivered
///    │               │                            │
///    └───────────────┴────────────────────────────┴──► Cancelled
/// ```
///
/// The admin back office may set any status from any other; the progression
/// above is descriptive only and is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Submitted by the customer, not yet confirmed by phone.
    #[default]
    Pending,

    /// Confirmed with the customer.
    Confirmed,

    /// Being packed or sourced.
    Processing,

    /// Relayed to the third-party marketplace for fulfilment.
    #[serde(rename = "Ordered on Markaz")]
    OrderedOnMarketplace,

    /// Handed to the courier.
    Shipped,

    /// Delivered and paid in cash (terminal).
    Delivered,

    /// Cancelled (terminal).
    Cancelled,
}

/// Returned when parsing a status string that is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl OrderStatus {
    /// Every status, in the order the back office lists them.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::OrderedOnMarketplace,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Returns true if cancellation is a natural next step from this status.
    pub fn can_cancel(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::OrderedOnMarketplace => "Ordered on Markaz",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
