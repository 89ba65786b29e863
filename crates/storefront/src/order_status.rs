//! Order status flow

use crate::StorefrontError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Forward flow; `Cancelled` sits outside it
const FLOW: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    fn flow_index(&self) -> Option<usize> {
        FLOW.iter().position(|s| s == self)
    }

    /// Whether a seller may move an order from `self` to `next`
    ///
    /// Within the flow, an order may stay put or move forward (skipping
    /// steps is allowed) but never backwards. Anything may leave a status
    /// outside the flow; nothing in the flow may enter one.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self.flow_index(), next.flow_index()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(current), Some(target)) => target >= current,
        }
    }

    /// Question put to the seller before applying a change
    pub fn confirmation_prompt(order: &str, from: OrderStatus, to: OrderStatus) -> String {
        format!(
            "Are you sure you want to change order {} from {} to {}?",
            order,
            from.label(),
            to.label()
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StorefrontError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_parse_roundtrip() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
        assert_eq!(" Shipped ".parse::<OrderStatus>().unwrap(), Shipped);
        assert!(matches!(
            "lost".parse::<OrderStatus>(),
            Err(StorefrontError::UnknownStatus(s)) if s == "lost"
        ));
    }

    #[test]
    fn test_forward_moves_allowed() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Delivered));
        assert!(Shipped.can_transition_to(Shipped));
    }

    #[test]
    fn test_backward_moves_refused() {
        assert!(!Delivered.can_transition_to(Shipped));
        assert!(!Confirmed.can_transition_to(Pending));
    }

    #[test]
    fn test_cancelled_outside_flow() {
        assert!(!Pending.can_transition_to(Cancelled));
        assert!(!Processing.can_transition_to(Cancelled));
        assert!(Cancelled.can_transition_to(Pending));
        assert!(Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn test_prompt_uses_labels() {
        assert_eq!(
            OrderStatus::confirmation_prompt("ORD-1042", Pending, Shipped),
            "Are you sure you want to change order ORD-1042 from Pending to Shipped?"
        );
    }

    #[test]
    fn test_serde_lowercase() {
        #[derive(Deserialize)]
        struct Row {
            status: OrderStatus,
        }
        let row: Row = toml::from_str("status = \"processing\"").unwrap();
        assert_eq!(row.status, Processing);
    }
}
