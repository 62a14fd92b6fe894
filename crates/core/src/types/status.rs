//! Role and order status enums.

use serde::{Deserialize, Serialize};

/// Authorization role for a user account.
///
/// The only authorization axis in the system: `admin` manages the catalog
/// and order statuses, `user` browses and purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    /// String form as stored in the database and embedded in tokens.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Lifecycle status of an order.
///
/// Serializes to the four literal strings the clients display
/// (`"Order Placed"`, `"Out For Delivery"`, `"Delivered"`, `"Canceled"`).
///
/// Transitions form a small state machine:
///
/// ```text
/// Order Placed ──> Out For Delivery ──> Delivered
///      │                  │
///      └────> Canceled <──┘
/// ```
///
/// `Delivered` and `Canceled` are terminal. Backward edges and
/// self-transitions are rejected by [`OrderStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Order Placed")]
    Placed,
    #[serde(rename = "Out For Delivery")]
    OutForDelivery,
    #[serde(rename = "Delivered")]
    Delivered,
    #[serde(rename = "Canceled")]
    Canceled,
}

impl OrderStatus {
    /// String form as stored in the database and shown to clients.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Placed => "Order Placed",
            Self::OutForDelivery => "Out For Delivery",
            Self::Delivered => "Delivered",
            Self::Canceled => "Canceled",
        }
    }

    /// Whether an order in this status may move to `next`.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Placed, Self::OutForDelivery | Self::Canceled)
                | (Self::OutForDelivery, Self::Delivered | Self::Canceled)
        )
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Canceled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Order Placed" => Ok(Self::Placed),
            "Out For Delivery" => Ok(Self::OutForDelivery),
            "Delivered" => Ok(Self::Delivered),
            "Canceled" => Ok(Self::Canceled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::User] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Placed,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Canceled,
        ] {
            assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(OrderStatus::from_str("Shipped").is_err());
    }

    #[test]
    fn test_status_serde_uses_literal_strings() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"Out For Delivery\"");

        let back: OrderStatus = serde_json::from_str("\"Order Placed\"").unwrap();
        assert_eq!(back, OrderStatus::Placed);
    }

    #[test]
    fn test_legal_transitions() {
        assert!(OrderStatus::Placed.can_transition_to(OrderStatus::OutForDelivery));
        assert!(OrderStatus::Placed.can_transition_to(OrderStatus::Canceled));
        assert!(OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Delivered));
        assert!(OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Canceled));
    }

    #[test]
    fn test_illegal_transitions() {
        // Backward
        assert!(!OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Placed));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::OutForDelivery));
        // Out of terminal states
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Canceled));
        assert!(!OrderStatus::Canceled.can_transition_to(OrderStatus::Placed));
        // Self-transitions
        for status in [
            OrderStatus::Placed,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Canceled,
        ] {
            assert!(!status.can_transition_to(status));
        }
        // Skipping a step
        assert!(!OrderStatus::Placed.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Placed.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
    }
}
