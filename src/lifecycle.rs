//! Store approval and order fulfillment state machines.
//!
//! Both enums are stored as short strings and are the only source of truth for an
//! entity's state. Transition checks here are pure; services apply them inside a
//! locked transaction.

use std::{fmt, str::FromStr};

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum StoreState {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "removed")]
    Removed,
}

/// Admin actions that move a store between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    Approve,
    Reject,
    Remove,
}

impl StoreAction {
    pub fn target(self) -> StoreState {
        match self {
            StoreAction::Approve => StoreState::Approved,
            StoreAction::Reject => StoreState::Rejected,
            StoreAction::Remove => StoreState::Removed,
        }
    }
}

impl StoreState {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreState::Pending => "pending",
            StoreState::Approved => "approved",
            StoreState::Rejected => "rejected",
            StoreState::Removed => "removed",
        }
    }

    pub fn allows(self, action: StoreAction) -> bool {
        matches!(
            (self, action),
            (StoreState::Pending, StoreAction::Approve)
                | (StoreState::Pending, StoreAction::Reject)
                | (StoreState::Approved, StoreAction::Remove)
                | (StoreState::Rejected, StoreAction::Remove)
        )
    }

    /// Removed stores are kept for audit but never listed.
    pub fn is_listed(self) -> bool {
        self != StoreState::Removed
    }
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "preparing")]
    Preparing,
    #[sea_orm(string_value = "out_for_delivery")]
    OutForDelivery,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Position in the forward chain; `None` for cancellation.
    fn step(self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Confirmed => Some(1),
            OrderStatus::Preparing => Some(2),
            OrderStatus::OutForDelivery => Some(3),
            OrderStatus::Delivered => Some(4),
            OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: OrderStatus, policy: TransitionPolicy) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == OrderStatus::Cancelled {
            return true;
        }
        match (self.step(), next.step()) {
            (Some(from), Some(to)) => match policy {
                TransitionPolicy::Forward => to > from,
                TransitionPolicy::Sequential => to == from + 1,
            },
            _ => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "cash_on_delivery")]
    #[serde(alias = "Cash on Delivery")]
    CashOnDelivery,
    #[sea_orm(string_value = "online")]
    Online,
}

/// Which orders count towards a store's revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevenuePolicy {
    #[default]
    DeliveredOnly,
    NonCancelled,
}

impl RevenuePolicy {
    pub fn counts(self, status: OrderStatus) -> bool {
        match self {
            RevenuePolicy::DeliveredOnly => status == OrderStatus::Delivered,
            RevenuePolicy::NonCancelled => status != OrderStatus::Cancelled,
        }
    }
}

impl FromStr for RevenuePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "delivered_only" => Ok(RevenuePolicy::DeliveredOnly),
            "non_cancelled" => Ok(RevenuePolicy::NonCancelled),
            other => Err(anyhow::anyhow!("unknown revenue policy `{other}`")),
        }
    }
}

/// Whether order status may skip forward steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    #[default]
    Forward,
    Sequential,
}

impl FromStr for TransitionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "forward" => Ok(TransitionPolicy::Forward),
            "sequential" => Ok(TransitionPolicy::Sequential),
            other => Err(anyhow::anyhow!("unknown order transition policy `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnginePolicy {
    pub revenue: RevenuePolicy,
    pub transitions: TransitionPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ORDER: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn store_transitions_follow_the_approval_table() {
        use StoreAction::*;
        assert!(StoreState::Pending.allows(Approve));
        assert!(StoreState::Pending.allows(Reject));
        assert!(!StoreState::Pending.allows(Remove));
        assert!(!StoreState::Approved.allows(Approve));
        assert!(!StoreState::Approved.allows(Reject));
        assert!(StoreState::Approved.allows(Remove));
        assert!(!StoreState::Rejected.allows(Approve));
        assert!(StoreState::Rejected.allows(Remove));
        for action in [Approve, Reject, Remove] {
            assert!(!StoreState::Removed.allows(action));
        }
    }

    #[test]
    fn terminal_orders_never_move() {
        for policy in [TransitionPolicy::Forward, TransitionPolicy::Sequential] {
            for next in ALL_ORDER {
                assert!(!OrderStatus::Delivered.can_transition_to(next, policy));
                assert!(!OrderStatus::Cancelled.can_transition_to(next, policy));
            }
        }
    }

    #[test]
    fn forward_policy_allows_jumps_but_not_regressions() {
        let p = TransitionPolicy::Forward;
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::OutForDelivery, p));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Delivered, p));
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Confirmed, p));
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Preparing, p));
    }

    #[test]
    fn sequential_policy_allows_one_hop_or_cancel() {
        let p = TransitionPolicy::Sequential;
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed, p));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Preparing, p));
        assert!(OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Delivered, p));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Cancelled, p));
    }

    #[test]
    fn revenue_policy_selects_counted_statuses() {
        let counted: Vec<_> = ALL_ORDER
            .into_iter()
            .filter(|s| RevenuePolicy::DeliveredOnly.counts(*s))
            .collect();
        assert_eq!(counted, vec![OrderStatus::Delivered]);
        assert!(RevenuePolicy::NonCancelled.counts(OrderStatus::Pending));
        assert!(!RevenuePolicy::NonCancelled.counts(OrderStatus::Cancelled));
    }

    #[test]
    fn policies_parse_from_config_strings() {
        assert_eq!(
            "non_cancelled".parse::<RevenuePolicy>().unwrap(),
            RevenuePolicy::NonCancelled
        );
        assert_eq!(
            " sequential ".parse::<TransitionPolicy>().unwrap(),
            TransitionPolicy::Sequential
        );
        assert!("all".parse::<RevenuePolicy>().is_err());
    }

    #[test]
    fn payment_method_accepts_display_alias() {
        let m: PaymentMethod = serde_json::from_str("\"Cash on Delivery\"").unwrap();
        assert_eq!(m, PaymentMethod::CashOnDelivery);
        let m: PaymentMethod = serde_json::from_str("\"online\"").unwrap();
        assert_eq!(m, PaymentMethod::Online);
    }
}
