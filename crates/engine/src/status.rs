//! The supply lifecycle state machine.
//!
//! A supply starts in `in_processing` when the company submits it. The
//! supplier then either accepts the request (`assembled`) or rejects it
//! (`cancelled`). Accepted supplies advance one fulfillment step at a time:
//! `assembled -> in_delivery -> delivered -> adopted`. `adopted` and
//! `cancelled` are terminal.
//!
//! Accepting/rejecting ([`decide`]) and advancing fulfillment ([`advance`])
//! are deliberately separate operations: the former answers the request, the
//! latter tracks progress of an already-accepted order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Lifecycle state of a supply order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyStatus {
    InProcessing,
    Assembled,
    InDelivery,
    Delivered,
    Adopted,
    Cancelled,
}

impl SupplyStatus {
    pub const ALL: [SupplyStatus; 6] = [
        SupplyStatus::InProcessing,
        SupplyStatus::Assembled,
        SupplyStatus::InDelivery,
        SupplyStatus::Delivered,
        SupplyStatus::Adopted,
        SupplyStatus::Cancelled,
    ];

    /// Returns the canonical status string used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProcessing => "in_processing",
            Self::Assembled => "assembled",
            Self::InDelivery => "in_delivery",
            Self::Delivered => "delivered",
            Self::Adopted => "adopted",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Adopted | Self::Cancelled)
    }

    /// `true` while the supplier has not yet answered the request.
    ///
    /// Suppliers list these separately as "delivery requests"; everything
    /// else is an active delivery.
    pub fn is_wait_confirm(self) -> bool {
        matches!(self, Self::InProcessing)
    }

    /// The next fulfillment step once the order has been accepted.
    pub fn fulfillment_successor(self) -> Option<SupplyStatus> {
        match self {
            Self::Assembled => Some(Self::InDelivery),
            Self::InDelivery => Some(Self::Delivered),
            Self::Delivered => Some(Self::Adopted),
            _ => None,
        }
    }
}

impl fmt::Display for SupplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the contract triggers a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionActor {
    Company,
    Supplier,
}

/// The supplier's answer to a pending supply request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    /// Status the supply ends up in when this decision is applied.
    pub fn target(self) -> SupplyStatus {
        match self {
            Self::Accept => SupplyStatus::Assembled,
            Self::Reject => SupplyStatus::Cancelled,
        }
    }
}

/// Applies an accept/reject decision to a supply.
///
/// Only legal while the supply is still waiting for confirmation; any other
/// state (including the terminal ones) yields `InvalidTransition`.
pub fn decide(from: SupplyStatus, decision: Decision) -> ResultEngine<SupplyStatus> {
    if from != SupplyStatus::InProcessing {
        return Err(EngineError::InvalidTransition {
            from,
            to: decision.target(),
        });
    }
    Ok(decision.target())
}

/// Advances fulfillment by exactly one step.
///
/// `to` must be the immediate successor of `from` in the fulfillment chain;
/// skipping, repeating or moving backwards yields `InvalidTransition`.
pub fn advance(from: SupplyStatus, to: SupplyStatus) -> ResultEngine<SupplyStatus> {
    match from.fulfillment_successor() {
        Some(next) if next == to => Ok(to),
        _ => Err(EngineError::InvalidTransition { from, to }),
    }
}

/// The role required to move a supply from `from` to `to`.
///
/// Returns `None` when the pair is not a legal transition at all. Every
/// post-creation transition belongs to the supplier, including the final
/// `delivered -> adopted` confirmation.
pub fn transition_actor(from: SupplyStatus, to: SupplyStatus) -> Option<TransitionActor> {
    match (from, to) {
        (SupplyStatus::InProcessing, SupplyStatus::Assembled)
        | (SupplyStatus::InProcessing, SupplyStatus::Cancelled) => Some(TransitionActor::Supplier),
        _ => from
            .fulfillment_successor()
            .filter(|next| *next == to)
            .map(|_| TransitionActor::Supplier),
    }
}
