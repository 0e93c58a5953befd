//! Domain core of the supply dashboard.
//!
//! Everything here is pure: the role/permission model, the supply status
//! state machine, money arithmetic and input validation. Network and
//! persistence concerns live in the `client` crate.

pub use error::EngineError;
pub use money::Money;
pub use roles::{Capability, OrganizerRole, Role, UserRank};
pub use status::{
    Decision, SupplyStatus, TransitionActor, advance, decide, transition_actor,
};
pub use supply::{LineItem, SupplyDraft, SupplyOrder, total_price};

mod error;
mod money;
mod roles;
mod status;
mod supply;
pub mod validation;

type ResultEngine<T> = Result<T, EngineError>;
