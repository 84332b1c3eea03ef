//! Core hierarchy types and logic.
//!
//! This module contains the pure part of the engine:
//! - State identifiers via the `State` trait
//! - The validated state tree and its ancestor queries
//! - Transition planning (exit/entry sequences) without side effects
//! - Guards, rules and reactions that make up a state's event logic
//! - Bounded transition history

mod guard;
mod hierarchy;
mod history;
mod plan;
mod reaction;
mod rule;
mod state;

pub(crate) use hierarchy::{Kind, Node};

pub use guard::Guard;
pub use hierarchy::{Ancestors, Hierarchy};
pub use history::{TransitionHistory, TransitionRecord};
pub use plan::{TransitionError, TransitionPlan};
pub use reaction::{Action, Handler, Hook, Reaction};
pub use rule::{EventMatcher, Rule};
pub use state::State;
