//! Running machines.
//!
//! This module is the imperative shell around the pure core: it owns the
//! host data and the current leaf, dispatches events rootward through the
//! hierarchy, and executes transition plans by calling the exit hooks, the
//! transition action and the entry hooks in order.
//!
//! # Key Concepts
//!
//! - **Machine**: one running instance of a shared hierarchy
//! - **Dispatch**: innermost claiming state wins, unclaimed events are dropped at Top
//! - **Run-to-completion**: a dispatch returns only after any transition finished

mod config;
mod machine;
mod outcome;

pub use config::{MachineConfig, DEFAULT_HISTORY_LIMIT};
pub use machine::Machine;
pub use outcome::DispatchOutcome;
