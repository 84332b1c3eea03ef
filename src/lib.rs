//! Statecraft: a hierarchical state machine engine
//!
//! Statecraft runs UML-style statecharts: states nest inside composite
//! states, composites share entry/exit hooks and default event handling with
//! everything below them, and moving between states at different depths
//! exits and enters exactly the states between the current leaf and the
//! target's branch.
//!
//! # Core Concepts
//!
//! - **Hierarchy**: an immutable, validated tree of state descriptors
//! - **Leaf states**: the only states a machine can be "in"
//! - **Composite states**: behaviour shared by a group of states, never current
//! - **Rules and handlers**: per-state event logic, consulted innermost first
//! - **Machine**: host data plus the current leaf, driven by `dispatch`
//!
//! # Example
//!
//! ```rust
//! use statecraft::builder::{HierarchyBuilder, RuleBuilder, StateBuilder};
//! use statecraft::runtime::Machine;
//! use statecraft::state_enum;
//!
//! state_enum! {
//!     enum S { Top, A, A1, A2, B }
//! }
//!
//! #[derive(Debug, PartialEq)]
//! enum Ev { Go }
//!
//! #[derive(Default)]
//! struct Log(Vec<&'static str>);
//!
//! let a1 = StateBuilder::leaf(S::A1, S::A)
//!     .exit(|log: &mut Log| log.0.push("exit A1"))
//!     .on(RuleBuilder::new().event(|e: &Ev| *e == Ev::Go).to(S::B))
//!     .unwrap();
//!
//! let hierarchy = HierarchyBuilder::new(S::Top, S::A)
//!     .state(StateBuilder::composite(S::A, S::Top, S::A1).exit(|log: &mut Log| log.0.push("exit A")))
//!     .state(a1)
//!     .leaf(S::A2, S::A)
//!     .state(StateBuilder::leaf(S::B, S::Top).entry(|log: &mut Log| log.0.push("entry B")))
//!     .build()
//!     .unwrap();
//!
//! let mut machine = Machine::new(hierarchy, Log::default());
//! machine.dispatch(&Ev::Go).unwrap();
//!
//! assert_eq!(machine.current_state(), S::B);
//! assert_eq!(machine.host().0, vec!["exit A1", "exit A", "entry B"]);
//! ```

pub mod builder;
pub mod core;
pub mod runtime;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, HierarchyBuilder, RuleBuilder, StateBuilder};
pub use crate::core::{Guard, Hierarchy, Reaction, State, TransitionError, TransitionPlan};
pub use runtime::{DispatchOutcome, Machine, MachineConfig};
