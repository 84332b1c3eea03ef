//! Structural validation of hierarchy descriptions.
//!
//! A malformed hierarchy (dangling parent, cycle, unreachable target) is an
//! authoring defect, so it is rejected before any machine runs. Checks use
//! Stillwater's `Validation` type to report ALL violations in one pass
//! instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use statecraft::state_enum;
//! use statecraft::validation::{validate, HierarchyViolation, Outline};
//!
//! state_enum! {
//!     enum S { Top, A, Ghost }
//! }
//!
//! let outlines = vec![
//!     Outline { id: S::Top, parent: None, initial: Some(S::A), targets: vec![] },
//!     Outline { id: S::A, parent: Some(S::Ghost), initial: None, targets: vec![] },
//! ];
//!
//! assert!(validate(&outlines).is_failure());
//! ```

pub mod rules;
pub mod violations;

pub use rules::{validate, Check, Outline};
pub use violations::HierarchyViolation;
