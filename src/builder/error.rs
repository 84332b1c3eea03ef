//! Build errors for hierarchy, state and rule builders.

use crate::validation::HierarchyViolation;
use thiserror::Error;

/// Errors that can occur when building hierarchies and rules.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Rule event matcher not specified. Call .event(predicate) before .build()")]
    MissingEventMatcher,

    #[error("Hierarchy is invalid: {}", summarize(.violations))]
    InvalidHierarchy { violations: Vec<HierarchyViolation> },
}

impl BuildError {
    /// Structural violations, empty for builder misuse.
    pub fn violations(&self) -> &[HierarchyViolation] {
        match self {
            BuildError::InvalidHierarchy { violations } => violations,
            BuildError::MissingEventMatcher => &[],
        }
    }
}

fn summarize(violations: &[HierarchyViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
