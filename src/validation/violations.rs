//! Structural defects a hierarchy description can contain.

use thiserror::Error;

/// Errors found when validating a hierarchy description
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HierarchyViolation {
    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("State '{state}' has no parent but is not the root")]
    ExtraRoot { state: String },

    #[error("State '{state}' names undeclared parent '{parent}'")]
    DanglingParent { state: String, parent: String },

    #[error("State '{state}' names leaf state '{parent}' as its parent")]
    LeafParent { state: String, parent: String },

    #[error("Root state '{state}' names parent '{parent}'")]
    RootHasParent { state: String, parent: String },

    #[error("Root state '{state}' is not a composite")]
    RootNotComposite { state: String },

    #[error("State '{state}' does not reach the root through its parents")]
    Cycle { state: String },

    #[error("Composite state '{state}' has no children")]
    EmptyComposite { state: String },

    #[error("Initial state '{initial}' of '{state}' is not one of its descendants")]
    InitialNotDescendant { state: String, initial: String },

    #[error("Rule on '{state}' targets undeclared state '{target}'")]
    UnknownTarget { state: String, target: String },

    #[error("Rule on '{state}' targets the root state")]
    TopTarget { state: String },
}
