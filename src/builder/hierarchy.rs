//! Builder for constructing state hierarchies.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::core::{Hierarchy, State};
use crate::validation::{validate, Outline};
use std::collections::HashMap;
use stillwater::validation::Validation;

/// Builder for constructing hierarchies with a fluent API.
///
/// States may be added in any order; parents are resolved by id when
/// [`build`](Self::build) runs, and every structural defect is reported at
/// once.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::HierarchyBuilder;
/// use statecraft::state_enum;
///
/// state_enum! {
///     enum Player { Top, Stopped, Active, Playing, Paused }
/// }
///
/// let hierarchy = HierarchyBuilder::<Player, (), ()>::new(Player::Top, Player::Stopped)
///     .leaf(Player::Stopped, Player::Top)
///     .composite(Player::Active, Player::Top, Player::Playing)
///     .leaf(Player::Playing, Player::Active)
///     .leaf(Player::Paused, Player::Active)
///     .build()
///     .unwrap();
///
/// assert!(hierarchy.is_ancestor(Player::Active, Player::Paused));
/// ```
pub struct HierarchyBuilder<S: State, H, E> {
    top: StateBuilder<S, H, E>,
    states: Vec<StateBuilder<S, H, E>>,
}

impl<S: State, H: 'static, E: 'static> HierarchyBuilder<S, H, E> {
    /// Create a builder whose root is `top`, entering `initial` at start.
    pub fn new(top: S, initial: S) -> Self {
        Self::with_top(StateBuilder::top(top, initial))
    }

    /// Create a builder from a configured root state.
    pub fn with_top(top: StateBuilder<S, H, E>) -> Self {
        Self {
            top,
            states: Vec::new(),
        }
    }

    /// Add a configured state.
    pub fn state(mut self, state: StateBuilder<S, H, E>) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: Vec<StateBuilder<S, H, E>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Add a leaf state without hooks or event logic.
    pub fn leaf(self, id: S, parent: S) -> Self {
        self.state(StateBuilder::leaf(id, parent))
    }

    /// Add a composite state without hooks or event logic.
    pub fn composite(self, id: S, parent: S, initial: S) -> Self {
        self.state(StateBuilder::composite(id, parent, initial))
    }

    /// Validate the description and build the hierarchy.
    /// Returns every structural violation found if the description is invalid.
    pub fn build(self) -> Result<Hierarchy<S, H, E>, BuildError> {
        let mut builders = Vec::with_capacity(self.states.len() + 1);
        builders.push(self.top);
        builders.extend(self.states);

        let outlines: Vec<Outline<S>> = builders.iter().map(StateBuilder::outline).collect();

        if let Validation::Failure(errors) = validate(&outlines) {
            let violations: Vec<_> = errors.iter().cloned().collect();
            tracing::warn!(
                top = outlines[0].id.name(),
                violations = violations.len(),
                "rejected state hierarchy"
            );
            return Err(BuildError::InvalidHierarchy { violations });
        }

        let index: HashMap<S, usize> = outlines
            .iter()
            .enumerate()
            .map(|(i, outline)| (outline.id, i))
            .collect();

        let nodes = builders
            .into_iter()
            .map(|builder| builder.into_node(&index))
            .collect();

        let hierarchy = Hierarchy::from_nodes(nodes);
        tracing::debug!(
            top = hierarchy.top().name(),
            states = hierarchy.len(),
            "built state hierarchy"
        );

        Ok(hierarchy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RuleBuilder;
    use crate::validation::HierarchyViolation;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Top,
        Idle,
        Working,
        Fetching,
        Parsing,
        Missing,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Top => "Top",
                Self::Idle => "Idle",
                Self::Working => "Working",
                Self::Fetching => "Fetching",
                Self::Parsing => "Parsing",
                Self::Missing => "Missing",
            }
        }
    }

    use TestState::*;

    #[test]
    fn builder_accepts_states_in_any_order() {
        let hierarchy = HierarchyBuilder::<TestState, (), ()>::new(Top, Idle)
            .leaf(Fetching, Working)
            .composite(Working, Top, Fetching)
            .leaf(Parsing, Working)
            .leaf(Idle, Top)
            .build()
            .unwrap();

        assert_eq!(hierarchy.len(), 5);
        assert_eq!(hierarchy.parent(Fetching), Some(Working));
        assert_eq!(hierarchy.depth(Parsing), Some(2));
    }

    #[test]
    fn builder_reports_all_violations() {
        let result = HierarchyBuilder::<TestState, (), ()>::new(Top, Idle)
            .leaf(Idle, Top)
            .leaf(Fetching, Missing)
            .state(
                StateBuilder::leaf(Parsing, Top)
                    .on(RuleBuilder::new().any_event().to(Top))
                    .unwrap(),
            )
            .build();

        match result {
            Err(BuildError::InvalidHierarchy { violations }) => {
                assert_eq!(violations.len(), 2);
                assert!(violations.contains(&HierarchyViolation::DanglingParent {
                    state: "Fetching".to_string(),
                    parent: "Missing".to_string()
                }));
                assert!(violations.contains(&HierarchyViolation::TopTarget {
                    state: "Parsing".to_string()
                }));
            }
            other => panic!("Expected invalid hierarchy, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn builder_requires_top_children() {
        let result = HierarchyBuilder::<TestState, (), ()>::new(Top, Idle).build();

        assert!(matches!(result, Err(BuildError::InvalidHierarchy { .. })));
    }

    #[test]
    fn root_inside_its_own_child_is_rejected() {
        let result = HierarchyBuilder::<TestState, (), ()>::with_top(StateBuilder::composite(
            Top, Working, Working,
        ))
        .composite(Working, Top, Fetching)
        .leaf(Fetching, Working)
        .build();

        let error = result.unwrap_err();
        assert!(error.violations().contains(&HierarchyViolation::RootHasParent {
            state: "Top".to_string(),
            parent: "Working".to_string()
        }));
    }

    #[test]
    fn leaf_root_is_rejected() {
        let result =
            HierarchyBuilder::<TestState, (), ()>::with_top(StateBuilder::leaf(Top, Missing))
                .build();

        let error = result.unwrap_err();
        assert!(error.violations().contains(&HierarchyViolation::RootNotComposite {
            state: "Top".to_string()
        }));
        assert!(error.violations().contains(&HierarchyViolation::RootHasParent {
            state: "Top".to_string(),
            parent: "Missing".to_string()
        }));
    }

    #[test]
    fn second_top_is_rejected() {
        let result = HierarchyBuilder::<TestState, (), ()>::new(Top, Idle)
            .leaf(Idle, Top)
            .state(StateBuilder::top(Working, Fetching))
            .leaf(Fetching, Working)
            .build();

        let error = result.unwrap_err();
        assert_eq!(
            error.violations(),
            &[HierarchyViolation::ExtraRoot {
                state: "Working".to_string()
            }]
        );
    }
}
