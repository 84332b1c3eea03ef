//! Pure computation of the exit/entry sequence of a transition.
//!
//! Planning touches no host data: it only walks the tree. The runtime
//! executes a plan by calling the hooks in the order given here.

use super::hierarchy::{Hierarchy, Kind, TOP};
use super::state::State;
use thiserror::Error;

/// Errors that can occur when planning a transition
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("State '{state}' is not part of the hierarchy")]
    UnknownState { state: String },

    #[error("Transition from '{source_state}' targets the root state")]
    TopTarget { source_state: String },

    #[error("Current state '{state}' is not a leaf")]
    NotALeaf { state: String },

    #[error("Source '{source_state}' is not active while '{current}' is current")]
    SourceNotActive {
        source_state: String,
        current: String,
    },
}

/// Ordered hook calls for one transition.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionPlan<S: State> {
    /// States to exit, innermost first
    pub exits: Vec<S>,
    /// States to enter, outermost first, including the initial chain
    pub entries: Vec<S>,
    /// Innermost state that stays active; `None` only for machine start
    pub boundary: Option<S>,
    /// Declared destination
    pub target: S,
    /// Leaf that becomes current
    pub leaf: S,
}

impl<S: State, H, E> Hierarchy<S, H, E> {
    /// Plan a transition declared by `source` towards `target` while
    /// `current` is the active leaf.
    ///
    /// The boundary is the deepest state that is a proper ancestor of
    /// `target` and an ancestor-or-self of `source`, i.e.
    /// `lca(source, parent(target))`. Everything strictly below it on the
    /// current branch is exited, everything strictly below it on the target
    /// branch is entered, then composite targets are resolved through their
    /// default initial states down to a leaf.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statecraft::builder::HierarchyBuilder;
    /// use statecraft::state_enum;
    ///
    /// state_enum! {
    ///     enum S { Top, A, A1, A2, B }
    /// }
    ///
    /// let h = HierarchyBuilder::<S, (), ()>::new(S::Top, S::A)
    ///     .composite(S::A, S::Top, S::A1)
    ///     .leaf(S::A1, S::A)
    ///     .leaf(S::A2, S::A)
    ///     .leaf(S::B, S::Top)
    ///     .build()
    ///     .unwrap();
    ///
    /// let plan = h.plan(S::A1, S::A1, S::B).unwrap();
    /// assert_eq!(plan.exits, vec![S::A1, S::A]);
    /// assert_eq!(plan.entries, vec![S::B]);
    ///
    /// let plan = h.plan(S::A1, S::A1, S::A2).unwrap();
    /// assert_eq!(plan.exits, vec![S::A1]);
    /// assert_eq!(plan.entries, vec![S::A2]);
    /// ```
    pub fn plan(&self, current: S, source: S, target: S) -> Result<TransitionPlan<S>, TransitionError> {
        let current_idx = self.require(current)?;
        let source_idx = self.require(source)?;
        let target_idx = self.require(target)?;

        if self.node(current_idx).kind != Kind::Leaf {
            return Err(TransitionError::NotALeaf {
                state: current.name().to_string(),
            });
        }

        if source_idx != current_idx && !self.is_ancestor_idx(source_idx, current_idx) {
            return Err(TransitionError::SourceNotActive {
                source_state: source.name().to_string(),
                current: current.name().to_string(),
            });
        }

        let target_parent = self
            .node(target_idx)
            .parent
            .ok_or_else(|| TransitionError::TopTarget {
                source_state: source.name().to_string(),
            })?;

        let boundary = self.lca_idx(source_idx, target_parent);

        let mut exits = Vec::new();
        let mut cursor = current_idx;
        while cursor != boundary {
            exits.push(self.node(cursor).id);
            cursor = self.node(cursor).parent.unwrap_or(TOP);
        }

        let mut entries = self.path_below(boundary, target_idx);
        let leaf = self.resolve_initial(target_idx, &mut entries);

        Ok(TransitionPlan {
            exits,
            entries,
            boundary: Some(self.node(boundary).id),
            target,
            leaf: self.node(leaf).id,
        })
    }

    /// Plan machine start: enter Top, then follow default initial states.
    pub fn initial_plan(&self) -> TransitionPlan<S> {
        let mut entries = vec![self.node(TOP).id];
        let leaf = self.resolve_initial(TOP, &mut entries);

        TransitionPlan {
            exits: Vec::new(),
            entries,
            boundary: None,
            target: self.node(TOP).id,
            leaf: self.node(leaf).id,
        }
    }

    fn require(&self, state: S) -> Result<usize, TransitionError> {
        self.idx(state).ok_or_else(|| TransitionError::UnknownState {
            state: state.name().to_string(),
        })
    }

    /// States strictly below `ancestor` down to and including `descendant`,
    /// outermost first.
    fn path_below(&self, ancestor: usize, descendant: usize) -> Vec<S> {
        let mut path = Vec::new();
        let mut cursor = descendant;
        while cursor != ancestor {
            path.push(self.node(cursor).id);
            match self.node(cursor).parent {
                Some(parent) => cursor = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Follow default initial states from `from` until a leaf, appending
    /// every state entered on the way.
    fn resolve_initial(&self, from: usize, entries: &mut Vec<S>) -> usize {
        let mut cursor = from;
        while let Kind::Composite { initial } = self.node(cursor).kind {
            entries.extend(self.path_below(cursor, initial));
            cursor = initial;
        }
        cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::HierarchyBuilder;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Top,
        A,
        A1,
        A2,
        B,
        C,
        C1,
        C11,
        C12,
        C2,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Top => "Top",
                Self::A => "A",
                Self::A1 => "A1",
                Self::A2 => "A2",
                Self::B => "B",
                Self::C => "C",
                Self::C1 => "C1",
                Self::C11 => "C11",
                Self::C12 => "C12",
                Self::C2 => "C2",
            }
        }
    }

    use TestState::*;

    // Top -> A -> {A1, A2}; Top -> B; Top -> C -> {C1 -> {C11, C12}, C2}
    // C's default initial state is the grandchild C12.
    fn hierarchy() -> Hierarchy<TestState, (), ()> {
        HierarchyBuilder::new(Top, A)
            .composite(A, Top, A1)
            .leaf(A1, A)
            .leaf(A2, A)
            .leaf(B, Top)
            .composite(C, Top, C12)
            .composite(C1, C, C11)
            .leaf(C11, C1)
            .leaf(C12, C1)
            .leaf(C2, C)
            .build()
            .unwrap()
    }

    #[test]
    fn leaving_composite_exits_it() {
        let plan = hierarchy().plan(A1, A1, B).unwrap();

        assert_eq!(plan.exits, vec![A1, A]);
        assert_eq!(plan.entries, vec![B]);
        assert_eq!(plan.boundary, Some(Top));
        assert_eq!(plan.leaf, B);
    }

    #[test]
    fn sibling_transition_keeps_parent_active() {
        let plan = hierarchy().plan(A1, A1, A2).unwrap();

        assert_eq!(plan.exits, vec![A1]);
        assert_eq!(plan.entries, vec![A2]);
        assert_eq!(plan.boundary, Some(A));
    }

    #[test]
    fn self_transition_exits_and_reenters_leaf() {
        let plan = hierarchy().plan(A1, A1, A1).unwrap();

        assert_eq!(plan.exits, vec![A1]);
        assert_eq!(plan.entries, vec![A1]);
        assert_eq!(plan.boundary, Some(A));
        assert_eq!(plan.leaf, A1);
    }

    #[test]
    fn targeting_ancestor_composite_reenters_it_once() {
        let plan = hierarchy().plan(A2, A2, A).unwrap();

        assert_eq!(plan.exits, vec![A2, A]);
        assert_eq!(plan.entries, vec![A, A1]);
        assert_eq!(plan.boundary, Some(Top));
        assert_eq!(plan.leaf, A1);
    }

    #[test]
    fn composite_source_exits_from_current_leaf() {
        // Declared on A, handled while A2 is current
        let plan = hierarchy().plan(A2, A, B).unwrap();

        assert_eq!(plan.exits, vec![A2, A]);
        assert_eq!(plan.entries, vec![B]);
    }

    #[test]
    fn composite_source_to_own_child_keeps_source_active() {
        let plan = hierarchy().plan(A2, A, A1).unwrap();

        assert_eq!(plan.exits, vec![A2]);
        assert_eq!(plan.entries, vec![A1]);
        assert_eq!(plan.boundary, Some(A));
    }

    #[test]
    fn composite_target_follows_initial_chain_through_intermediates() {
        let plan = hierarchy().plan(B, B, C).unwrap();

        assert_eq!(plan.exits, vec![B]);
        assert_eq!(plan.entries, vec![C, C1, C12]);
        assert_eq!(plan.target, C);
        assert_eq!(plan.leaf, C12);
    }

    #[test]
    fn deep_cross_branch_transition() {
        let plan = hierarchy().plan(C11, C11, A2).unwrap();

        assert_eq!(plan.exits, vec![C11, C1, C]);
        assert_eq!(plan.entries, vec![A, A2]);
    }

    #[test]
    fn cousin_transition_under_shared_composite() {
        let plan = hierarchy().plan(C11, C1, C2).unwrap();

        assert_eq!(plan.exits, vec![C11, C1]);
        assert_eq!(plan.entries, vec![C2]);
        assert_eq!(plan.boundary, Some(C));
    }

    #[test]
    fn initial_plan_enters_top_then_defaults() {
        let plan = hierarchy().initial_plan();

        assert!(plan.exits.is_empty());
        assert_eq!(plan.entries, vec![Top, A, A1]);
        assert_eq!(plan.boundary, None);
        assert_eq!(plan.leaf, A1);
    }

    #[test]
    fn top_target_is_rejected() {
        let result = hierarchy().plan(A1, A1, Top);

        assert!(matches!(result, Err(TransitionError::TopTarget { .. })));
    }

    #[test]
    fn inactive_source_is_rejected() {
        let result = hierarchy().plan(A1, B, A2);

        assert!(matches!(
            result,
            Err(TransitionError::SourceNotActive { .. })
        ));
    }

    #[test]
    fn composite_current_is_rejected() {
        let result = hierarchy().plan(A, A, B);

        assert!(matches!(result, Err(TransitionError::NotALeaf { .. })));
    }
}
