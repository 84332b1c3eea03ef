//! The state tree.
//!
//! Descriptors live in a flat table; parent links are table indices and the
//! root (Top) is always at index 0. Ancestor queries are parent-index
//! chases bounded by depth.

use super::reaction::{Handler, Hook, Reaction};
use super::rule::Rule;
use super::state::State;
use std::collections::HashMap;
use std::fmt;

pub(crate) const TOP: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    Leaf,
    Composite { initial: usize },
}

/// Behaviour record of one state.
pub(crate) struct Node<S: State, H, E> {
    pub(crate) id: S,
    pub(crate) parent: Option<usize>,
    pub(crate) depth: usize,
    pub(crate) kind: Kind,
    pub(crate) entry: Option<Hook<H>>,
    pub(crate) exit: Option<Hook<H>>,
    pub(crate) rules: Vec<Rule<S, H, E>>,
    pub(crate) handler: Option<Handler<S, H, E>>,
}

impl<S: State, H, E> Node<S, H, E> {
    /// Offer an event to this state only.
    ///
    /// Rules are consulted in declaration order, then the handler.
    pub(crate) fn react(&self, host: &mut H, event: &E) -> Reaction<S, H> {
        if let Some(rule) = self.rules.iter().find(|r| r.matches(host, event)) {
            return rule.react(host);
        }

        match &self.handler {
            Some(handler) => handler(host, event),
            None => Reaction::Ignored,
        }
    }

    pub(crate) fn enter(&self, host: &mut H) {
        tracing::trace!(state = self.id.name(), "entry");
        if let Some(entry) = &self.entry {
            entry(host);
        }
    }

    pub(crate) fn leave(&self, host: &mut H) {
        tracing::trace!(state = self.id.name(), "exit");
        if let Some(exit) = &self.exit {
            exit(host);
        }
    }
}

/// Immutable, validated tree of state descriptors.
///
/// Built with [`HierarchyBuilder`](crate::builder::HierarchyBuilder), which
/// rejects dangling parents, cycles and bad targets before a `Hierarchy`
/// can exist. A hierarchy is usually wrapped in an `Arc` and shared by every
/// machine that runs it.
pub struct Hierarchy<S: State, H, E> {
    nodes: Vec<Node<S, H, E>>,
    index: HashMap<S, usize>,
}

impl<S: State, H, E> Hierarchy<S, H, E> {
    /// Assemble a hierarchy from validated nodes whose depth is not yet set.
    ///
    /// `nodes[0]` must be Top and every parent chain must reach it.
    pub(crate) fn from_nodes(mut nodes: Vec<Node<S, H, E>>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id, i))
            .collect();

        let depths: Vec<usize> = (0..nodes.len())
            .map(|i| {
                let mut depth = 0;
                let mut cursor = nodes[i].parent;
                while let Some(parent) = cursor {
                    depth += 1;
                    cursor = nodes[parent].parent;
                }
                depth
            })
            .collect();

        for (node, depth) in nodes.iter_mut().zip(depths) {
            node.depth = depth;
        }

        Self { nodes, index }
    }

    pub(crate) fn node(&self, idx: usize) -> &Node<S, H, E> {
        &self.nodes[idx]
    }

    pub(crate) fn idx(&self, state: S) -> Option<usize> {
        self.index.get(&state).copied()
    }

    /// The root state.
    pub fn top(&self) -> S {
        self.nodes[TOP].id
    }

    /// Number of states, Top included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a hierarchy holds at least Top and one leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, state: S) -> bool {
        self.index.contains_key(&state)
    }

    /// All states in declaration order, Top first.
    pub fn states(&self) -> impl Iterator<Item = S> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    pub fn parent(&self, state: S) -> Option<S> {
        let idx = self.idx(state)?;
        self.nodes[idx].parent.map(|p| self.nodes[p].id)
    }

    /// Distance from Top; Top has depth 0.
    pub fn depth(&self, state: S) -> Option<usize> {
        self.idx(state).map(|idx| self.nodes[idx].depth)
    }

    pub fn is_leaf(&self, state: S) -> bool {
        self.idx(state)
            .is_some_and(|idx| self.nodes[idx].kind == Kind::Leaf)
    }

    pub fn is_composite(&self, state: S) -> bool {
        self.idx(state)
            .is_some_and(|idx| matches!(self.nodes[idx].kind, Kind::Composite { .. }))
    }

    /// Default initial target of a composite state.
    pub fn initial(&self, state: S) -> Option<S> {
        match self.nodes[self.idx(state)?].kind {
            Kind::Composite { initial } => Some(self.nodes[initial].id),
            Kind::Leaf => None,
        }
    }

    /// Direct children in declaration order.
    pub fn children(&self, state: S) -> Vec<S> {
        let Some(idx) = self.idx(state) else {
            return Vec::new();
        };

        self.nodes
            .iter()
            .filter(|n| n.parent == Some(idx))
            .map(|n| n.id)
            .collect()
    }

    /// Proper ancestors of `state`, innermost first, ending with Top.
    ///
    /// Empty for Top and for unknown states.
    pub fn ancestors(&self, state: S) -> Ancestors<'_, S, H, E> {
        let next = self.idx(state).and_then(|idx| self.nodes[idx].parent);
        Ancestors {
            hierarchy: self,
            next,
        }
    }

    /// Check if `ancestor` is a proper ancestor of `descendant`.
    ///
    /// A state is never its own ancestor.
    pub fn is_ancestor(&self, ancestor: S, descendant: S) -> bool {
        match (self.idx(ancestor), self.idx(descendant)) {
            (Some(a), Some(d)) => self.is_ancestor_idx(a, d),
            _ => false,
        }
    }

    /// Least common ancestor-or-self of two states.
    ///
    /// `lca(x, x) == x`, and if one state is an ancestor of the other the
    /// ancestor is returned.
    pub fn lca(&self, a: S, b: S) -> Option<S> {
        let a = self.idx(a)?;
        let b = self.idx(b)?;
        Some(self.nodes[self.lca_idx(a, b)].id)
    }

    pub(crate) fn is_ancestor_idx(&self, ancestor: usize, descendant: usize) -> bool {
        let floor = self.nodes[ancestor].depth;
        let mut cursor = self.nodes[descendant].parent;
        while let Some(idx) = cursor {
            if idx == ancestor {
                return true;
            }
            if self.nodes[idx].depth <= floor {
                return false;
            }
            cursor = self.nodes[idx].parent;
        }
        false
    }

    /// Equalize depths, then advance both cursors until they meet.
    pub(crate) fn lca_idx(&self, mut a: usize, mut b: usize) -> usize {
        while self.nodes[a].depth > self.nodes[b].depth {
            a = self.nodes[a].parent.unwrap_or(TOP);
        }
        while self.nodes[b].depth > self.nodes[a].depth {
            b = self.nodes[b].parent.unwrap_or(TOP);
        }
        while a != b {
            a = self.nodes[a].parent.unwrap_or(TOP);
            b = self.nodes[b].parent.unwrap_or(TOP);
        }
        a
    }
}

impl<S: State, H, E> fmt::Debug for Hierarchy<S, H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let states: Vec<(S, Option<S>)> = self
            .nodes
            .iter()
            .map(|n| (n.id, n.parent.map(|p| self.nodes[p].id)))
            .collect();
        f.debug_struct("Hierarchy").field("states", &states).finish()
    }
}

/// Iterator over the proper ancestors of a state, innermost first.
pub struct Ancestors<'a, S: State, H, E> {
    hierarchy: &'a Hierarchy<S, H, E>,
    next: Option<usize>,
}

impl<S: State, H, E> Iterator for Ancestors<'_, S, H, E> {
    type Item = S;

    fn next(&mut self) -> Option<S> {
        let idx = self.next?;
        let node = self.hierarchy.node(idx);
        self.next = node.parent;
        Some(node.id)
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
        A2x,
        B,
        Orphan,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Top => "Top",
                Self::A => "A",
                Self::A1 => "A1",
                Self::A2 => "A2",
                Self::A2x => "A2x",
                Self::B => "B",
                Self::Orphan => "Orphan",
            }
        }
    }

    use TestState::*;

    // Top -> A -> {A1, A2 -> {A2x}}, Top -> B
    fn hierarchy() -> Hierarchy<TestState, (), ()> {
        HierarchyBuilder::new(Top, A)
            .composite(A, Top, A1)
            .leaf(A1, A)
            .composite(A2, A, A2x)
            .leaf(A2x, A2)
            .leaf(B, Top)
            .build()
            .unwrap()
    }

    #[test]
    fn depth_counts_edges_from_top() {
        let h = hierarchy();

        assert_eq!(h.depth(Top), Some(0));
        assert_eq!(h.depth(A), Some(1));
        assert_eq!(h.depth(B), Some(1));
        assert_eq!(h.depth(A2x), Some(3));
        assert_eq!(h.depth(Orphan), None);
    }

    #[test]
    fn parent_and_children_agree() {
        let h = hierarchy();

        assert_eq!(h.parent(Top), None);
        assert_eq!(h.parent(A1), Some(A));
        assert_eq!(h.children(A), vec![A1, A2]);
        assert_eq!(h.children(Top), vec![A, B]);
        assert!(h.children(B).is_empty());
    }

    #[test]
    fn kinds_are_reported() {
        let h = hierarchy();

        assert!(h.is_composite(Top));
        assert!(h.is_composite(A2));
        assert!(h.is_leaf(A1));
        assert!(!h.is_leaf(A));
        assert!(!h.is_leaf(Orphan));
        assert_eq!(h.initial(A), Some(A1));
        assert_eq!(h.initial(B), None);
    }

    #[test]
    fn ancestors_walk_to_top() {
        let h = hierarchy();

        let chain: Vec<_> = h.ancestors(A2x).collect();
        assert_eq!(chain, vec![A2, A, Top]);
        assert_eq!(h.ancestors(Top).count(), 0);
        assert_eq!(h.ancestors(Orphan).count(), 0);
    }

    #[test]
    fn is_ancestor_is_strict() {
        let h = hierarchy();

        assert!(h.is_ancestor(A, A2x));
        assert!(h.is_ancestor(Top, B));
        assert!(!h.is_ancestor(A, A));
        assert!(!h.is_ancestor(A2x, A));
        assert!(!h.is_ancestor(B, A1));
    }

    #[test]
    fn lca_of_siblings_is_parent() {
        let h = hierarchy();

        assert_eq!(h.lca(A1, A2x), Some(A));
        assert_eq!(h.lca(A1, B), Some(Top));
        assert_eq!(h.lca(A2x, A), Some(A));
        assert_eq!(h.lca(B, B), Some(B));
        assert_eq!(h.lca(B, Orphan), None);
    }

    #[test]
    fn top_is_first_state() {
        let h = hierarchy();

        assert_eq!(h.top(), Top);
        assert_eq!(h.len(), 6);
        assert!(!h.is_empty());
        assert_eq!(h.states().next(), Some(Top));
    }
}
