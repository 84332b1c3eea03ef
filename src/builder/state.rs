//! Builder for describing a single state.

use crate::builder::error::BuildError;
use crate::builder::rule::RuleBuilder;
use crate::core::{Handler, Hook, Kind, Node, Reaction, Rule, State};
use crate::validation::Outline;
use std::collections::HashMap;

/// Describes one state: where it sits in the tree and how it behaves.
///
/// Hooks and event logic are optional; a state without any simply forwards
/// every event to its parent.
pub struct StateBuilder<S: State, H, E> {
    id: S,
    parent: Option<S>,
    initial: Option<S>,
    entry: Option<Hook<H>>,
    exit: Option<Hook<H>>,
    rules: Vec<Rule<S, H, E>>,
    handler: Option<Handler<S, H, E>>,
}

impl<S: State, H: 'static, E: 'static> StateBuilder<S, H, E> {
    fn new(id: S, parent: Option<S>, initial: Option<S>) -> Self {
        Self {
            id,
            parent,
            initial,
            entry: None,
            exit: None,
            rules: Vec::new(),
            handler: None,
        }
    }

    /// A leaf state under `parent`.
    pub fn leaf(id: S, parent: S) -> Self {
        Self::new(id, Some(parent), None)
    }

    /// A composite state under `parent` that enters `initial` when it is
    /// itself the target of a transition.
    pub fn composite(id: S, parent: S, initial: S) -> Self {
        Self::new(id, Some(parent), Some(initial))
    }

    /// The root state. Machines start by following `initial`.
    pub fn top(id: S, initial: S) -> Self {
        Self::new(id, None, Some(initial))
    }

    pub fn id(&self) -> S {
        self.id
    }

    /// Hook run when the state becomes active.
    pub fn entry<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H) + Send + Sync + 'static,
    {
        self.entry = Some(Box::new(hook));
        self
    }

    /// Hook run when the state stops being active.
    pub fn exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H) + Send + Sync + 'static,
    {
        self.exit = Some(Box::new(hook));
        self
    }

    /// Add a rule using a builder.
    /// Returns an error if the builder fails validation.
    pub fn on(mut self, builder: RuleBuilder<S, H, E>) -> Result<Self, BuildError> {
        let rule = builder.build()?;
        self.rules.push(rule);
        Ok(self)
    }

    /// Add a pre-built rule.
    pub fn add_rule(mut self, rule: Rule<S, H, E>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add multiple rules at once.
    pub fn rules(mut self, rules: Vec<Rule<S, H, E>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Free-form event logic, consulted after the rules.
    ///
    /// ```rust
    /// use statecraft::builder::StateBuilder;
    /// use statecraft::core::Reaction;
    /// use statecraft::state_enum;
    ///
    /// state_enum! {
    ///     enum S { Top, Off, On }
    /// }
    ///
    /// enum Ev { Toggle, Other }
    ///
    /// let off = StateBuilder::<S, (), Ev>::leaf(S::Off, S::Top).handler(|_, event| match event {
    ///     Ev::Toggle => Reaction::transition(S::On),
    ///     _ => Reaction::Ignored,
    /// });
    /// ```
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut H, &E) -> Reaction<S, H> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    pub(crate) fn outline(&self) -> Outline<S> {
        Outline {
            id: self.id,
            parent: self.parent,
            initial: self.initial,
            targets: self.rules.iter().filter_map(|r| r.target()).collect(),
        }
    }

    /// Convert into a node once the description has been validated.
    pub(crate) fn into_node(self, index: &HashMap<S, usize>) -> Node<S, H, E> {
        let kind = self
            .initial
            .and_then(|initial| index.get(&initial).copied())
            .map_or(Kind::Leaf, |initial| Kind::Composite { initial });

        Node {
            id: self.id,
            parent: self.parent.and_then(|p| index.get(&p).copied()),
            depth: 0,
            kind,
            entry: self.entry,
            exit: self.exit,
            rules: self.rules,
            handler: self.handler,
        }
    }
}
