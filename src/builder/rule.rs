//! Builder for constructing declarative event rules.

use crate::builder::error::BuildError;
use crate::core::{Action, EventMatcher, Guard, Rule, State};
use std::sync::Arc;

/// Builder for constructing rules with a fluent API.
///
/// A rule with a target is a transition; a rule without one is an internal
/// action that claims the event without changing state.
pub struct RuleBuilder<S: State, H, E> {
    matcher: Option<EventMatcher<E>>,
    guard: Option<Guard<H>>,
    target: Option<S>,
    action: Option<Action<H>>,
}

impl<S: State, H: 'static, E: 'static> RuleBuilder<S, H, E> {
    /// Create a new rule builder.
    pub fn new() -> Self {
        Self {
            matcher: None,
            guard: None,
            target: None,
            action: None,
        }
    }

    /// Set the event predicate (required).
    pub fn event<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Match every event.
    pub fn any_event(self) -> Self {
        self.event(|_: &E| true)
    }

    /// Set the target state (optional; omit for an internal action).
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<H>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&H) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the action (optional).
    ///
    /// For transitions it runs after the exits and before the entries.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut H) + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Build the rule.
    pub fn build(self) -> Result<Rule<S, H, E>, BuildError> {
        let matcher = self.matcher.ok_or(BuildError::MissingEventMatcher)?;

        Ok(Rule {
            matcher,
            guard: self.guard,
            target: self.target,
            action: self.action,
        })
    }
}

impl<S: State, H: 'static, E: 'static> Default for RuleBuilder<S, H, E> {
    fn default() -> Self {
        Self::new()
    }
}
