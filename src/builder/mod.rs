//! Builder API for ergonomic hierarchy construction.
//!
//! This module provides fluent builders and macros for describing state
//! hierarchies, their hooks and their event rules. Everything is validated
//! once, in [`HierarchyBuilder::build`].

pub mod error;
pub mod hierarchy;
pub mod macros;
pub mod rule;
pub mod state;

pub use error::BuildError;
pub use hierarchy::HierarchyBuilder;
pub use rule::RuleBuilder;
pub use state::StateBuilder;

use crate::core::{Guard, Rule, State};
use std::sync::Arc;

/// Create an unconditional transition rule.
///
/// # Example
///
/// ```
/// use statecraft::builder::{transition_rule, StateBuilder};
/// use statecraft::state_enum;
///
/// state_enum! {
///     enum Light { Top, Red, Green }
/// }
///
/// #[derive(PartialEq)]
/// enum Ev { Next }
///
/// let red = StateBuilder::<Light, (), Ev>::leaf(Light::Red, Light::Top)
///     .add_rule(transition_rule(|e: &Ev| *e == Ev::Next, Light::Green));
/// ```
pub fn transition_rule<S, H, E, F>(event: F, target: S) -> Rule<S, H, E>
where
    S: State,
    F: Fn(&E) -> bool + Send + Sync + 'static,
{
    Rule {
        matcher: Box::new(event),
        guard: None,
        target: Some(target),
        action: None,
    }
}

/// Create a transition rule that only fires while `guard` accepts the host.
pub fn guarded_transition_rule<S, H, E, F, G>(event: F, guard: G, target: S) -> Rule<S, H, E>
where
    S: State,
    F: Fn(&E) -> bool + Send + Sync + 'static,
    G: Fn(&H) -> bool + Send + Sync + 'static,
{
    Rule {
        matcher: Box::new(event),
        guard: Some(Guard::new(guard)),
        target: Some(target),
        action: None,
    }
}

/// Create an internal rule: claim the event and run `action`, no state change.
pub fn internal_rule<S, H, E, F, A>(event: F, action: A) -> Rule<S, H, E>
where
    S: State,
    F: Fn(&E) -> bool + Send + Sync + 'static,
    A: Fn(&mut H) + Send + Sync + 'static,
{
    Rule {
        matcher: Box::new(event),
        guard: None,
        target: None,
        action: Some(Arc::new(action)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Start,
        End,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::End => "End",
            }
        }
    }

    #[derive(PartialEq)]
    enum Ev {
        Go,
        Poke,
    }

    struct Host {
        ready: bool,
        pokes: u32,
    }

    #[test]
    fn transition_rule_builds() {
        let rule: Rule<TestState, Host, Ev> = transition_rule(|e: &Ev| *e == Ev::Go, TestState::End);
        let host = Host {
            ready: false,
            pokes: 0,
        };

        assert_eq!(rule.target(), Some(TestState::End));
        assert!(rule.matches(&host, &Ev::Go));
        assert!(!rule.matches(&host, &Ev::Poke));
    }

    #[test]
    fn guarded_transition_rule_respects_guard() {
        let rule: Rule<TestState, Host, Ev> =
            guarded_transition_rule(|e: &Ev| *e == Ev::Go, |h: &Host| h.ready, TestState::Start);

        let mut host = Host {
            ready: false,
            pokes: 0,
        };
        assert!(!rule.matches(&host, &Ev::Go));

        host.ready = true;
        assert!(rule.matches(&host, &Ev::Go));
    }

    #[test]
    fn internal_rule_has_no_target() {
        let rule: Rule<TestState, Host, Ev> =
            internal_rule(|e: &Ev| *e == Ev::Poke, |h: &mut Host| h.pokes += 1);

        let mut host = Host {
            ready: false,
            pokes: 0,
        };

        assert!(rule.is_internal());
        assert!(rule.matches(&host, &Ev::Poke));
        rule.react(&mut host);
        assert_eq!(host.pokes, 1);
    }
}
