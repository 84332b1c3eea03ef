//! Declarative event rules.
//!
//! A rule reads like a statechart arrow: `event [guard] / action -> target`.
//! Rules without a target are internal actions.

use super::guard::Guard;
use super::reaction::{Action, Reaction};
use super::state::State;
use std::fmt;

/// Predicate selecting the events a rule reacts to.
pub type EventMatcher<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// One entry of a state's event table.
pub struct Rule<S: State, H, E> {
    pub(crate) matcher: EventMatcher<E>,
    pub(crate) guard: Option<Guard<H>>,
    pub(crate) target: Option<S>,
    pub(crate) action: Option<Action<H>>,
}

impl<S: State, H, E> Rule<S, H, E> {
    /// Target of the rule, `None` for internal actions.
    pub fn target(&self) -> Option<S> {
        self.target
    }

    pub fn is_internal(&self) -> bool {
        self.target.is_none()
    }

    /// Check if the rule claims `event` given the current host data (pure).
    pub fn matches(&self, host: &H, event: &E) -> bool {
        if !(self.matcher)(event) {
            return false;
        }

        self.guard.as_ref().map_or(true, |g| g.check(host))
    }

    /// Apply a rule that already matched.
    ///
    /// Internal actions run here. Transition actions are handed back so
    /// they can run between the exits and the entries.
    pub(crate) fn react(&self, host: &mut H) -> Reaction<S, H> {
        match self.target {
            None => {
                if let Some(action) = &self.action {
                    action(host);
                }
                Reaction::Handled
            }
            Some(target) => Reaction::Transition {
                target,
                action: self.action.clone(),
            },
        }
    }
}

impl<S: State, H, E> fmt::Debug for Rule<S, H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("target", &self.target)
            .field("guarded", &self.guard.is_some())
            .field("action", &self.action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Idle,
        Busy,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Busy => "Busy",
            }
        }
    }

    #[derive(Debug, PartialEq)]
    enum Ev {
        Start,
        Tick,
    }

    struct Host {
        ticks: u32,
        enabled: bool,
    }

    fn tick_rule() -> Rule<TestState, Host, Ev> {
        Rule {
            matcher: Box::new(|e| *e == Ev::Tick),
            guard: None,
            target: None,
            action: Some(Arc::new(|h: &mut Host| h.ticks += 1)),
        }
    }

    #[test]
    fn matches_checks_event_then_guard() {
        let rule: Rule<TestState, Host, Ev> = Rule {
            matcher: Box::new(|e| *e == Ev::Start),
            guard: Some(Guard::new(|h: &Host| h.enabled)),
            target: Some(TestState::Busy),
            action: None,
        };

        let enabled = Host {
            ticks: 0,
            enabled: true,
        };
        let disabled = Host {
            ticks: 0,
            enabled: false,
        };

        assert!(rule.matches(&enabled, &Ev::Start));
        assert!(!rule.matches(&enabled, &Ev::Tick));
        assert!(!rule.matches(&disabled, &Ev::Start));
    }

    #[test]
    fn unguarded_rule_matches_on_event_alone() {
        let rule = tick_rule();
        let host = Host {
            ticks: 0,
            enabled: false,
        };

        assert!(rule.matches(&host, &Ev::Tick));
        assert!(!rule.matches(&host, &Ev::Start));
    }

    #[test]
    fn internal_rule_runs_action_immediately() {
        let rule = tick_rule();
        let mut host = Host {
            ticks: 0,
            enabled: true,
        };

        assert!(rule.is_internal());
        let reaction = rule.react(&mut host);

        assert!(matches!(reaction, Reaction::Handled));
        assert_eq!(host.ticks, 1);
    }

    #[test]
    fn transition_rule_defers_action() {
        let rule: Rule<TestState, Host, Ev> = Rule {
            matcher: Box::new(|e| *e == Ev::Start),
            guard: None,
            target: Some(TestState::Idle),
            action: Some(Arc::new(|h: &mut Host| h.ticks += 10)),
        };
        let mut host = Host {
            ticks: 0,
            enabled: true,
        };

        let reaction = rule.react(&mut host);

        assert_eq!(host.ticks, 0);
        assert!(matches!(
            reaction,
            Reaction::Transition {
                target: TestState::Idle,
                action: Some(_)
            }
        ));
    }
}
