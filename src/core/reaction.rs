//! What a state's event logic decides to do with an event.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Side effect run on the host, e.g. a transition action.
pub type Action<H> = Arc<dyn Fn(&mut H) + Send + Sync>;

/// Entry or exit hook of a state.
pub type Hook<H> = Box<dyn Fn(&mut H) + Send + Sync>;

/// Free-form event logic attached to a state.
///
/// Returning [`Reaction::Ignored`] forwards the event to the parent state.
pub type Handler<S, H, E> = Box<dyn Fn(&mut H, &E) -> Reaction<S, H> + Send + Sync>;

/// Outcome of offering an event to one state.
pub enum Reaction<S: State, H> {
    /// Not claimed; the parent state is consulted next
    Ignored,

    /// Claimed as an internal action, no state change
    Handled,

    /// Claimed; run the exit/action/entry sequence towards `target`
    Transition {
        target: S,
        action: Option<Action<H>>,
    },
}

impl<S: State, H> Reaction<S, H> {
    /// Transition to `target` without an action.
    pub fn transition(target: S) -> Self {
        Reaction::Transition {
            target,
            action: None,
        }
    }

    /// Transition to `target`, running `action` after the exits and before
    /// the entries.
    pub fn transition_with<F>(target: S, action: F) -> Self
    where
        F: Fn(&mut H) + Send + Sync + 'static,
    {
        Reaction::Transition {
            target,
            action: Some(Arc::new(action)),
        }
    }

    /// Whether this reaction stops the rootward search.
    pub fn is_claimed(&self) -> bool {
        !matches!(self, Reaction::Ignored)
    }
}

impl<S: State, H> fmt::Debug for Reaction<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reaction::Ignored => f.write_str("Ignored"),
            Reaction::Handled => f.write_str("Handled"),
            Reaction::Transition { target, action } => f
                .debug_struct("Transition")
                .field("target", target)
                .field("action", &action.is_some())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Idle,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            "Idle"
        }
    }

    #[test]
    fn ignored_is_not_claimed() {
        let reaction: Reaction<TestState, ()> = Reaction::Ignored;
        assert!(!reaction.is_claimed());
        assert!(Reaction::<TestState, ()>::Handled.is_claimed());
        assert!(Reaction::<TestState, ()>::transition(TestState::Idle).is_claimed());
    }

    #[test]
    fn transition_with_carries_action() {
        let reaction: Reaction<TestState, u32> =
            Reaction::transition_with(TestState::Idle, |n: &mut u32| *n += 1);

        match reaction {
            Reaction::Transition {
                target,
                action: Some(action),
            } => {
                assert_eq!(target, TestState::Idle);
                let mut n = 1;
                action(&mut n);
                assert_eq!(n, 2);
            }
            other => panic!("Expected transition with action, got {:?}", other),
        }
    }
}
