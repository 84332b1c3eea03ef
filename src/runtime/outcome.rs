//! Result of dispatching one event.

use crate::core::State;

/// What happened to a dispatched event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome<S: State> {
    /// No state claimed the event; it was discarded at the root
    Unhandled,

    /// `by` claimed the event as an internal action
    Handled { by: S },

    /// `by` claimed the event and the machine moved from leaf `from` to
    /// leaf `to`
    Transitioned { by: S, from: S, to: S },
}

impl<S: State> DispatchOutcome<S> {
    pub fn is_handled(&self) -> bool {
        !matches!(self, DispatchOutcome::Unhandled)
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, DispatchOutcome::Transitioned { .. })
    }

    /// The state that claimed the event, if any.
    pub fn claimed_by(&self) -> Option<S> {
        match self {
            DispatchOutcome::Unhandled => None,
            DispatchOutcome::Handled { by } | DispatchOutcome::Transitioned { by, .. } => {
                Some(*by)
            }
        }
    }
}
