//! Transition history tracking.
//!
//! Keeps a bounded, ordered log of completed transitions so embedding
//! applications can inspect where a machine has been.

use super::state::State;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use statecraft::core::TransitionRecord;
/// use statecraft::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Lamp { Top, Off, On }
/// }
///
/// let record = TransitionRecord {
///     from: Lamp::Off,
///     to: Lamp::On,
///     source: Lamp::Off,
///     target: Lamp::On,
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_self_transition());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRecord<S: State> {
    /// Leaf that was current before the transition
    pub from: S,
    /// Leaf that became current
    pub to: S,
    /// State whose logic declared the transition
    pub source: S,
    /// Declared destination, possibly a composite
    pub target: S,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

impl<S: State> TransitionRecord<S> {
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of transitions, oldest first.
///
/// Holds at most `limit` records; the oldest record is dropped when a new
/// one would exceed it. A limit of zero disables recording.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{TransitionHistory, TransitionRecord};
/// use statecraft::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Step { Top, One, Two, Three }
/// }
///
/// let mut history = TransitionHistory::with_limit(8);
/// for (from, to) in [(Step::One, Step::Two), (Step::Two, Step::Three)] {
///     history.record(TransitionRecord {
///         from,
///         to,
///         source: from,
///         target: to,
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.get_path(), vec![Step::One, Step::Two, Step::Three]);
/// ```
#[derive(Clone, Debug)]
pub struct TransitionHistory<S: State> {
    transitions: VecDeque<TransitionRecord<S>>,
    limit: usize,
}

impl<S: State> TransitionHistory<S> {
    /// Create an empty history keeping at most `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(1024)),
            limit,
        }
    }

    /// Record a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: TransitionRecord<S>) {
        if self.limit == 0 {
            return;
        }
        if self.transitions.len() == self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of leaves traversed.
    ///
    /// Returns the `from` leaf of the oldest retained record followed by
    /// the `to` leaf of every record.
    pub fn get_path(&self) -> Vec<S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Calculate total duration from first to last retained transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &TransitionRecord<S>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
