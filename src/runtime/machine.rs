//! State machine that dispatches events through a hierarchy.

use crate::core::{
    Action, Hierarchy, Reaction, State, TransitionError, TransitionHistory, TransitionPlan,
    TransitionRecord,
};
use crate::runtime::config::MachineConfig;
use crate::runtime::outcome::DispatchOutcome;
use chrono::Utc;
use std::fmt::Debug;
use std::sync::Arc;

/// A running instance of a hierarchy.
///
/// Carries the host data `H` together with the current leaf state. The
/// current leaf is set when the machine starts and changes only when a
/// transition completes. Dispatch takes `&mut self` and hooks only see the
/// host, so one event always runs to completion before the next.
pub struct Machine<S: State, H, E> {
    hierarchy: Arc<Hierarchy<S, H, E>>,
    host: H,
    current: S,
    history: TransitionHistory<S>,
    unhandled: u64,
}

impl<S: State, H, E: Debug> Machine<S, H, E> {
    /// Start a machine with the default configuration.
    ///
    /// Runs Top's entry hook, then follows default initial states down to a
    /// leaf, entering each state on the way.
    pub fn new(hierarchy: impl Into<Arc<Hierarchy<S, H, E>>>, host: H) -> Self {
        Self::with_config(hierarchy, host, MachineConfig::default())
    }

    /// Start a machine with an explicit configuration.
    pub fn with_config(
        hierarchy: impl Into<Arc<Hierarchy<S, H, E>>>,
        mut host: H,
        config: MachineConfig,
    ) -> Self {
        let hierarchy = hierarchy.into();
        let plan = hierarchy.initial_plan();
        run_entries(&hierarchy, &plan, &mut host);

        tracing::debug!(
            top = hierarchy.top().name(),
            leaf = plan.leaf.name(),
            "machine started"
        );

        Self {
            current: plan.leaf,
            hierarchy,
            host,
            history: TransitionHistory::with_limit(config.history_limit),
            unhandled: 0,
        }
    }

    /// Get current leaf state (pure)
    pub fn current_state(&self) -> S {
        self.current
    }

    /// Check if `state` is active: the current leaf or one of its ancestors.
    pub fn is_in(&self, state: S) -> bool {
        self.current == state || self.hierarchy.is_ancestor(state, self.current)
    }

    /// Active states from the current leaf up to Top.
    pub fn active_states(&self) -> Vec<S> {
        std::iter::once(self.current)
            .chain(self.hierarchy.ancestors(self.current))
            .collect()
    }

    /// Shared access to the host data.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host data between dispatches.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Stop the machine and return the host data.
    pub fn into_host(self) -> H {
        self.host
    }

    /// The shared hierarchy this machine runs.
    pub fn hierarchy(&self) -> &Arc<Hierarchy<S, H, E>> {
        &self.hierarchy
    }

    /// Get transition history (pure)
    pub fn history(&self) -> &TransitionHistory<S> {
        &self.history
    }

    /// Number of events that reached the root unclaimed.
    pub fn unhandled_events(&self) -> u64 {
        self.unhandled
    }

    /// Offer an event to the current leaf.
    ///
    /// The innermost state that claims the event wins; unclaimed events walk
    /// rootward and are discarded at Top. A claimed transition runs its exit
    /// hooks, its action, then its entry hooks before this returns.
    ///
    /// # Errors
    ///
    /// Only targets produced by handler closures can fail here (rule targets
    /// are checked when the hierarchy is built). On error no hook has run and
    /// the current leaf is unchanged.
    pub fn dispatch(&mut self, event: &E) -> Result<DispatchOutcome<S>, TransitionError> {
        let hierarchy = Arc::clone(&self.hierarchy);
        let mut cursor = hierarchy.idx(self.current);

        while let Some(idx) = cursor {
            let node = hierarchy.node(idx);
            match node.react(&mut self.host, event) {
                Reaction::Ignored => cursor = node.parent,
                Reaction::Handled => {
                    tracing::trace!(state = node.id.name(), ?event, "internal action");
                    return Ok(DispatchOutcome::Handled { by: node.id });
                }
                Reaction::Transition { target, action } => {
                    let from = self.current;
                    let to = self.transition(node.id, target, action)?;
                    return Ok(DispatchOutcome::Transitioned {
                        by: node.id,
                        from,
                        to,
                    });
                }
            }
        }

        self.unhandled += 1;
        tracing::debug!(
            state = self.current.name(),
            ?event,
            unhandled = self.unhandled,
            "event not handled"
        );
        Ok(DispatchOutcome::Unhandled)
    }

    /// Run a transition declared by `source` and return the new leaf.
    fn transition(
        &mut self,
        source: S,
        target: S,
        action: Option<Action<H>>,
    ) -> Result<S, TransitionError> {
        let hierarchy = Arc::clone(&self.hierarchy);
        let plan = hierarchy.plan(self.current, source, target)?;

        for state in &plan.exits {
            if let Some(idx) = hierarchy.idx(*state) {
                hierarchy.node(idx).leave(&mut self.host);
            }
        }

        if let Some(action) = action {
            action(&mut self.host);
        }

        run_entries(&hierarchy, &plan, &mut self.host);

        let from = self.current;
        self.current = plan.leaf;
        self.history.record(TransitionRecord {
            from,
            to: plan.leaf,
            source,
            target,
            timestamp: Utc::now(),
        });

        tracing::debug!(
            from = from.name(),
            to = plan.leaf.name(),
            source = source.name(),
            target = target.name(),
            exits = plan.exits.len(),
            entries = plan.entries.len(),
            "transition complete"
        );

        Ok(plan.leaf)
    }
}

fn run_entries<S: State, H, E>(hierarchy: &Hierarchy<S, H, E>, plan: &TransitionPlan<S>, host: &mut H) {
    for state in &plan.entries {
        if let Some(idx) = hierarchy.idx(*state) {
            hierarchy.node(idx).enter(host);
        }
    }
}

impl<S: State, H: Debug, E> Debug for Machine<S, H, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.current)
            .field("host", &self.host)
            .field("unhandled", &self.unhandled)
            .finish()
    }
}
