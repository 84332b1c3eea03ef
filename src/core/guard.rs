//! Guard predicates for conditional event rules.
//!
//! Guards are pure boolean functions over the host data. A rule whose guard
//! rejects does not claim the event, so dispatch moves on to the next rule
//! or the parent state.

/// Pure predicate that decides whether a rule may claim an event.
///
/// Guards are evaluated before any side effect of the rule runs. They only
/// get shared access to the host.
///
/// # Example
///
/// ```rust
/// use statecraft::core::Guard;
///
/// struct Oven {
///     door_closed: bool,
/// }
///
/// let door_closed = Guard::new(|oven: &Oven| oven.door_closed);
///
/// assert!(door_closed.check(&Oven { door_closed: true }));
/// assert!(!door_closed.check(&Oven { door_closed: false }));
/// ```
pub struct Guard<H> {
    predicate: Box<dyn Fn(&H) -> bool + Send + Sync>,
}

impl<H> Guard<H> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync),
    /// since one hierarchy may back many machines.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&H) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard accepts the current host data.
    pub fn check(&self, host: &H) -> bool {
        (self.predicate)(host)
    }

    /// Combine two guards; both must accept.
    pub fn and(self, other: Guard<H>) -> Self
    where
        H: 'static,
    {
        Guard::new(move |host: &H| self.check(host) && other.check(host))
    }

    /// Invert this guard.
    pub fn negate(self) -> Self
    where
        H: 'static,
    {
        Guard::new(move |host: &H| !self.check(host))
    }
}

impl<H> std::fmt::Debug for Guard<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Guard(..)")
    }
}
