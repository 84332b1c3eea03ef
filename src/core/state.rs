//! Core State trait for hierarchy state identifiers.
//!
//! A state id names one node of the hierarchy, leaf or composite. Ids are
//! plain values; all behaviour lives in the descriptors the hierarchy keeps
//! for each id.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers.
///
/// Implemented by the embedding application, usually on a fieldless enum
/// (see [`state_enum!`](crate::state_enum)). The same id type covers the
/// root, composite states and leaf states.
///
/// # Required Traits
///
/// - `Copy`: ids are passed around freely during ancestor walks
/// - `Eq` + `Hash`: ids key the descriptor table
/// - `Debug`: ids appear in tracing output
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Top,
///     Closed,
///     Open,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Top => "Top",
///             Self::Closed => "Closed",
///             Self::Open => "Open",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// ```
pub trait State: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
