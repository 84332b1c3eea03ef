//! Machine configuration.

/// Default number of transitions kept in a machine's history.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Per-machine settings.
///
/// # Example
///
/// ```rust
/// use statecraft::runtime::MachineConfig;
///
/// let config = MachineConfig::default().history_limit(0);
/// assert_eq!(config.history_limit, 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    /// Maximum number of transition records kept; 0 disables the history
    pub history_limit: usize,
}

impl MachineConfig {
    /// Create a configuration with the default history limit.
    pub fn new() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Set the history capacity.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::new()
    }
}
