//! Host configuration.

/// Runtime configuration for a [`Host`](crate::Host).
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Upper bound on settle iterations per flush. Each iteration delivers
    /// one batch of mutations or one queued task, emitted event or focus
    /// request. Reaching the bound means components keep re-triggering each
    /// other; the flush stops and logs a warning.
    pub max_flush_passes: usize,

    /// Move focus through the tab order on unhandled Tab / Shift+Tab.
    pub tab_navigation: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_flush_passes: 4096,
            tab_navigation: true,
        }
    }
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the settle iteration bound.
    pub fn max_flush_passes(mut self, passes: usize) -> Self {
        self.max_flush_passes = passes.max(1);
        self
    }

    /// Disable host-level Tab navigation.
    pub fn without_tab_navigation(mut self) -> Self {
        self.tab_navigation = false;
        self
    }
}
