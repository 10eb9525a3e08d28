use json_store_expression::DEFAULT_MAX_PASSES;

/// Store-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Upper bound on dynamic bracket resolution passes per path.
    pub max_resolve_passes: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            max_resolve_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl StoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_resolve_passes(mut self, passes: usize) -> Self {
        self.max_resolve_passes = passes;
        self
    }
}

/// Per-registration settings for [`Store::subscribe`](crate::Store::subscribe).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscribeOptions {
    /// Call the new listener once per path right away, with the current
    /// value.
    pub immediate: bool,
    /// Also fire when a descendant of a registered path is written.
    pub children_activity: bool,
}

impl SubscribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    pub fn children_activity(mut self, children_activity: bool) -> Self {
        self.children_activity = children_activity;
        self
    }
}
