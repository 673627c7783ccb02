/// Lifecycle of one visibility-gated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Unobserved,
    Intersecting,
    Loaded,
    Errored,
}

impl GateState {
    /// Once revealed, gated content stays revealed.
    pub fn is_revealed(self) -> bool {
        !matches!(self, Self::Unobserved)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Loaded | Self::Errored)
    }
}

/// Which transition table a gate follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    /// Reveals content once; has no load phase.
    Section,
    /// Reveals, then fetches exactly once.
    Image,
}
