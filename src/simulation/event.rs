/// the stochastic event flavors racing in the queue, keyed by which
/// liveness classes the two sampled adjacencies must come from
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventKind {
    LiveLive,
    LiveDead,
    DeadDead,
}

impl EventKind {
    pub const fn all() -> &'static [Self] {
        &[Self::LiveLive, Self::LiveDead, Self::DeadDead]
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LiveLive => write!(f, "live-live"),
            Self::LiveDead => write!(f, "live-dead"),
            Self::DeadDead => write!(f, "dead-dead"),
        }
    }
}
