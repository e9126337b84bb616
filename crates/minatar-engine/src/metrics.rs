//! Per-episode bookkeeping for an [`Environment`](crate::Environment).

/// Counters for the current episode plus a few lifetime totals.
///
/// Episode fields are zeroed by
/// [`Environment::reset`](crate::Environment::reset); lifetime fields
/// are not.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeStats {
    /// Accepted `act` calls this episode, including absorbed ones.
    pub steps: u64,
    /// Sum of rewards this episode.
    pub episode_return: f64,
    /// Times the previous action was repeated this episode.
    pub sticky_repeats: u64,
    /// Rejected action codes this episode.
    pub invalid_actions: u64,
    /// Episodes that reached a terminal transition.
    pub episodes_completed: u64,
    /// Return of the most recently completed episode.
    pub last_episode_return: Option<f64>,
}

impl EpisodeStats {
    pub(crate) fn start_episode(&mut self) {
        self.steps = 0;
        self.episode_return = 0.0;
        self.sticky_repeats = 0;
        self.invalid_actions = 0;
    }
}
