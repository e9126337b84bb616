//! Single-game environment with sticky actions.
//!
//! # Ownership model
//!
//! [`Environment`] is `Send` (can be moved to a rollout thread) but not
//! `Sync` (the wrapped game caches its observation behind interior
//! mutability). Every mutating method takes `&mut self`, so the borrow
//! checker rules out overlapping steps and observation reads.
//!
//! # Sticky actions
//!
//! Before each call to the game, the requested action is replaced by
//! the previous one with probability `sticky_action_prob`. The first
//! call of every episode is never replaced. The draw comes from a
//! ChaCha8 stream separate from the game's own spawn stream, so the
//! game's randomness is identical whatever the sticky probability.

use minatar_core::{ActError, ConfigError, Game, GameKind, ObsError, Transition, NUM_ACTIONS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{validate_sticky_prob, EnvConfig};
use crate::metrics::EpisodeStats;

/// Stream index for the sticky-action generator. The games use stream 0.
const STICKY_STREAM: u64 = 1;

/// A game plus sticky actions and episode bookkeeping.
///
/// `Environment` also implements [`Game`], so policies and rollout
/// helpers written against the trait work on it unchanged.
pub struct Environment {
    game: Box<dyn Game>,
    rng: ChaCha8Rng,
    sticky_prob: f64,
    first_action: bool,
    last_action: Option<i32>,
    stats: EpisodeStats,
}

// Compile-time assertion: Environment is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Environment>();
    }
};

impl Environment {
    /// Build the configured game and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStickyProb`] if the probability is
    /// not in `[0, 1]`.
    pub fn new(config: EnvConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let game = minatar_games::make_game(config.game, config.difficulty_ramping, config.seed);
        Self::from_game(game, config.sticky_action_prob, config.seed)
    }

    /// Wrap an already constructed game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStickyProb`] if `sticky_prob` is not
    /// in `[0, 1]`.
    pub fn from_game(game: Box<dyn Game>, sticky_prob: f64, seed: u64) -> Result<Self, ConfigError> {
        validate_sticky_prob(sticky_prob)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(STICKY_STREAM);
        tracing::debug!(
            game = %game.kind(),
            sticky_prob,
            seed,
            "environment created"
        );
        Ok(Self {
            game,
            rng,
            sticky_prob,
            first_action: true,
            last_action: None,
            stats: EpisodeStats::default(),
        })
    }

    /// Size of the full action alphabet. Always 6.
    pub fn num_actions(&self) -> usize {
        NUM_ACTIONS
    }

    /// Display name of the wrapped game.
    pub fn game_name(&self) -> &'static str {
        self.game.kind().name()
    }

    /// The sticky-action probability.
    pub fn sticky_action_prob(&self) -> f64 {
        self.sticky_prob
    }

    /// Bookkeeping for the current episode.
    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    /// The action actually forwarded on the previous successful call.
    pub fn last_action(&self) -> Option<i32> {
        self.last_action
    }

    fn resolve_sticky(&mut self, requested: i32) -> i32 {
        if self.first_action {
            self.first_action = false;
            return requested;
        }
        // Drawn on every later call, so the stream position depends only
        // on the number of calls.
        let repeat = self.rng.random::<f64>() < self.sticky_prob;
        match (repeat, self.last_action) {
            (true, Some(previous)) => {
                self.stats.sticky_repeats += 1;
                if previous != requested {
                    tracing::trace!(requested, previous, "sticky action repeated");
                }
                previous
            }
            _ => requested,
        }
    }
}

impl Game for Environment {
    fn kind(&self) -> GameKind {
        self.game.kind()
    }

    /// Reset the game and re-arm the first-action exemption. The sticky
    /// generator continues its stream.
    fn reset(&mut self) {
        self.game.reset();
        self.first_action = true;
        self.last_action = None;
        self.stats.start_episode();
        tracing::debug!(game = %self.game.kind(), "episode reset");
    }

    fn act(&mut self, action: i32) -> Result<Transition, ActError> {
        let action = self.resolve_sticky(action);
        let was_terminal = self.game.is_terminal();
        let ramp_before = self.game.difficulty_ramp();

        let t = match self.game.act(action) {
            Ok(t) => t,
            Err(e) => {
                self.stats.invalid_actions += 1;
                return Err(e);
            }
        };
        self.last_action = Some(action);
        self.stats.steps += 1;
        self.stats.episode_return += t.reward;

        let ramp = self.game.difficulty_ramp();
        if ramp != ramp_before {
            tracing::debug!(game = %self.game.kind(), ramp, "difficulty increased");
        }
        if t.terminal && !was_terminal {
            self.stats.episodes_completed += 1;
            self.stats.last_episode_return = Some(self.stats.episode_return);
            tracing::debug!(
                game = %self.game.kind(),
                steps = self.stats.steps,
                episode_return = self.stats.episode_return,
                "episode ended"
            );
        }
        Ok(t)
    }

    fn state(&self) -> &[f32] {
        self.game.state()
    }

    fn state_shape(&self) -> [usize; 3] {
        self.game.state_shape()
    }

    fn channel(&self, index: usize) -> Result<&[f32], ObsError> {
        self.game.channel(index)
    }

    fn minimal_action_set(&self) -> Vec<usize> {
        self.game.minimal_action_set()
    }

    fn difficulty_ramp(&self) -> u32 {
        self.game.difficulty_ramp()
    }

    fn is_terminal(&self) -> bool {
        self.game.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minatar_test_utils::ScriptedGame;

    fn wrap(game: ScriptedGame, p: f64, seed: u64) -> Environment {
        Environment::from_game(Box::new(game), p, seed).unwrap()
    }

    #[test]
    fn zero_probability_passes_actions_through() {
        let game = ScriptedGame::new(100);
        let log = game.log();
        let mut env = wrap(game, 0.0, 7);
        for a in [1, 2, 3, 4, 5, 0] {
            env.act(a).unwrap();
        }
        assert_eq!(log.actions(), vec![1, 2, 3, 4, 5, 0]);
        assert_eq!(env.stats().sticky_repeats, 0);
    }

    #[test]
    fn certain_probability_repeats_first_action() {
        let game = ScriptedGame::new(100);
        let log = game.log();
        let mut env = wrap(game, 1.0, 7);
        for a in [3, 1, 2, 5] {
            env.act(a).unwrap();
        }
        assert_eq!(log.actions(), vec![3, 3, 3, 3]);
        assert_eq!(env.stats().sticky_repeats, 3);
    }

    #[test]
    fn reset_rearms_first_action() {
        let game = ScriptedGame::new(100);
        let log = game.log();
        let mut env = wrap(game, 1.0, 7);
        env.act(2).unwrap();
        env.act(4).unwrap();
        env.reset();
        env.act(5).unwrap();
        env.act(1).unwrap();
        assert_eq!(log.actions(), vec![5, 5]);
        assert_eq!(env.last_action(), Some(5));
    }

    #[test]
    fn rejected_action_does_not_become_sticky() {
        let game = ScriptedGame::new(100);
        let log = game.log();
        let mut env = wrap(game, 1.0, 7);
        let err = env.act(9).unwrap_err();
        assert_eq!(err.transition(), Transition::new(-1.0, false));
        assert_eq!(env.last_action(), None);
        // No previous action to repeat yet, so the request goes through.
        env.act(4).unwrap();
        env.act(0).unwrap();
        assert_eq!(log.actions(), vec![4, 4]);
        assert_eq!(env.stats().invalid_actions, 1);
    }

    #[test]
    fn sticky_rate_tracks_probability() {
        let mut env = wrap(ScriptedGame::new(1_000_000), 0.25, 11);
        let n = 4000;
        for i in 0..n {
            env.act(i % 6).unwrap();
        }
        let rate = env.stats().sticky_repeats as f64 / (n - 1) as f64;
        assert!((0.2..0.3).contains(&rate), "rate = {rate}");
    }

    #[test]
    fn sticky_stream_is_seeded() {
        let run = |seed| {
            let game = ScriptedGame::new(1000);
            let log = game.log();
            let mut env = wrap(game, 0.5, seed);
            for i in 0..200 {
                env.act(i % 6).unwrap();
            }
            log.actions()
        };
        assert_eq!(run(3), run(3));
        assert_ne!(run(3), run(4));
    }

    #[test]
    fn stats_follow_episode() {
        let game = ScriptedGame::new(3).with_rewards(vec![1.0, 0.5]);
        let mut env = wrap(game, 0.0, 0);
        env.act(0).unwrap();
        env.act(0).unwrap();
        let t = env.act(0).unwrap();
        assert!(t.terminal);
        assert_eq!(env.act(0).unwrap(), Transition::ABSORBED);

        let s = env.stats();
        assert_eq!(s.steps, 4);
        assert_eq!(s.episode_return, 2.5);
        assert_eq!(s.episodes_completed, 1);
        assert_eq!(s.last_episode_return, Some(2.5));

        env.reset();
        assert_eq!(env.stats().steps, 0);
        assert_eq!(env.stats().episodes_completed, 1);
    }

    #[test]
    fn invalid_probability_rejected() {
        let r = Environment::from_game(Box::new(ScriptedGame::new(1)), 1.01, 0);
        assert!(matches!(r, Err(ConfigError::InvalidStickyProb { .. })));
    }

    #[test]
    fn reports_game_identity() {
        let env = Environment::new(EnvConfig::new(GameKind::SpaceInvaders, 1)).unwrap();
        assert_eq!(env.num_actions(), 6);
        assert_eq!(env.game_name(), "Space Invaders");
        assert_eq!(env.state_shape(), [6, 10, 10]);
        assert_eq!(env.minimal_action_set(), vec![0, 1, 3, 5]);
    }
}
