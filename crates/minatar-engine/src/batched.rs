//! Batched environments for vectorized rollouts.
//!
//! [`BatchedEnv`] owns N [`Environment`]s that share one observation
//! shape and steps them all in a single call. Observations are written
//! into one contiguous buffer, environment `i` occupying
//! `[i * obs_len, (i + 1) * obs_len)`.
//!
//! Environments are stepped sequentially. Every argument is validated
//! before any environment moves, so a rejected batch leaves all of them
//! where they were.

use minatar_core::{ActError, Action, ConfigError, Game, ObsError, Transition, NUM_ACTIONS};

use crate::config::EnvConfig;
use crate::env::Environment;

// ── Error type ──────────────────────────────────────────────────

/// Error from a batched operation, annotated with the failing index.
#[derive(Debug, PartialEq)]
pub enum BatchError {
    /// An environment rejected its action.
    Step {
        /// Index of the environment (0-based).
        env_index: usize,
        /// The underlying action error.
        error: ActError,
    },
    /// The output buffer does not fit the batch's observations.
    Observe(ObsError),
    /// Configuration error during construction.
    Config(ConfigError),
    /// Environment index out of bounds.
    InvalidIndex {
        /// The requested index.
        env_index: usize,
        /// Total number of environments.
        num_envs: usize,
    },
    /// Batch-level argument validation failed.
    InvalidArgument {
        /// Human-readable description of what's wrong.
        reason: String,
    },
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::Step { env_index, error } => {
                write!(f, "env {env_index}: {error}")
            }
            BatchError::Observe(e) => write!(f, "observe failed: {e}"),
            BatchError::Config(e) => write!(f, "config error: {e}"),
            BatchError::InvalidIndex {
                env_index,
                num_envs,
            } => write!(
                f,
                "env index {env_index} out of range (num_envs={num_envs})"
            ),
            BatchError::InvalidArgument { reason } => {
                write!(f, "invalid argument: {reason}")
            }
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Step { error, .. } => Some(error),
            BatchError::Observe(e) => Some(e),
            BatchError::Config(e) => Some(e),
            _ => None,
        }
    }
}

// ── BatchedEnv ──────────────────────────────────────────────────

/// N environments stepped together.
pub struct BatchedEnv {
    envs: Vec<Environment>,
    obs_len: usize,
}

impl BatchedEnv {
    /// Build one environment per config.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidArgument`] if `configs` is empty or
    /// the games disagree on observation shape, and
    /// [`BatchError::Config`] if any config fails validation.
    pub fn new(configs: Vec<EnvConfig>) -> Result<Self, BatchError> {
        if configs.is_empty() {
            return Err(BatchError::InvalidArgument {
                reason: "BatchedEnv requires at least one environment".into(),
            });
        }

        let mut envs = Vec::with_capacity(configs.len());
        for config in configs {
            envs.push(Environment::new(config).map_err(BatchError::Config)?);
        }
        Self::from_envs(envs)
    }

    /// Batch already constructed environments.
    ///
    /// # Errors
    ///
    /// Same shape checks as [`new`](Self::new).
    pub fn from_envs(envs: Vec<Environment>) -> Result<Self, BatchError> {
        let Some(first) = envs.first() else {
            return Err(BatchError::InvalidArgument {
                reason: "BatchedEnv requires at least one environment".into(),
            });
        };
        let ref_shape = first.state_shape();
        for (i, env) in envs.iter().enumerate().skip(1) {
            let shape = env.state_shape();
            if shape != ref_shape {
                return Err(BatchError::InvalidArgument {
                    reason: format!(
                        "env {i} ({}) has observation shape {shape:?}, \
                         but env 0 ({}) has {ref_shape:?}",
                        env.game_name(),
                        first.game_name()
                    ),
                });
            }
        }
        let obs_len = ref_shape.iter().product();
        Ok(Self { envs, obs_len })
    }

    /// Step every environment with its action.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidArgument`] if `actions.len()` differs
    /// from [`num_envs`](Self::num_envs), or [`BatchError::Step`] naming
    /// the first action code outside `[0, 6)`. In both cases no
    /// environment is stepped.
    pub fn step_all(&mut self, actions: &[i32]) -> Result<Vec<Transition>, BatchError> {
        self.validate_actions(actions)?;
        let mut out = Vec::with_capacity(self.envs.len());
        for (i, (env, &a)) in self.envs.iter_mut().zip(actions).enumerate() {
            let t = env.act(a).map_err(|error| BatchError::Step {
                env_index: i,
                error,
            })?;
            out.push(t);
        }
        Ok(out)
    }

    /// Step every environment, then write all observations into `output`.
    ///
    /// The buffer is checked first, so an undersized buffer fails without
    /// stepping.
    pub fn step_and_observe(
        &mut self,
        actions: &[i32],
        output: &mut [f32],
    ) -> Result<Vec<Transition>, BatchError> {
        self.validate_output(output)?;
        let transitions = self.step_all(actions)?;
        self.observe_all(output)?;
        Ok(transitions)
    }

    /// Copy every environment's observation into `output`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Observe`] if `output.len()` is not
    /// [`total_obs_len`](Self::total_obs_len).
    pub fn observe_all(&self, output: &mut [f32]) -> Result<(), BatchError> {
        self.validate_output(output)?;
        for (env, chunk) in self.envs.iter().zip(output.chunks_exact_mut(self.obs_len)) {
            chunk.copy_from_slice(env.state());
        }
        Ok(())
    }

    /// Reset one environment, leaving the others untouched.
    pub fn reset_env(&mut self, idx: usize) -> Result<(), BatchError> {
        let num_envs = self.envs.len();
        let env = self.envs.get_mut(idx).ok_or(BatchError::InvalidIndex {
            env_index: idx,
            num_envs,
        })?;
        env.reset();
        Ok(())
    }

    /// Reset every environment.
    pub fn reset_all(&mut self) {
        for env in &mut self.envs {
            env.reset();
        }
    }

    /// Reset only the environments whose episode has ended. Returns the
    /// indices that were reset.
    pub fn reset_terminal(&mut self) -> Vec<usize> {
        let mut reset = Vec::new();
        for (i, env) in self.envs.iter_mut().enumerate() {
            if env.is_terminal() {
                env.reset();
                reset.push(i);
            }
        }
        reset
    }

    /// Number of environments.
    pub fn num_envs(&self) -> usize {
        self.envs.len()
    }

    /// Values per observation.
    pub fn obs_len(&self) -> usize {
        self.obs_len
    }

    /// Length of the buffer [`observe_all`](Self::observe_all) expects.
    pub fn total_obs_len(&self) -> usize {
        self.obs_len * self.envs.len()
    }

    /// Shared `[channels, rows, cols]`.
    pub fn state_shape(&self) -> [usize; 3] {
        // Non-empty by construction.
        self.envs
            .first()
            .map(|e| e.state_shape())
            .unwrap_or([0, 0, 0])
    }

    /// Borrow one environment.
    pub fn env(&self, idx: usize) -> Option<&Environment> {
        self.envs.get(idx)
    }

    fn validate_actions(&self, actions: &[i32]) -> Result<(), BatchError> {
        let n = self.envs.len();
        if actions.len() != n {
            return Err(BatchError::InvalidArgument {
                reason: format!("actions has {} entries, expected {n}", actions.len()),
            });
        }
        for (i, (env, &a)) in self.envs.iter().zip(actions).enumerate() {
            if Action::from_code(a).is_none() {
                return Err(BatchError::Step {
                    env_index: i,
                    error: ActError::InvalidAction {
                        action: a,
                        n_actions: NUM_ACTIONS,
                        terminal: env.is_terminal(),
                    },
                });
            }
        }
        Ok(())
    }

    fn validate_output(&self, output: &[f32]) -> Result<(), BatchError> {
        let expected = self.total_obs_len();
        if output.len() != expected {
            return Err(BatchError::Observe(ObsError::ShapeMismatch {
                expected,
                actual: output.len(),
            }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minatar_core::GameKind;
    use minatar_test_utils::ScriptedGame;

    fn configs(game: GameKind, n: u64) -> Vec<EnvConfig> {
        (0..n).map(|seed| EnvConfig::new(game, seed)).collect()
    }

    #[test]
    fn new_zero_envs_is_error() {
        let r = BatchedEnv::new(Vec::new());
        assert!(matches!(r, Err(BatchError::InvalidArgument { .. })));
    }

    #[test]
    fn mixed_shapes_rejected() {
        let r = BatchedEnv::new(vec![
            EnvConfig::new(GameKind::Breakout, 0),
            EnvConfig::new(GameKind::Freeway, 0),
        ]);
        match r {
            Err(BatchError::InvalidArgument { reason }) => {
                assert!(reason.contains("env 1 (Freeway)"), "{reason}")
            }
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("mixed shapes accepted"),
        }
    }

    #[test]
    fn same_shape_games_can_mix() {
        // Asterix and Breakout both encode four channels.
        let b = BatchedEnv::new(vec![
            EnvConfig::new(GameKind::Asterix, 0),
            EnvConfig::new(GameKind::Breakout, 0),
        ])
        .unwrap();
        assert_eq!(b.state_shape(), [4, 10, 10]);
    }

    #[test]
    fn bad_config_reported() {
        let mut cfgs = configs(GameKind::Asterix, 2);
        cfgs[1].sticky_action_prob = 2.0;
        let r = BatchedEnv::new(cfgs);
        assert!(matches!(
            r,
            Err(BatchError::Config(ConfigError::InvalidStickyProb { .. }))
        ));
    }

    #[test]
    fn batch_matches_independent_envs() {
        let mut batch = BatchedEnv::new(configs(GameKind::Seaquest, 3)).unwrap();
        let mut solo: Vec<Environment> = configs(GameKind::Seaquest, 3)
            .into_iter()
            .map(|c| Environment::new(c).unwrap())
            .collect();
        let mut buf = vec![0.0; batch.total_obs_len()];

        for step in 0..60 {
            let actions = [step % 6, (step + 2) % 6, 5];
            let got = batch.step_and_observe(&actions, &mut buf).unwrap();
            for (i, env) in solo.iter_mut().enumerate() {
                let want = env.act(actions[i]).unwrap();
                assert_eq!(got[i], want);
                let chunk = &buf[i * batch.obs_len()..(i + 1) * batch.obs_len()];
                assert_eq!(chunk, env.state());
            }
        }
    }

    #[test]
    fn wrong_action_count_returns_error() {
        let mut b = BatchedEnv::new(configs(GameKind::Breakout, 2)).unwrap();
        let r = b.step_all(&[0]);
        assert!(matches!(r, Err(BatchError::InvalidArgument { .. })));
    }

    #[test]
    fn invalid_action_steps_nothing() {
        let mut b = BatchedEnv::new(configs(GameKind::Breakout, 3)).unwrap();
        let r = b.step_all(&[1, 2, 6]);
        match r {
            Err(BatchError::Step { env_index, error }) => {
                assert_eq!(env_index, 2);
                assert_eq!(error.transition(), Transition::new(-1.0, false));
            }
            other => panic!("expected Step error, got {other:?}"),
        }
        for i in 0..3 {
            assert_eq!(b.env(i).unwrap().stats().steps, 0);
        }
    }

    #[test]
    fn small_buffer_does_not_step() {
        let mut b = BatchedEnv::new(configs(GameKind::Freeway, 2)).unwrap();
        let mut buf = vec![0.0; b.total_obs_len() - 1];
        let r = b.step_and_observe(&[0, 0], &mut buf);
        assert!(matches!(
            r,
            Err(BatchError::Observe(ObsError::ShapeMismatch { .. }))
        ));
        assert_eq!(b.env(0).unwrap().stats().steps, 0);
    }

    #[test]
    fn reset_single_env_preserves_others() {
        let mut b = BatchedEnv::new(configs(GameKind::Freeway, 2)).unwrap();
        for _ in 0..5 {
            b.step_all(&[2, 2]).unwrap();
        }
        b.reset_env(0).unwrap();
        assert_eq!(b.env(0).unwrap().stats().steps, 0);
        assert_eq!(b.env(1).unwrap().stats().steps, 5);

        b.reset_all();
        assert_eq!(b.env(1).unwrap().stats().steps, 0);
    }

    #[test]
    fn invalid_env_index_returns_error() {
        let mut b = BatchedEnv::new(configs(GameKind::Asterix, 2)).unwrap();
        assert_eq!(
            b.reset_env(5),
            Err(BatchError::InvalidIndex {
                env_index: 5,
                num_envs: 2
            })
        );
    }

    #[test]
    fn reset_terminal_only_touches_finished_envs() {
        let envs = [2, 5]
            .into_iter()
            .map(|len| Environment::from_game(Box::new(ScriptedGame::new(len)), 0.0, 0).unwrap())
            .collect();
        let mut b = BatchedEnv::from_envs(envs).unwrap();
        b.step_all(&[0, 0]).unwrap();
        let t = b.step_all(&[0, 0]).unwrap();
        assert!(t[0].terminal && !t[1].terminal);

        assert_eq!(b.reset_terminal(), vec![0]);
        assert!(!b.env(0).unwrap().is_terminal());
        assert_eq!(b.env(1).unwrap().stats().steps, 2);
    }

    #[test]
    fn error_display() {
        let e = BatchError::InvalidIndex {
            env_index: 3,
            num_envs: 2,
        };
        assert_eq!(e.to_string(), "env index 3 out of range (num_envs=2)");
        let e = BatchError::Step {
            env_index: 1,
            error: ActError::InvalidAction {
                action: -1,
                n_actions: 6,
                terminal: false,
            },
        };
        assert_eq!(
            e.to_string(),
            "env 1: invalid action -1: expected a code in [0, 6)"
        );
    }
}
