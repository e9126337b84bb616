//! Test utilities and mock types for MinAtar development.
//!
//! Provides a mock [`Game`] whose behaviour is fully scripted
//! ([`ScriptedGame`]), a handful of action policies, and a [`rollout`]
//! helper that records a trajectory for assertions.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod policy;

pub use fixtures::{ActionLog, ScriptedGame};
pub use policy::{ConstantPolicy, CyclePolicy, PaddleTracker, Policy, RandomPolicy};

use minatar_core::Game;

/// Everything observed while driving a game.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    pub actions: Vec<i32>,
    pub rewards: Vec<f64>,
    pub terminals: Vec<bool>,
    /// Observation after each step.
    pub observations: Vec<Vec<f32>>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn total_reward(&self) -> f64 {
        self.rewards.iter().sum()
    }

    /// Whether the last recorded step ended the episode.
    pub fn ended(&self) -> bool {
        self.terminals.last().copied().unwrap_or(false)
    }
}

/// Drive `game` with `policy` for up to `max_steps` steps, stopping at
/// the first terminal transition.
///
/// Panics if the policy produces an action the game rejects.
pub fn rollout(game: &mut dyn Game, policy: &mut dyn Policy, max_steps: usize) -> Trajectory {
    let mut traj = Trajectory::default();
    for _ in 0..max_steps {
        let action = policy.next_action(game);
        let t = game
            .act(action)
            .unwrap_or_else(|e| panic!("policy produced a rejected action: {e}"));
        traj.actions.push(action);
        traj.rewards.push(t.reward);
        traj.terminals.push(t.terminal);
        traj.observations.push(game.state().to_vec());
        if t.terminal {
            break;
        }
    }
    traj
}

/// Whether every value is exactly `0.0` or `1.0`.
pub fn is_binary(obs: &[f32]) -> bool {
    obs.iter().all(|&v| v == 0.0 || v == 1.0)
}
