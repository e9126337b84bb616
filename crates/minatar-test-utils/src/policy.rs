//! Action policies for driving games in tests and benches.

use minatar_core::{Action, Game};
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Chooses the next action for a game.
pub trait Policy {
    fn next_action(&mut self, game: &dyn Game) -> i32;
}

/// Always the same action.
pub struct ConstantPolicy(pub i32);

impl Policy for ConstantPolicy {
    fn next_action(&mut self, _game: &dyn Game) -> i32 {
        self.0
    }
}

/// Repeats a fixed action sequence.
pub struct CyclePolicy {
    actions: Vec<i32>,
    next: usize,
}

impl CyclePolicy {
    pub fn new(actions: Vec<i32>) -> Self {
        Self { actions, next: 0 }
    }
}

impl Policy for CyclePolicy {
    fn next_action(&mut self, _game: &dyn Game) -> i32 {
        if self.actions.is_empty() {
            return 0;
        }
        let a = self.actions[self.next % self.actions.len()];
        self.next += 1;
        a
    }
}

/// Uniform over the game's minimal action set, from a seeded stream.
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn next_action(&mut self, game: &dyn Game) -> i32 {
        let actions = game.minimal_action_set();
        actions
            .choose(&mut self.rng)
            .map(|&a| a as i32)
            .unwrap_or(0)
    }
}

/// Breakout policy that steers the paddle under the ball's current
/// column, read from the observation.
///
/// Expects channel 0 to hold the paddle on the bottom row and channel 1
/// to hold the ball.
#[derive(Default)]
pub struct PaddleTracker;

impl Policy for PaddleTracker {
    fn next_action(&mut self, game: &dyn Game) -> i32 {
        let [_, _, cols] = game.state_shape();
        let lit = |ch: usize| -> Option<usize> {
            let plane = game.channel(ch).ok()?;
            plane.iter().position(|&v| v == 1.0).map(|i| i % cols)
        };
        let (Some(paddle), Some(ball)) = (lit(0), lit(1)) else {
            return Action::Noop as i32;
        };
        let action = match ball.cmp(&paddle) {
            std::cmp::Ordering::Less => Action::Left,
            std::cmp::Ordering::Greater => Action::Right,
            std::cmp::Ordering::Equal => Action::Noop,
        };
        action as i32
    }
}
