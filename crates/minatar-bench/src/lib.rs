//! Benchmark profiles and utilities for the MinAtar workspace.
//!
//! - [`action_script`]: a deterministic action sequence drawn from a
//!   game's minimal action set
//! - [`batch_profile`]: N environment configs for one game
//! - [`run_script`]: drive a game through a script, resetting on
//!   terminal

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use minatar_core::{Game, GameKind};
use minatar_engine::EnvConfig;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// `len` actions sampled uniformly from `game`'s minimal action set.
pub fn action_script(game: &dyn Game, len: usize, seed: u64) -> Vec<i32> {
    let actions = game.minimal_action_set();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| actions.choose(&mut rng).copied().unwrap_or(0) as i32)
        .collect()
}

/// `n` configs for `game`, seeded `seed, seed + 1, ...`, with sticky
/// actions off so benchmark inputs reach the game unchanged.
pub fn batch_profile(game: GameKind, n: usize, seed: u64) -> Vec<EnvConfig> {
    (0..n as u64)
        .map(|i| EnvConfig {
            sticky_action_prob: 0.0,
            ..EnvConfig::new(game, seed.wrapping_add(i))
        })
        .collect()
}

/// Play `script` on `game`, resetting whenever an episode ends.
/// Returns the summed reward and the number of episodes finished.
pub fn run_script(game: &mut dyn Game, script: &[i32]) -> (f64, usize) {
    let mut total = 0.0;
    let mut episodes = 0;
    for &a in script {
        match game.act(a) {
            Ok(t) => {
                total += t.reward;
                if t.terminal {
                    episodes += 1;
                    game.reset();
                }
            }
            Err(e) => total += e.transition().reward,
        }
    }
    (total, episodes)
}
