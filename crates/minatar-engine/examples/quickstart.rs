//! Play a few episodes of Breakout with a random policy.
//!
//! Run with:
//!   RUST_LOG=debug cargo run -p minatar-engine --example quickstart

use minatar_core::{Game, GameKind};
use minatar_engine::{EnvConfig, Environment};
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let game: GameKind = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "breakout".into())
        .parse()?;
    let mut env = Environment::new(EnvConfig::new(game, 42))?;
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let actions = env.minimal_action_set();

    for episode in 0..3 {
        env.reset();
        loop {
            let a = actions.choose(&mut rng).copied().unwrap_or(0) as i32;
            if env.act(a)?.terminal {
                break;
            }
        }
        let stats = env.stats();
        println!(
            "{} episode {episode}: {} steps, return {:.1}, {} sticky repeats",
            env.game_name(),
            stats.steps,
            stats.episode_return,
            stats.sticky_repeats
        );
    }
    Ok(())
}
