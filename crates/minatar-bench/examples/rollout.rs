//! Random-policy rollouts over every game, with episode logging.
//!
//! Demonstrates: config → Environment → act until terminal → stats →
//! reset, for each of the five games, then a batched run.
//!
//! Run with:
//!   RUST_LOG=minatar_engine=debug cargo run -p minatar-bench --example rollout

use minatar_bench::batch_profile;
use minatar_core::{Game, GameKind};
use minatar_engine::{BatchedEnv, EnvConfig, Environment};
use minatar_test_utils::{Policy, RandomPolicy};

const EPISODES: usize = 5;
const MAX_STEPS: usize = 5_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    println!("=== MinAtar random rollouts ===\n");

    for kind in GameKind::ALL {
        let mut env = Environment::new(EnvConfig::new(kind, 42))?;
        let mut policy = RandomPolicy::new(7);
        let mut returns = Vec::with_capacity(EPISODES);
        let mut lengths = Vec::with_capacity(EPISODES);

        for _ in 0..EPISODES {
            env.reset();
            for _ in 0..MAX_STEPS {
                let a = policy.next_action(&env);
                if env.act(a)?.terminal {
                    break;
                }
            }
            returns.push(env.stats().episode_return);
            lengths.push(env.stats().steps);
        }

        let mean_return = returns.iter().sum::<f64>() / EPISODES as f64;
        let mean_len = lengths.iter().sum::<u64>() as f64 / EPISODES as f64;
        println!(
            "  {:<15} mean_return={:>7.2}  mean_len={:>7.1}  ramp={}",
            env.game_name(),
            mean_return,
            mean_len,
            env.difficulty_ramp(),
        );
        tracing::info!(game = %kind, mean_return, mean_len, "rollouts finished");
    }

    println!("\nBatched: 8 x Asterix, 1000 steps with auto-reset");
    let mut batch = BatchedEnv::new(batch_profile(GameKind::Asterix, 8, 0))?;
    let mut obs = vec![0.0f32; batch.total_obs_len()];
    let mut policy = RandomPolicy::new(11);
    let mut total = 0.0;
    let mut finished = 0;
    for _ in 0..1000 {
        let actions: Vec<i32> = (0..batch.num_envs())
            .map(|i| match batch.env(i) {
                Some(env) => policy.next_action(env),
                None => 0,
            })
            .collect();
        let ts = batch.step_and_observe(&actions, &mut obs)?;
        total += ts.iter().map(|t| t.reward).sum::<f64>();
        finished += batch.reset_terminal().len();
    }
    println!("  total_reward={total:.1}  episodes_finished={finished}");
    Ok(())
}
