//! Environment configuration and validation.

use minatar_core::{ConfigError, GameKind};

/// Everything needed to construct an [`Environment`](crate::Environment).
#[derive(Clone, Debug, PartialEq)]
pub struct EnvConfig {
    /// Which game to run.
    pub game: GameKind,
    /// Probability in `[0, 1]` of repeating the previous action instead
    /// of the requested one. Never applied to the first action of an
    /// episode.
    pub sticky_action_prob: f64,
    /// Enable the game's difficulty ramp, if it has one.
    pub difficulty_ramping: bool,
    /// Seeds both the game and the sticky-action stream.
    pub seed: u64,
}

impl EnvConfig {
    /// A configuration with the conventional 0.1 sticky probability and
    /// ramping enabled.
    pub fn new(game: GameKind, seed: u64) -> Self {
        Self {
            game,
            sticky_action_prob: 0.1,
            difficulty_ramping: true,
            seed,
        }
    }

    /// Check structural invariants.
    ///
    /// 1. The sticky-action probability is finite and in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_sticky_prob(self.sticky_action_prob)
    }
}

pub(crate) fn validate_sticky_prob(p: f64) -> Result<(), ConfigError> {
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(ConfigError::InvalidStickyProb { value: p });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_probability_is_valid() {
        for game in GameKind::ALL {
            assert!(EnvConfig::new(game, 0).validate().is_ok());
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut cfg = EnvConfig::new(GameKind::Freeway, 1);
        cfg.sticky_action_prob = 0.0;
        assert!(cfg.validate().is_ok());
        cfg.sticky_action_prob = 1.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn out_of_range_and_nan_rejected() {
        for p in [-0.01, 1.5, f64::NAN, f64::INFINITY] {
            let cfg = EnvConfig {
                sticky_action_prob: p,
                ..EnvConfig::new(GameKind::Asterix, 0)
            };
            match cfg.validate() {
                Err(ConfigError::InvalidStickyProb { value }) => {
                    assert!(value.is_nan() || value == p)
                }
                other => panic!("expected InvalidStickyProb, got {other:?}"),
            }
        }
    }
}
