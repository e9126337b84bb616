//! The five MinAtar game engines.
//!
//! Every engine implements [`minatar_core::Game`] on a 10x10 board and
//! is fully deterministic given its construction seed and the action
//! sequence.
//!
//! | Game | Channels | Minimal actions | Ramp |
//! |------|----------|-----------------|------|
//! | [`Asterix`] | 4 | noop, left, up, right, down | every 100 frames |
//! | [`Breakout`] | 4 | noop, left, right | none |
//! | [`Freeway`] | 7 | noop, up, down | none |
//! | [`SeaQuest`] | 10 | all six | on surfacing |
//! | [`SpaceInvaders`] | 6 | noop, left, right, fire | per cleared wave |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod asterix;
pub mod breakout;
pub mod freeway;
pub mod ramp;
pub mod rng;
pub mod seaquest;
pub mod space_invaders;

pub use asterix::Asterix;
pub use breakout::Breakout;
pub use freeway::Freeway;
pub use ramp::Ramp;
pub use rng::GameRng;
pub use seaquest::SeaQuest;
pub use space_invaders::SpaceInvaders;

use minatar_core::{Game, GameKind};

/// Build a boxed engine for `kind`.
///
/// `difficulty_ramping` is ignored by Breakout and Freeway, which have
/// no ramp.
///
/// ```
/// use minatar_core::GameKind;
///
/// let mut game = minatar_games::make_game(GameKind::Breakout, false, 42);
/// assert_eq!(game.state_shape(), [4, 10, 10]);
/// let t = game.act(0).unwrap();
/// assert!(!t.terminal);
/// ```
pub fn make_game(kind: GameKind, difficulty_ramping: bool, seed: u64) -> Box<dyn Game> {
    match kind {
        GameKind::Asterix => Box::new(Asterix::new(difficulty_ramping, seed)),
        GameKind::Breakout => Box::new(Breakout::new(difficulty_ramping, seed)),
        GameKind::Freeway => Box::new(Freeway::new(difficulty_ramping, seed)),
        GameKind::Seaquest => Box::new(SeaQuest::new(difficulty_ramping, seed)),
        GameKind::SpaceInvaders => Box::new(SpaceInvaders::new(difficulty_ramping, seed)),
    }
}

/// Channel names for `kind`, in tensor order.
pub fn channel_names(kind: GameKind) -> &'static [&'static str] {
    match kind {
        GameKind::Asterix => &asterix::CHANNELS,
        GameKind::Breakout => &breakout::CHANNELS,
        GameKind::Freeway => &freeway::CHANNELS,
        GameKind::Seaquest => &seaquest::CHANNELS,
        GameKind::SpaceInvaders => &space_invaders::CHANNELS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_matches_kind_and_channels() {
        for kind in GameKind::ALL {
            let g = make_game(kind, true, 0);
            assert_eq!(g.kind(), kind);
            assert_eq!(g.n_channels(), channel_names(kind).len());
            assert_eq!(g.state().len(), g.n_channels() * 100);
        }
    }
}
