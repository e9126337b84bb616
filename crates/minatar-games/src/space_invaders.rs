//! Space Invaders: a cannon on the bottom row shoots at a marching
//! block of aliens.
//!
//! The block sweeps sideways and drops a row at each wall. Aliens fire
//! from the column nearest the cannon. Each alien destroyed scores +1;
//! an alien or enemy bullet reaching the cannon ends the episode. A
//! cleared wave is replaced, and with ramping each new wave marches
//! faster.

use minatar_core::{ActError, Action, ChannelId, Game, GameKind, Timer, Transition};
use minatar_obs::{ObsCache, ObsFrame, ObsLayout};
use minatar_space::{resolve_axis, CellMask, EdgeBehavior, GridShape, Heading, Position};
use smallvec::SmallVec;

use crate::ramp::Ramp;
use crate::rng::GameRng;

const GRID: GridShape = GridShape::MINATAR;
const ALIEN_ROWS: std::ops::Range<i32> = 0..4;
const ALIEN_COLS: std::ops::Range<i32> = 2..8;

const ALIEN_MOVE_INTERVAL: u32 = 12;
const ALIEN_SHOT_INTERVAL: u32 = 10;
const SHOT_COOLDOWN: u32 = 5;

const CANNON: ChannelId = ChannelId(0);
const ALIEN: ChannelId = ChannelId(1);
const ALIEN_LEFT: ChannelId = ChannelId(2);
const ALIEN_RIGHT: ChannelId = ChannelId(3);
const FRIENDLY_BULLET: ChannelId = ChannelId(4);
const ENEMY_BULLET: ChannelId = ChannelId(5);

/// Observation channel names, in tensor order.
pub const CHANNELS: [&str; 6] = [
    "cannon",
    "alien",
    "alien_left",
    "alien_right",
    "friendly_bullet",
    "enemy_bullet",
];

/// The Space Invaders engine.
#[derive(Debug)]
pub struct SpaceInvaders {
    rng: GameRng,
    ramping: bool,
    ramp: Ramp,
    cannon: i32,
    shot_timer: Timer,
    aliens: CellMask,
    heading: Heading,
    friendly: CellMask,
    enemy: CellMask,
    alien_move_timer: Timer,
    alien_shot_timer: Timer,
    terminal: bool,
    obs: ObsCache,
}

impl SpaceInvaders {
    /// A fresh game. `ramping` speeds up each new wave.
    pub fn new(ramping: bool, seed: u64) -> Self {
        let mut game = Self {
            rng: GameRng::seed_from_u64(seed),
            ramping,
            ramp: fresh_ramp(ramping),
            cannon: 5,
            shot_timer: Timer::ready_now(),
            aliens: CellMask::new(GRID),
            heading: Heading::Left,
            friendly: CellMask::new(GRID),
            enemy: CellMask::new(GRID),
            alien_move_timer: Timer::new(ALIEN_MOVE_INTERVAL),
            alien_shot_timer: Timer::new(ALIEN_SHOT_INTERVAL),
            terminal: false,
            obs: ObsCache::new(ObsLayout::new(GRID, &CHANNELS)),
        };
        game.reset();
        game
    }

    /// Number of aliens alive.
    pub fn aliens_left(&self) -> usize {
        self.aliens.count()
    }

    fn cannon_pos(&self) -> Position {
        Position::new(GRID.max_row(), self.cannon)
    }

    fn spawn_wave(&mut self) {
        self.aliens.clear();
        self.aliens.fill_rect(ALIEN_ROWS, ALIEN_COLS);
    }

    fn cannon_hit(&self) -> bool {
        let at = self.cannon_pos();
        self.aliens.get(at) || self.enemy.get(at)
    }

    /// Lowest alien in the occupied column closest to the cannon, ties
    /// going to the lower column.
    fn nearest_alien(&self) -> Option<Position> {
        let mut cols: SmallVec<[i32; 10]> = (0..GRID.cols() as i32).collect();
        cols.sort_by_key(|c| (c - self.cannon).abs());
        cols.into_iter()
            .find_map(|col| self.aliens.lowest_in_col(col).map(|row| Position::new(row, col)))
    }

    fn march(&mut self) {
        let interval = self.ramp.current_move_interval();
        let live = u32::try_from(self.aliens.count()).unwrap_or(u32::MAX);
        self.alien_move_timer.set(interval.min(live));

        let wall = match self.heading {
            Heading::Left => 0,
            Heading::Right => GRID.max_col(),
        };
        if self.aliens.col_occupied(wall) {
            self.heading = self.heading.reversed();
            if self.aliens.row_occupied(GRID.max_row()) {
                self.terminal = true;
            }
            self.aliens.shift_rows(1);
        } else {
            self.aliens.shift_cols(self.heading.dx());
        }
        if self.cannon_hit() {
            self.terminal = true;
        }
    }

    fn encode(&self, frame: &mut ObsFrame<'_>) {
        frame.set(CANNON, self.cannon_pos());
        frame.copy_mask(ALIEN, &self.aliens);
        let heading_channel = match self.heading {
            Heading::Left => ALIEN_LEFT,
            Heading::Right => ALIEN_RIGHT,
        };
        frame.copy_mask(heading_channel, &self.aliens);
        frame.copy_mask(FRIENDLY_BULLET, &self.friendly);
        frame.copy_mask(ENEMY_BULLET, &self.enemy);
    }
}

fn fresh_ramp(enabled: bool) -> Ramp {
    Ramp::new(enabled).move_interval(ALIEN_MOVE_INTERVAL, 1)
}

impl Game for SpaceInvaders {
    fn kind(&self) -> GameKind {
        GameKind::SpaceInvaders
    }

    fn reset(&mut self) {
        self.cannon = self.rng.below(2) as i32 + 5;
        self.shot_timer = Timer::ready_now();
        self.friendly.clear();
        self.enemy.clear();
        self.spawn_wave();
        self.heading = Heading::Left;
        self.ramp = fresh_ramp(self.ramping);
        self.alien_move_timer = Timer::new(ALIEN_MOVE_INTERVAL);
        self.alien_shot_timer = Timer::new(ALIEN_SHOT_INTERVAL);
        self.terminal = false;
        self.obs.invalidate();
    }

    fn act(&mut self, action: i32) -> Result<Transition, ActError> {
        if self.terminal {
            return Ok(Transition::ABSORBED);
        }
        let action = Action::resolve(action, self.terminal)?;
        self.obs.invalidate();

        match action {
            Action::Fire if self.shot_timer.ready() => {
                self.friendly.set(self.cannon_pos(), true);
                self.shot_timer.set(SHOT_COOLDOWN);
            }
            Action::Left | Action::Right => {
                let d_col = if action == Action::Left { -1 } else { 1 };
                if let Some(col) = resolve_axis(self.cannon + d_col, GRID.cols() as i32, EdgeBehavior::Clamp) {
                    self.cannon = col;
                }
            }
            _ => {}
        }

        self.friendly.shift_rows(-1);
        self.enemy.shift_rows(1);
        if self.cannon_hit() {
            self.terminal = true;
        }

        if self.alien_move_timer.ready() {
            self.march();
        }

        if self.alien_shot_timer.ready() {
            self.alien_shot_timer.set(ALIEN_SHOT_INTERVAL);
            if let Some(pos) = self.nearest_alien() {
                self.enemy.set(pos, true);
            }
        }

        let reward = self.aliens.remove_overlap(&mut self.friendly) as f64;

        self.shot_timer.tick();
        self.alien_move_timer.tick();
        self.alien_shot_timer.tick();

        if self.aliens.is_empty() {
            self.ramp.advance();
            self.spawn_wave();
        }

        Ok(Transition::new(reward, self.terminal))
    }

    fn state(&self) -> &[f32] {
        self.obs.get_or_encode(|f| self.encode(f))
    }

    fn state_shape(&self) -> [usize; 3] {
        self.obs.layout().shape()
    }

    fn minimal_action_set(&self) -> Vec<usize> {
        [Action::Noop, Action::Left, Action::Right, Action::Fire]
            .iter()
            .map(|a| a.code())
            .collect()
    }

    fn difficulty_ramp(&self) -> u32 {
        self.ramp.index()
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIRE: i32 = Action::Fire as i32;

    /// Hold the aliens still and silent so a scenario can play out.
    fn hold_fire(g: &mut SpaceInvaders) {
        g.alien_move_timer = Timer::new(100);
        g.alien_shot_timer = Timer::new(100);
    }

    #[test]
    fn reset_layout() {
        let g = SpaceInvaders::new(false, 21);
        assert!(g.cannon == 5 || g.cannon == 6);
        assert_eq!(g.aliens_left(), 24);
        assert_eq!(g.heading, Heading::Left);
        assert_eq!(g.state_shape(), [6, 10, 10]);
        let left = g.channel(ALIEN_LEFT.index()).unwrap();
        assert_eq!(left.iter().sum::<f32>(), 24.0);
        assert!(g.channel(ALIEN_RIGHT.index()).unwrap().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn fire_respects_cooldown() {
        let mut g = SpaceInvaders::new(false, 1);
        hold_fire(&mut g);
        g.act(FIRE).unwrap();
        assert_eq!(g.friendly.positions().collect::<Vec<_>>(), vec![Position::new(8, g.cannon)]);
        g.act(FIRE).unwrap();
        assert_eq!(g.friendly.positions().collect::<Vec<_>>(), vec![Position::new(7, g.cannon)]);
    }

    #[test]
    fn bullet_destroys_alien() {
        let mut g = SpaceInvaders::new(false, 2);
        hold_fire(&mut g);
        g.aliens.clear();
        g.aliens.set(Position::new(4, 3), true);
        g.aliens.set(Position::new(0, 0), true);
        g.friendly.set(Position::new(5, 3), true);
        let t = g.act(0).unwrap();
        assert_eq!(t.reward, 1.0);
        assert_eq!(g.aliens_left(), 1);
        assert!(g.friendly.is_empty());
    }

    #[test]
    fn cleared_wave_refills_and_ramps() {
        let mut g = SpaceInvaders::new(true, 3);
        hold_fire(&mut g);
        g.aliens.clear();
        g.aliens.set(Position::new(4, 3), true);
        g.friendly.set(Position::new(5, 3), true);
        g.act(0).unwrap();
        assert_eq!(g.aliens_left(), 24);
        assert_eq!(g.difficulty_ramp(), 1);
        assert_eq!(g.ramp.current_move_interval(), ALIEN_MOVE_INTERVAL - 1);
    }

    #[test]
    fn cleared_wave_without_ramping() {
        let mut g = SpaceInvaders::new(false, 3);
        hold_fire(&mut g);
        g.aliens.clear();
        g.aliens.set(Position::new(4, 3), true);
        g.friendly.set(Position::new(5, 3), true);
        g.act(0).unwrap();
        assert_eq!(g.aliens_left(), 24);
        assert_eq!(g.difficulty_ramp(), 0);
    }

    #[test]
    fn block_drops_and_reverses_at_wall() {
        let mut g = SpaceInvaders::new(false, 4);
        hold_fire(&mut g);
        g.aliens.clear();
        g.aliens.fill_rect(0..2, 0..3);
        g.alien_move_timer = Timer::ready_now();
        g.act(0).unwrap();
        assert_eq!(g.heading, Heading::Right);
        assert!(!g.aliens.row_occupied(0));
        assert!(g.aliens.row_occupied(2));
        // Six aliens left, so the timer restarts at six and ticks once.
        assert_eq!(g.alien_move_timer.remaining(), 5);
    }

    #[test]
    fn block_marches_toward_heading() {
        let mut g = SpaceInvaders::new(false, 4);
        hold_fire(&mut g);
        g.alien_move_timer = Timer::ready_now();
        g.act(0).unwrap();
        assert!(g.aliens.col_occupied(1));
        assert!(!g.aliens.col_occupied(7));
        assert_eq!(g.alien_move_timer.remaining(), ALIEN_MOVE_INTERVAL - 1);
    }

    #[test]
    fn aliens_fire_from_nearest_column_ties_low() {
        let mut g = SpaceInvaders::new(false, 5);
        hold_fire(&mut g);
        g.cannon = 5;
        g.aliens.clear();
        g.aliens.fill_rect(0..4, 2..3);
        g.aliens.fill_rect(0..2, 8..9);
        g.alien_shot_timer = Timer::ready_now();
        g.act(0).unwrap();
        assert_eq!(g.enemy.positions().collect::<Vec<_>>(), vec![Position::new(3, 2)]);
    }

    #[test]
    fn enemy_bullet_on_cannon_is_terminal() {
        let mut g = SpaceInvaders::new(false, 6);
        hold_fire(&mut g);
        g.enemy.set(Position::new(8, g.cannon), true);
        assert!(g.act(0).unwrap().terminal);
        assert_eq!(g.act(FIRE).unwrap(), Transition::ABSORBED);
    }

    #[test]
    fn march_sideways_onto_cannon_is_terminal() {
        let mut g = SpaceInvaders::new(false, 8);
        hold_fire(&mut g);
        g.cannon = 5;
        g.aliens.clear();
        g.aliens.set(Position::new(9, 6), true);
        g.alien_move_timer = Timer::ready_now();
        let t = g.act(0).unwrap();
        assert!(g.aliens.get(Position::new(9, 5)));
        assert_eq!(t, Transition::new(0.0, true));
    }

    #[test]
    fn march_drop_onto_cannon_is_terminal() {
        let mut g = SpaceInvaders::new(false, 8);
        hold_fire(&mut g);
        g.cannon = 0;
        g.aliens.clear();
        g.aliens.set(Position::new(8, 0), true);
        g.alien_move_timer = Timer::ready_now();
        let t = g.act(0).unwrap();
        assert_eq!(g.heading, Heading::Right);
        assert!(g.aliens.get(Position::new(9, 0)));
        assert!(t.terminal);
    }

    #[test]
    fn repeated_state_reads_match() {
        let mut g = SpaceInvaders::new(false, 7);
        g.act(FIRE).unwrap();
        let a = g.state().to_vec();
        let b = g.state().to_vec();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn cannon_and_aliens_bounded(seed in any::<u64>(), actions in proptest::collection::vec(0i32..6, 1..300)) {
            let mut g = SpaceInvaders::new(true, seed);
            for a in actions {
                g.act(a).unwrap();
                prop_assert!((0..=9).contains(&g.cannon));
                prop_assert!(g.aliens_left() <= 24);
                prop_assert!(g.aliens_left() > 0);
                prop_assert!(g.ramp.current_move_interval() >= 1);
            }
        }
    }
}
