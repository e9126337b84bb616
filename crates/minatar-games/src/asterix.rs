//! Asterix: dodge enemies and collect gold crossing eight lanes.
//!
//! The player moves freely inside rows `1..=8`. Enemies and gold enter
//! from either side, one per lane, and cross the board at the shared
//! move interval. Touching gold scores +1; touching an enemy ends the
//! episode.

use minatar_core::{ActError, Action, ChannelId, Game, GameKind, Timer, Transition};
use minatar_obs::{ObsCache, ObsFrame, ObsLayout};
use minatar_space::{resolve_axis_in, EdgeBehavior, GridShape, Heading, Position};
use smallvec::SmallVec;

use crate::ramp::Ramp;
use crate::rng::GameRng;

const GRID: GridShape = GridShape::MINATAR;
const START: Position = Position::new(5, 5);
const TOP_LANE: i32 = 1;
const BOTTOM_LANE: i32 = 8;

const SPAWN_INTERVAL: u32 = 10;
const MOVE_INTERVAL: u32 = 5;
const RAMP_INTERVAL: u32 = 100;
const MAX_ENTITIES: usize = 8;

const PLAYER: ChannelId = ChannelId(0);
const ENEMY: ChannelId = ChannelId(1);
const TRAIL: ChannelId = ChannelId(2);
const GOLD: ChannelId = ChannelId(3);

/// Observation channel names, in tensor order.
pub const CHANNELS: [&str; 4] = ["player", "enemy", "trail", "gold"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntityKind {
    Enemy,
    Gold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entity {
    pos: Position,
    heading: Heading,
    kind: EntityKind,
}

/// The Asterix engine.
#[derive(Debug)]
pub struct Asterix {
    rng: GameRng,
    ramping: bool,
    ramp: Ramp,
    player: Position,
    /// Slot `i` lives in lane `i + 1`.
    entities: [Option<Entity>; MAX_ENTITIES],
    spawn_timer: Timer,
    move_timer: Timer,
    ramp_timer: Timer,
    terminal: bool,
    obs: ObsCache,
}

impl Asterix {
    /// A fresh game. `ramping` enables the difficulty ramp.
    pub fn new(ramping: bool, seed: u64) -> Self {
        let mut game = Self {
            rng: GameRng::seed_from_u64(seed),
            ramping,
            ramp: fresh_ramp(ramping),
            player: START,
            entities: [None; MAX_ENTITIES],
            spawn_timer: Timer::new(SPAWN_INTERVAL),
            move_timer: Timer::new(MOVE_INTERVAL),
            ramp_timer: Timer::new(RAMP_INTERVAL),
            terminal: false,
            obs: ObsCache::new(ObsLayout::new(GRID, &CHANNELS)),
        };
        game.reset();
        game
    }

    /// Number of live enemies and gold.
    pub fn entity_count(&self) -> usize {
        self.entities.iter().flatten().count()
    }

    fn spawn_entity(&mut self) {
        let right = self.rng.coin();
        let gold = self.rng.one_in(3);

        let free: SmallVec<[usize; MAX_ENTITIES]> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_none())
            .map(|(i, _)| i)
            .collect();
        let Some(slot) = self.rng.pick(&free) else {
            return;
        };

        let col = if right { 0 } else { GRID.max_col() };
        self.entities[slot] = Some(Entity {
            pos: Position::new(slot as i32 + 1, col),
            heading: Heading::from_right(right),
            kind: if gold { EntityKind::Gold } else { EntityKind::Enemy },
        });
    }

    fn move_player(&mut self, action: Action) {
        let (d_row, d_col) = match action {
            Action::Left => (0, -1),
            Action::Right => (0, 1),
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Noop | Action::Fire => return,
        };
        let p = self.player.offset(d_row, d_col);
        let row = resolve_axis_in(p.row, TOP_LANE, BOTTOM_LANE, EdgeBehavior::Clamp);
        let col = resolve_axis_in(p.col, 0, GRID.max_col(), EdgeBehavior::Clamp);
        if let (Some(row), Some(col)) = (row, col) {
            self.player = Position::new(row, col);
        }
    }

    /// Collect gold on the player cell and flag enemy contact.
    fn resolve_contacts(&mut self) -> f64 {
        let mut reward = 0.0;
        for slot in self.entities.iter_mut() {
            let Some(e) = *slot else { continue };
            if e.pos != self.player {
                continue;
            }
            match e.kind {
                EntityKind::Gold => {
                    *slot = None;
                    reward += 1.0;
                }
                EntityKind::Enemy => self.terminal = true,
            }
        }
        reward
    }

    fn move_entities(&mut self) {
        for slot in self.entities.iter_mut() {
            let Some(mut e) = *slot else { continue };
            *slot = GRID
                .step(e.pos, 0, e.heading.dx(), EdgeBehavior::Despawn)
                .map(|pos| {
                    e.pos = pos;
                    e
                });
        }
    }

    fn encode(&self, frame: &mut ObsFrame<'_>) {
        frame.set(PLAYER, self.player);
        for e in self.entities.iter().flatten() {
            let channel = match e.kind {
                EntityKind::Enemy => ENEMY,
                EntityKind::Gold => GOLD,
            };
            frame.set(channel, e.pos);
            frame.set(TRAIL, e.pos.offset(0, -e.heading.dx()));
        }
    }
}

fn fresh_ramp(enabled: bool) -> Ramp {
    Ramp::new(enabled)
        .move_interval(MOVE_INTERVAL, 1)
        .spawn_interval(SPAWN_INTERVAL, 1)
        .alternate_move(true)
}

impl Game for Asterix {
    fn kind(&self) -> GameKind {
        GameKind::Asterix
    }

    fn reset(&mut self) {
        self.ramp = fresh_ramp(self.ramping);
        self.player = START;
        self.entities = [None; MAX_ENTITIES];
        self.spawn_timer = Timer::new(SPAWN_INTERVAL);
        self.move_timer = Timer::new(MOVE_INTERVAL);
        self.ramp_timer = Timer::new(RAMP_INTERVAL);
        self.terminal = false;
        self.obs.invalidate();
    }

    fn act(&mut self, action: i32) -> Result<Transition, ActError> {
        if self.terminal {
            return Ok(Transition::ABSORBED);
        }
        let action = Action::resolve(action, self.terminal)?;
        self.obs.invalidate();

        if self.spawn_timer.ready() {
            self.spawn_entity();
            self.spawn_timer.set(self.ramp.current_spawn_interval());
        }

        self.move_player(action);
        let mut reward = self.resolve_contacts();

        if self.move_timer.ready() {
            self.move_timer.set(self.ramp.current_move_interval());
            self.move_entities();
            reward += self.resolve_contacts();
        }

        self.spawn_timer.tick();
        self.move_timer.tick();

        if self.ramp.can_advance() {
            self.ramp_timer.tick();
            if self.ramp_timer.ready() {
                self.ramp.advance();
                self.ramp_timer.set(RAMP_INTERVAL);
            }
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
        [Action::Noop, Action::Left, Action::Up, Action::Right, Action::Down]
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
