//! SeaQuest: pilot a submarine, shoot fish and enemy subs, rescue divers
//! and surface before the oxygen runs out.
//!
//! Surfacing with six divers aboard pays out a bonus proportional to the
//! remaining oxygen. Surfacing with fewer refills the tank at the cost of
//! one diver and ramps the difficulty; surfacing with none ends the
//! episode, as does running out of oxygen or touching an enemy or enemy
//! bullet.

use minatar_core::{ActError, Action, ChannelId, Game, GameKind, Timer, Transition};
use minatar_obs::{ObsCache, ObsFrame, ObsLayout};
use minatar_space::{EdgeBehavior, GridShape, Heading, Position};

use crate::ramp::Ramp;
use crate::rng::GameRng;

const GRID: GridShape = GridShape::MINATAR;
const START: Position = Position::new(0, 5);
const DEEPEST_ROW: i32 = 8;

const MAX_OXYGEN: u32 = 200;
const MAX_DIVERS: u32 = 6;
const ENEMY_SPAWN_INTERVAL: u32 = 20;
const ENEMY_MOVE_INTERVAL: u32 = 5;
const SHOT_COOLDOWN: u32 = 5;
const ENEMY_SHOT_INTERVAL: u32 = 10;
const DIVER_SPAWN_INTERVAL: u32 = 30;
const DIVER_MOVE_INTERVAL: u32 = 5;

const SUB_FRONT: ChannelId = ChannelId(0);
const SUB_BACK: ChannelId = ChannelId(1);
const FRIENDLY_BULLET: ChannelId = ChannelId(2);
const TRAIL: ChannelId = ChannelId(3);
const ENEMY_BULLET: ChannelId = ChannelId(4);
const ENEMY_FISH: ChannelId = ChannelId(5);
const ENEMY_SUB: ChannelId = ChannelId(6);
const OXYGEN_GAUGE: ChannelId = ChannelId(7);
const DIVER_GAUGE: ChannelId = ChannelId(8);
const DIVER: ChannelId = ChannelId(9);

/// Observation channel names, in tensor order.
pub const CHANNELS: [&str; 10] = [
    "sub_front",
    "sub_back",
    "friendly_bullet",
    "trail",
    "enemy_bullet",
    "enemy_fish",
    "enemy_sub",
    "oxygen_gauge",
    "diver_gauge",
    "diver",
];

/// Anything that swims across a lane on its own timer: fish, divers,
/// and the hull of an enemy sub.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Swimmer {
    pos: Position,
    heading: Heading,
    move_timer: Timer,
}

impl Swimmer {
    fn step(self) -> Option<Position> {
        GRID.step(self.pos, 0, self.heading.dx(), EdgeBehavior::Despawn)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct EnemySub {
    body: Swimmer,
    shot_timer: Timer,
}

/// Bullets travel one column every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bullet {
    pos: Position,
    heading: Heading,
}

/// What became of an enemy after its update.
enum Fate {
    Alive,
    Despawned,
    Shot,
}

/// The SeaQuest engine.
#[derive(Debug)]
pub struct SeaQuest {
    rng: GameRng,
    ramping: bool,
    ramp: Ramp,

    player: Position,
    facing: Heading,
    oxygen: u32,
    aboard: u32,
    at_surface: bool,
    shot_timer: Timer,

    friendly: Vec<Bullet>,
    enemy_bullets: Vec<Bullet>,
    fish: Vec<Swimmer>,
    subs: Vec<EnemySub>,
    divers: Vec<Swimmer>,
    enemy_spawn_timer: Timer,
    diver_spawn_timer: Timer,

    terminal: bool,
    obs: ObsCache,
}

impl SeaQuest {
    /// A fresh game. `ramping` enables the difficulty ramp on surfacing.
    pub fn new(ramping: bool, seed: u64) -> Self {
        let mut game = Self {
            rng: GameRng::seed_from_u64(seed),
            ramping,
            ramp: fresh_ramp(ramping),
            player: START,
            facing: Heading::Left,
            oxygen: MAX_OXYGEN,
            aboard: 0,
            at_surface: true,
            shot_timer: Timer::ready_now(),
            friendly: Vec::new(),
            enemy_bullets: Vec::new(),
            fish: Vec::new(),
            subs: Vec::new(),
            divers: Vec::new(),
            enemy_spawn_timer: Timer::new(ENEMY_SPAWN_INTERVAL),
            diver_spawn_timer: Timer::new(DIVER_SPAWN_INTERVAL),
            terminal: false,
            obs: ObsCache::new(ObsLayout::new(GRID, &CHANNELS)),
        };
        game.reset();
        game
    }

    /// Remaining oxygen, out of 200.
    pub fn oxygen(&self) -> u32 {
        self.oxygen
    }

    /// Divers currently aboard.
    pub fn divers_aboard(&self) -> u32 {
        self.aboard
    }

    /// The player's cell.
    pub fn player(&self) -> Position {
        self.player
    }

    // ── Spawning ───────────────────────────────────────────────────

    /// Spawn a fish or sub at a lane edge. A lane already holding an
    /// enemy heading the other way is skipped for this spawn.
    fn spawn_enemy(&mut self) {
        let right = self.rng.coin();
        let is_sub = self.rng.one_in(3);
        let row = self.rng.below(8) as i32 + 1;
        let heading = Heading::from_right(right);

        let blocked = self
            .fish
            .iter()
            .chain(self.subs.iter().map(|s| &s.body))
            .any(|e| e.pos.row == row && e.heading != heading);
        if blocked {
            return;
        }

        let body = Swimmer {
            pos: Position::new(row, edge_col(right)),
            heading,
            move_timer: Timer::new(self.ramp.current_move_interval()),
        };
        if is_sub {
            self.subs.push(EnemySub {
                body,
                shot_timer: Timer::new(ENEMY_SHOT_INTERVAL),
            });
        } else {
            self.fish.push(body);
        }
    }

    fn spawn_diver(&mut self) {
        let right = self.rng.coin();
        let row = self.rng.below(8) as i32 + 1;
        self.divers.push(Swimmer {
            pos: Position::new(row, edge_col(right)),
            heading: Heading::from_right(right),
            move_timer: Timer::new(DIVER_MOVE_INTERVAL),
        });
    }

    // ── Player ─────────────────────────────────────────────────────

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Fire => {
                if self.shot_timer.ready() {
                    self.friendly.push(Bullet {
                        pos: self.player,
                        heading: self.facing,
                    });
                    self.shot_timer.set(SHOT_COOLDOWN);
                }
            }
            Action::Left => {
                self.player.col = (self.player.col - 1).max(0);
                self.facing = Heading::Left;
            }
            Action::Right => {
                self.player.col = (self.player.col + 1).min(GRID.max_col());
                self.facing = Heading::Right;
            }
            Action::Up => self.player.row = (self.player.row - 1).max(0),
            Action::Down => self.player.row = (self.player.row + 1).min(DEEPEST_ROW),
            Action::Noop => {}
        }
    }

    fn pick_up(&mut self) -> bool {
        if self.aboard < MAX_DIVERS {
            self.aboard += 1;
            true
        } else {
            false
        }
    }

    // ── Per-entity updates ─────────────────────────────────────────

    fn update_friendly_bullet(&mut self, i: usize) -> f64 {
        let mut bullet = self.friendly[i];
        let Some(pos) = GRID.step(bullet.pos, 0, bullet.heading.dx(), EdgeBehavior::Despawn) else {
            self.friendly.remove(i);
            return 0.0;
        };
        bullet.pos = pos;
        self.friendly[i] = bullet;

        if let Some(j) = self.fish.iter().position(|f| f.pos == pos) {
            self.fish.remove(j);
        } else if let Some(j) = self.subs.iter().position(|s| s.body.pos == pos) {
            self.subs.remove(j);
        } else {
            return 0.0;
        }
        self.friendly.remove(i);
        1.0
    }

    fn update_diver(&mut self, i: usize) {
        let mut diver = self.divers[i];
        if diver.pos == self.player && self.pick_up() {
            self.divers.remove(i);
            return;
        }
        if !diver.move_timer.ready() {
            diver.move_timer.tick();
            self.divers[i] = diver;
            return;
        }
        diver.move_timer.set(DIVER_MOVE_INTERVAL);
        match diver.step() {
            None => {
                self.divers.remove(i);
            }
            Some(pos) if pos == self.player && self.pick_up() => {
                self.divers.remove(i);
            }
            Some(pos) => {
                diver.pos = pos;
                self.divers[i] = diver;
            }
        }
    }

    /// Contact, movement and bullet checks shared by fish and subs.
    /// A bullet that hits is consumed here.
    fn advance_enemy(&mut self, body: &mut Swimmer) -> Fate {
        if body.pos == self.player {
            self.terminal = true;
        }
        if !body.move_timer.ready() {
            body.move_timer.tick();
            return Fate::Alive;
        }
        body.move_timer.set(self.ramp.current_move_interval());
        let Some(pos) = body.step() else {
            return Fate::Despawned;
        };
        body.pos = pos;
        if pos == self.player {
            self.terminal = true;
            return Fate::Alive;
        }
        match self.friendly.iter().position(|b| b.pos == pos) {
            Some(j) => {
                self.friendly.remove(j);
                Fate::Shot
            }
            None => Fate::Alive,
        }
    }

    fn update_sub(&mut self, i: usize) -> f64 {
        let mut sub = self.subs[i];
        match self.advance_enemy(&mut sub.body) {
            Fate::Despawned => {
                self.subs.remove(i);
                return 0.0;
            }
            Fate::Shot => {
                self.subs.remove(i);
                return 1.0;
            }
            Fate::Alive => {}
        }
        if sub.shot_timer.ready() {
            sub.shot_timer.set(ENEMY_SHOT_INTERVAL);
            self.enemy_bullets.push(Bullet {
                pos: sub.body.pos,
                heading: sub.body.heading,
            });
        } else {
            sub.shot_timer.tick();
        }
        self.subs[i] = sub;
        0.0
    }

    fn update_fish(&mut self, i: usize) -> f64 {
        let mut fish = self.fish[i];
        match self.advance_enemy(&mut fish) {
            Fate::Despawned => {
                self.fish.remove(i);
                0.0
            }
            Fate::Shot => {
                self.fish.remove(i);
                1.0
            }
            Fate::Alive => {
                self.fish[i] = fish;
                0.0
            }
        }
    }

    fn update_enemy_bullet(&mut self, i: usize) {
        let mut bullet = self.enemy_bullets[i];
        if bullet.pos == self.player {
            self.terminal = true;
        }
        match GRID.step(bullet.pos, 0, bullet.heading.dx(), EdgeBehavior::Despawn) {
            None => {
                self.enemy_bullets.remove(i);
            }
            Some(pos) => {
                bullet.pos = pos;
                self.enemy_bullets[i] = bullet;
                if pos == self.player {
                    self.terminal = true;
                }
            }
        }
    }

    // ── Oxygen and surfacing ───────────────────────────────────────

    fn breathe(&mut self) -> f64 {
        if self.player.row > 0 {
            self.oxygen = self.oxygen.saturating_sub(1);
            self.at_surface = false;
            if self.oxygen == 0 {
                self.terminal = true;
            }
            return 0.0;
        }
        if self.at_surface {
            return 0.0;
        }
        if self.aboard == 0 {
            self.terminal = true;
            return 0.0;
        }
        self.surface()
    }

    fn surface(&mut self) -> f64 {
        self.at_surface = true;
        if self.aboard == MAX_DIVERS {
            self.aboard = 0;
            return f64::from(self.oxygen * 10 / MAX_OXYGEN);
        }
        self.oxygen = MAX_OXYGEN;
        self.aboard -= 1;
        self.ramp.advance();
        0.0
    }

    fn encode(&self, frame: &mut ObsFrame<'_>) {
        frame.set(SUB_FRONT, self.player);
        frame.set(SUB_BACK, self.player.offset(0, -self.facing.dx()));

        let bottom = GRID.max_row();
        let oxygen_cells = (self.oxygen * 10 / MAX_OXYGEN) as i32;
        frame.fill_row(OXYGEN_GAUGE, bottom, 0..oxygen_cells);
        let last = GRID.max_col();
        frame.fill_row(DIVER_GAUGE, bottom, (last - self.aboard as i32)..last);

        for b in &self.friendly {
            frame.set(FRIENDLY_BULLET, b.pos);
        }
        for b in &self.enemy_bullets {
            frame.set(ENEMY_BULLET, b.pos);
        }

        let swimmers = self
            .fish
            .iter()
            .map(|f| (ENEMY_FISH, f))
            .chain(self.subs.iter().map(|s| (ENEMY_SUB, &s.body)))
            .chain(self.divers.iter().map(|d| (DIVER, d)));
        for (channel, s) in swimmers {
            frame.set(channel, s.pos);
            frame.set(TRAIL, s.pos.offset(0, -s.heading.dx()));
        }
    }
}

fn fresh_ramp(enabled: bool) -> Ramp {
    Ramp::new(enabled)
        .move_interval(ENEMY_MOVE_INTERVAL, 2)
        .spawn_interval(ENEMY_SPAWN_INTERVAL, 1)
        .alternate_move(true)
}

fn edge_col(right: bool) -> i32 {
    if right {
        0
    } else {
        GRID.max_col()
    }
}

impl Game for SeaQuest {
    fn kind(&self) -> GameKind {
        GameKind::Seaquest
    }

    fn reset(&mut self) {
        self.ramp = fresh_ramp(self.ramping);
        self.player = START;
        self.facing = Heading::Left;
        self.oxygen = MAX_OXYGEN;
        self.aboard = 0;
        self.at_surface = true;
        self.shot_timer = Timer::ready_now();
        self.friendly.clear();
        self.enemy_bullets.clear();
        self.fish.clear();
        self.subs.clear();
        self.divers.clear();
        self.enemy_spawn_timer = Timer::new(ENEMY_SPAWN_INTERVAL);
        self.diver_spawn_timer = Timer::new(DIVER_SPAWN_INTERVAL);
        self.terminal = false;
        self.obs.invalidate();
    }

    fn act(&mut self, action: i32) -> Result<Transition, ActError> {
        if self.terminal {
            return Ok(Transition::ABSORBED);
        }
        let action = Action::resolve(action, self.terminal)?;
        self.obs.invalidate();

        if self.enemy_spawn_timer.ready() {
            self.spawn_enemy();
            self.enemy_spawn_timer.set(self.ramp.current_spawn_interval());
        }
        if self.diver_spawn_timer.ready() {
            self.spawn_diver();
            self.diver_spawn_timer.set(DIVER_SPAWN_INTERVAL);
        }

        self.apply_action(action);

        // Reverse order so removals leave pending indices valid.
        let mut reward = 0.0;
        for i in (0..self.friendly.len()).rev() {
            reward += self.update_friendly_bullet(i);
        }
        for i in (0..self.divers.len()).rev() {
            self.update_diver(i);
        }
        for i in (0..self.subs.len()).rev() {
            reward += self.update_sub(i);
        }
        for i in (0..self.enemy_bullets.len()).rev() {
            self.update_enemy_bullet(i);
        }
        for i in (0..self.fish.len()).rev() {
            reward += self.update_fish(i);
        }

        self.enemy_spawn_timer.tick();
        self.diver_spawn_timer.tick();
        self.shot_timer.tick();

        reward += self.breathe();
        Ok(Transition::new(reward, self.terminal))
    }

    fn state(&self) -> &[f32] {
        self.obs.get_or_encode(|f| self.encode(f))
    }

    fn state_shape(&self) -> [usize; 3] {
        self.obs.layout().shape()
    }

    fn minimal_action_set(&self) -> Vec<usize> {
        minatar_core::ACTION_SET.iter().map(|a| a.code()).collect()
    }

    fn difficulty_ramp(&self) -> u32 {
        self.ramp.index()
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}
