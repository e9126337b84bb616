//! Freeway: guide a chicken across eight lanes of wrapping traffic.
//!
//! Each crossing scores +1 and re-rolls every car's speed and heading.
//! A car on the chicken's cell sends it back to the bottom row. The
//! episode ends after a fixed frame budget.

use minatar_core::{ActError, Action, ChannelId, Game, GameKind, Timer, Transition};
use minatar_obs::{ObsCache, ObsFrame, ObsLayout};
use minatar_space::{resolve_axis, EdgeBehavior, GridShape, Heading, Position};

use crate::rng::GameRng;

const GRID: GridShape = GridShape::MINATAR;
const LANES: usize = 8;
const CHICKEN_COL: i32 = 4;
const PLAYER_MOVE_INTERVAL: u32 = 3;
const FRAME_BUDGET: u32 = 2500;
const MAX_SPEED: u32 = 5;

const CHICKEN: ChannelId = ChannelId(0);
const CAR: ChannelId = ChannelId(1);

/// Observation channel names, in tensor order.
pub const CHANNELS: [&str; 7] = [
    "chicken", "car", "speed1", "speed2", "speed3", "speed4", "speed5",
];

/// Car speed class in `1..=5`. A car of speed `s` moves once every
/// `s + 1` frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Speed(u32);

impl Speed {
    fn from_draw(draw: u32) -> Self {
        Self(draw % MAX_SPEED + 1)
    }

    fn trail_channel(self) -> ChannelId {
        ChannelId(1 + self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Car {
    pos: Position,
    heading: Heading,
    speed: Speed,
    timer: Timer,
}

/// The Freeway engine.
#[derive(Debug)]
pub struct Freeway {
    rng: GameRng,
    cars: [Car; LANES],
    chicken_row: i32,
    move_timer: Timer,
    frames_left: u32,
    terminal: bool,
    obs: ObsCache,
}

impl Freeway {
    /// A fresh game. Freeway has no difficulty ramp, so `_ramping` is
    /// ignored.
    pub fn new(_ramping: bool, seed: u64) -> Self {
        let parked = Car {
            pos: Position::new(0, 0),
            heading: Heading::Right,
            speed: Speed(1),
            timer: Timer::ready_now(),
        };
        let mut game = Self {
            rng: GameRng::seed_from_u64(seed),
            cars: [parked; LANES],
            chicken_row: GRID.max_row(),
            move_timer: Timer::new(PLAYER_MOVE_INTERVAL),
            frames_left: FRAME_BUDGET,
            terminal: false,
            obs: ObsCache::new(ObsLayout::new(GRID, &CHANNELS)),
        };
        game.reset();
        game
    }

    /// Frames remaining before the episode ends.
    pub fn frames_left(&self) -> u32 {
        self.frames_left
    }

    /// Row of the chicken.
    pub fn chicken_row(&self) -> i32 {
        self.chicken_row
    }

    fn chicken(&self) -> Position {
        Position::new(self.chicken_row, CHICKEN_COL)
    }

    /// Re-roll every car's heading and speed. On `init` the cars are also
    /// parked at column 0 of their lanes.
    fn randomize_cars(&mut self, init: bool) {
        let mut headings = [Heading::Right; LANES];
        for h in headings.iter_mut() {
            *h = Heading::from_right(self.rng.coin());
        }
        let mut speeds = [Speed(1); LANES];
        for s in speeds.iter_mut() {
            *s = Speed::from_draw(self.rng.below(MAX_SPEED));
        }

        for (lane, car) in self.cars.iter_mut().enumerate() {
            if init {
                car.pos = Position::new(lane as i32 + 1, 0);
            }
            car.heading = headings[lane];
            car.speed = speeds[lane];
            car.timer = Timer::new(car.speed.0);
        }
    }

    fn move_chicken(&mut self, action: Action) {
        let d_row = match action {
            Action::Up => -1,
            Action::Down => 1,
            _ => return,
        };
        if !self.move_timer.ready() {
            return;
        }
        self.move_timer.set(PLAYER_MOVE_INTERVAL);
        if let Some(row) = resolve_axis(self.chicken_row + d_row, GRID.rows() as i32, EdgeBehavior::Clamp) {
            self.chicken_row = row;
        }
    }

    fn update_cars(&mut self) {
        for i in 0..LANES {
            let mut car = self.cars[i];
            if car.pos == self.chicken() {
                self.chicken_row = GRID.max_row();
            }
            if car.timer.ready() {
                car.timer.set(car.speed.0);
                if let Some(pos) = GRID.step(car.pos, 0, car.heading.dx(), EdgeBehavior::Wrap) {
                    car.pos = pos;
                }
                if car.pos == self.chicken() {
                    self.chicken_row = GRID.max_row();
                }
            } else {
                car.timer.tick();
            }
            self.cars[i] = car;
        }
    }

    fn encode(&self, frame: &mut ObsFrame<'_>) {
        frame.set(CHICKEN, self.chicken());
        for car in &self.cars {
            frame.set(CAR, car.pos);
            let back = GRID.step(car.pos, 0, -car.heading.dx(), EdgeBehavior::Wrap);
            if let Some(back) = back {
                frame.set(car.speed.trail_channel(), back);
            }
        }
    }
}

impl Game for Freeway {
    fn kind(&self) -> GameKind {
        GameKind::Freeway
    }

    fn reset(&mut self) {
        self.randomize_cars(true);
        self.chicken_row = GRID.max_row();
        self.move_timer = Timer::new(PLAYER_MOVE_INTERVAL);
        self.frames_left = FRAME_BUDGET;
        self.terminal = false;
        self.obs.invalidate();
    }

    fn act(&mut self, action: i32) -> Result<Transition, ActError> {
        if self.terminal {
            return Ok(Transition::ABSORBED);
        }
        let action = Action::resolve(action, self.terminal)?;
        self.obs.invalidate();

        let mut reward = 0.0;
        self.move_chicken(action);
        if self.chicken_row == 0 {
            reward += 1.0;
            self.randomize_cars(false);
            self.chicken_row = GRID.max_row();
        }

        self.update_cars();

        self.move_timer.tick();
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left == 0 {
            self.terminal = true;
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
        vec![Action::Noop.code(), Action::Up.code(), Action::Down.code()]
    }

    fn difficulty_ramp(&self) -> u32 {
        0
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}
