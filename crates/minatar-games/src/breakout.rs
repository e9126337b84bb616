//! Breakout: keep a diagonal ball in play with a paddle and clear a
//! three-row brick wall.
//!
//! Each brick scores +1. When the wall is empty it is rebuilt the next
//! time the ball reaches the bottom row. Missing the ball ends the
//! episode. There is no difficulty ramp.

use minatar_core::{ActError, Action, ChannelId, Game, GameKind, Transition};
use minatar_obs::{ObsCache, ObsFrame, ObsLayout};
use minatar_space::{resolve_axis, CellMask, EdgeBehavior, GridShape, Position};

use crate::rng::GameRng;

const GRID: GridShape = GridShape::MINATAR;
const PADDLE_START: i32 = 4;
const BALL_START_ROW: i32 = 3;
const BRICK_ROWS: std::ops::Range<i32> = 1..4;

const PADDLE: ChannelId = ChannelId(0);
const BALL: ChannelId = ChannelId(1);
const TRAIL: ChannelId = ChannelId(2);
const BRICK: ChannelId = ChannelId(3);

/// Observation channel names, in tensor order.
pub const CHANNELS: [&str; 4] = ["paddle", "ball", "trail", "brick"];

/// Diagonal ball heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BallDir {
    UpLeft,
    UpRight,
    DownRight,
    DownLeft,
}

impl BallDir {
    fn delta(self) -> (i32, i32) {
        match self {
            Self::UpLeft => (-1, -1),
            Self::UpRight => (-1, 1),
            Self::DownRight => (1, 1),
            Self::DownLeft => (1, -1),
        }
    }

    /// Bounce off a side wall.
    fn flip_horizontal(self) -> Self {
        match self {
            Self::UpLeft => Self::UpRight,
            Self::UpRight => Self::UpLeft,
            Self::DownRight => Self::DownLeft,
            Self::DownLeft => Self::DownRight,
        }
    }

    /// Bounce off the ceiling, a brick, or the paddle face.
    fn flip_vertical(self) -> Self {
        match self {
            Self::UpLeft => Self::DownLeft,
            Self::UpRight => Self::DownRight,
            Self::DownRight => Self::UpRight,
            Self::DownLeft => Self::UpLeft,
        }
    }

    /// Bounce off the paddle's side: straight back the way it came.
    fn reverse(self) -> Self {
        match self {
            Self::UpLeft => Self::DownRight,
            Self::UpRight => Self::DownLeft,
            Self::DownRight => Self::UpLeft,
            Self::DownLeft => Self::UpRight,
        }
    }
}

/// The Breakout engine.
#[derive(Debug)]
pub struct Breakout {
    rng: GameRng,
    paddle: i32,
    ball: Position,
    last: Position,
    dir: BallDir,
    bricks: CellMask,
    /// Set on the frame a brick is broken; a ball still touching bricks
    /// on the next frame passes through instead of scoring again.
    strike: bool,
    terminal: bool,
    obs: ObsCache,
}

impl Breakout {
    /// A fresh game. Breakout has no difficulty ramp, so `_ramping` is
    /// accepted for a uniform constructor and ignored.
    pub fn new(_ramping: bool, seed: u64) -> Self {
        let start = Position::new(BALL_START_ROW, 0);
        let mut game = Self {
            rng: GameRng::seed_from_u64(seed),
            paddle: PADDLE_START,
            ball: start,
            last: start,
            dir: BallDir::DownRight,
            bricks: CellMask::new(GRID),
            strike: false,
            terminal: false,
            obs: ObsCache::new(ObsLayout::new(GRID, &CHANNELS)),
        };
        game.reset();
        game
    }

    /// Number of bricks still standing.
    pub fn bricks_left(&self) -> usize {
        self.bricks.count()
    }

    /// Column of the paddle.
    pub fn paddle_col(&self) -> i32 {
        self.paddle
    }

    /// Current ball cell.
    pub fn ball(&self) -> Position {
        self.ball
    }

    fn build_wall(&mut self) {
        self.bricks.clear();
        self.bricks.fill_rect(BRICK_ROWS, 0..GRID.cols() as i32);
    }

    fn move_ball(&mut self) -> f64 {
        let mut reward = 0.0;
        self.last = self.ball;
        let (d_row, d_col) = self.dir.delta();
        let mut next = self.ball.offset(d_row, d_col);
        let mut struck = false;

        if !(0..=GRID.max_col()).contains(&next.col) {
            next.col = next.col.clamp(0, GRID.max_col());
            self.dir = self.dir.flip_horizontal();
        }

        if next.row < 0 {
            next.row = 0;
            self.dir = self.dir.flip_vertical();
        } else if self.bricks.get(next) {
            struck = true;
            if !self.strike {
                reward += 1.0;
                self.strike = true;
                self.bricks.set(next, false);
                next.row = self.last.row;
                self.dir = self.dir.flip_vertical();
            }
        } else if next.row == GRID.max_row() {
            if self.bricks.is_empty() {
                self.build_wall();
            }
            if self.last.col == self.paddle {
                self.dir = self.dir.flip_vertical();
                next.row = self.last.row;
            } else if next.col == self.paddle {
                self.dir = self.dir.reverse();
                next.row = self.last.row;
            } else {
                self.terminal = true;
            }
        }

        if !struck {
            self.strike = false;
        }
        self.ball = next;
        reward
    }

    fn encode(&self, frame: &mut ObsFrame<'_>) {
        frame.set(PADDLE, Position::new(GRID.max_row(), self.paddle));
        frame.set(BALL, self.ball);
        frame.set(TRAIL, self.last);
        frame.copy_mask(BRICK, &self.bricks);
    }
}

impl Game for Breakout {
    fn kind(&self) -> GameKind {
        GameKind::Breakout
    }

    fn reset(&mut self) {
        let (col, dir) = if self.rng.coin() {
            (GRID.max_col(), BallDir::DownLeft)
        } else {
            (0, BallDir::DownRight)
        };
        self.ball = Position::new(BALL_START_ROW, col);
        self.last = self.ball;
        self.dir = dir;
        self.paddle = PADDLE_START;
        self.build_wall();
        self.strike = false;
        self.terminal = false;
        self.obs.invalidate();
    }

    fn act(&mut self, action: i32) -> Result<Transition, ActError> {
        if self.terminal {
            return Ok(Transition::ABSORBED);
        }
        let action = Action::resolve(action, self.terminal)?;
        self.obs.invalidate();

        let d_col = match action {
            Action::Left => -1,
            Action::Right => 1,
            _ => 0,
        };
        if let Some(col) = resolve_axis(self.paddle + d_col, GRID.cols() as i32, EdgeBehavior::Clamp) {
            self.paddle = col;
        }

        let reward = self.move_ball();
        Ok(Transition::new(reward, self.terminal))
    }

    fn state(&self) -> &[f32] {
        self.obs.get_or_encode(|f| self.encode(f))
    }

    fn state_shape(&self) -> [usize; 3] {
        self.obs.layout().shape()
    }

    fn minimal_action_set(&self) -> Vec<usize> {
        vec![Action::Noop.code(), Action::Left.code(), Action::Right.code()]
    }

    fn difficulty_ramp(&self) -> u32 {
        0
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}
