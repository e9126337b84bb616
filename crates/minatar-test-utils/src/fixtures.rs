//! Mock games for exercising wrappers without real game dynamics.

use std::sync::{Arc, Mutex};

use minatar_core::{ActError, Action, Game, GameKind, Transition, NUM_ACTIONS};

/// Shared record of the actions a [`ScriptedGame`] received.
///
/// Clone the log before boxing the game; both handles see the same
/// entries.
#[derive(Clone, Debug, Default)]
pub struct ActionLog(Arc<Mutex<Vec<i32>>>);

impl ActionLog {
    fn push(&self, action: i32) {
        if let Ok(mut v) = self.0.lock() {
            v.push(action);
        }
    }

    fn clear(&self) {
        if let Ok(mut v) = self.0.lock() {
            v.clear();
        }
    }

    /// Actions received since construction or the last reset.
    pub fn actions(&self) -> Vec<i32> {
        self.0.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

/// A game with scripted rewards and a fixed episode length.
///
/// The observation is one `2x3` plane with a single cell lit at the
/// index of the last action received, so wrappers can be checked for
/// which action actually reached the game.
pub struct ScriptedGame {
    pub kind: GameKind,
    pub episode_len: usize,
    rewards: Vec<f64>,
    steps: usize,
    terminal: bool,
    cells: Vec<f32>,
    log: ActionLog,
}

impl ScriptedGame {
    /// A game that ends after `episode_len` steps, rewarding 0 per step.
    pub fn new(episode_len: usize) -> Self {
        Self {
            kind: GameKind::Breakout,
            episode_len,
            rewards: Vec::new(),
            steps: 0,
            terminal: false,
            cells: vec![0.0; NUM_ACTIONS],
            log: ActionLog::default(),
        }
    }

    /// Cycle through `rewards`, one per step.
    pub fn with_rewards(mut self, rewards: Vec<f64>) -> Self {
        self.rewards = rewards;
        self
    }

    /// Report `kind` from [`Game::kind`].
    pub fn with_kind(mut self, kind: GameKind) -> Self {
        self.kind = kind;
        self
    }

    /// A handle on the received-action log.
    pub fn log(&self) -> ActionLog {
        self.log.clone()
    }

    /// Steps taken this episode.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl Game for ScriptedGame {
    fn kind(&self) -> GameKind {
        self.kind
    }

    fn reset(&mut self) {
        self.steps = 0;
        self.terminal = false;
        self.cells.fill(0.0);
        self.log.clear();
    }

    fn act(&mut self, action: i32) -> Result<Transition, ActError> {
        if self.terminal {
            return Ok(Transition::ABSORBED);
        }
        let a = Action::resolve(action, self.terminal)?;
        self.log.push(action);
        self.cells.fill(0.0);
        self.cells[a.code()] = 1.0;

        let reward = if self.rewards.is_empty() {
            0.0
        } else {
            self.rewards[self.steps % self.rewards.len()]
        };
        self.steps += 1;
        self.terminal = self.steps >= self.episode_len;
        Ok(Transition::new(reward, self.terminal))
    }

    fn state(&self) -> &[f32] {
        &self.cells
    }

    fn state_shape(&self) -> [usize; 3] {
        [1, 2, 3]
    }

    fn minimal_action_set(&self) -> Vec<usize> {
        (0..NUM_ACTIONS).collect()
    }

    fn difficulty_ramp(&self) -> u32 {
        0
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}
