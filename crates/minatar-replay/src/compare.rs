//! Observation comparison and replay verification.
//!
//! Hash-first comparison (fast path) with a cell-exact fallback on
//! mismatch, plus a streaming replay-and-compare driver.

use std::io::Read;

use minatar_core::Game;
use minatar_engine::Environment;

use crate::error::ReplayError;
use crate::hash::obs_hash;
use crate::reader::ReplayReader;
use crate::types::{Input, Outcome};

/// A single cell that differs between recorded and replayed observations.
#[derive(Clone, Debug, PartialEq)]
pub struct CellDivergence {
    /// Flat index into the observation.
    pub index: usize,
    /// Channel of the cell.
    pub channel: usize,
    /// Row of the cell.
    pub row: usize,
    /// Column of the cell.
    pub col: usize,
    /// Value in the original run.
    pub recorded: f32,
    /// Value in the current run.
    pub replayed: f32,
}

/// What diverged first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DivergenceKind {
    /// Rewards differ (compared bit-exactly).
    Reward {
        /// Reward in the original run.
        recorded: f64,
        /// Reward in the current run.
        replayed: f64,
    },
    /// Terminal flags differ.
    Terminal {
        /// Flag in the original run.
        recorded: bool,
        /// Flag in the current run.
        replayed: bool,
    },
    /// Observation hashes differ.
    Observation {
        /// Hash in the original run.
        recorded: u64,
        /// Hash in the current run.
        replayed: u64,
    },
}

/// The first divergence found in a replay.
#[derive(Clone, Debug)]
pub struct DivergenceReport {
    /// Frame at which divergence was detected.
    pub step: u64,
    /// What diverged.
    pub kind: DivergenceKind,
    /// Cell-level detail. Empty unless the recorded observation was
    /// available for comparison.
    pub cells: Vec<CellDivergence>,
}

/// Compare a replayed observation against a recorded hash.
///
/// Fast path: hash and compare. If the hashes match, returns `None`. On
/// mismatch, and if `recorded` is given, falls back to a cell-by-cell
/// comparison to name exactly which cells differ. `shape` is
/// `[channels, rows, cols]` and only used to locate cells.
pub fn compare_observation(
    replayed: &[f32],
    recorded_hash: u64,
    shape: [usize; 3],
    step: u64,
    recorded: Option<&[f32]>,
) -> Option<DivergenceReport> {
    let replayed_hash = obs_hash(replayed);
    if replayed_hash == recorded_hash {
        return None;
    }

    let [_, rows, cols] = shape;
    let plane = (rows * cols).max(1);
    let locate = |index: usize, recorded: f32, replayed: f32| CellDivergence {
        index,
        channel: index / plane,
        row: (index % plane) / cols.max(1),
        col: index % cols.max(1),
        recorded,
        replayed,
    };

    let mut cells = Vec::new();
    if let Some(rec) = recorded {
        for (i, (&rv, &pv)) in rec.iter().zip(replayed).enumerate() {
            if rv.to_bits() != pv.to_bits() {
                cells.push(locate(i, rv, pv));
            }
        }
        // Length mismatch
        if rec.len() != replayed.len() {
            cells.push(locate(rec.len().min(replayed.len()), 0.0, 0.0));
        }
    }

    Some(DivergenceReport {
        step,
        kind: DivergenceKind::Observation {
            recorded: recorded_hash,
            replayed: replayed_hash,
        },
        cells,
    })
}

/// Replay a recording through a caller-provided step function and
/// compare every outcome.
///
/// `step_fn` receives each recorded [`Input`], applies it, and returns
/// the resulting [`Outcome`]. Reward, terminal flag and observation hash
/// are compared in that order.
///
/// Returns `Ok(None)` if every frame matches, or `Ok(Some(report))` at
/// the first divergence. The report carries no cell detail, since the
/// recording only holds hashes.
pub fn replay_and_compare<R: Read>(
    mut reader: ReplayReader<R>,
    step_fn: &mut dyn FnMut(Input) -> Result<Outcome, ReplayError>,
) -> Result<Option<DivergenceReport>, ReplayError> {
    while let Some(frame) = reader.next_frame()? {
        let got = step_fn(frame.input)?;
        let want = frame.outcome();

        let kind = if got.reward.to_bits() != want.reward.to_bits() {
            DivergenceKind::Reward {
                recorded: want.reward,
                replayed: got.reward,
            }
        } else if got.terminal != want.terminal {
            DivergenceKind::Terminal {
                recorded: want.terminal,
                replayed: got.terminal,
            }
        } else if got.obs_hash != want.obs_hash {
            DivergenceKind::Observation {
                recorded: want.obs_hash,
                replayed: got.obs_hash,
            }
        } else {
            continue;
        };
        return Ok(Some(DivergenceReport {
            step: frame.step,
            kind,
            cells: Vec::new(),
        }));
    }
    Ok(None)
}

/// Rebuild the recorded environment from the header and replay every
/// frame through it.
///
/// # Errors
///
/// Returns [`ReplayError::Config`] if the recorded configuration is
/// invalid, [`ReplayError::ShapeMismatch`] if the rebuilt game encodes a
/// different observation shape, or any decoding error.
pub fn verify_replay<R: Read>(reader: ReplayReader<R>) -> Result<Option<DivergenceReport>, ReplayError> {
    let header = reader.header().clone();
    let mut env = Environment::new(header.env_config())?;

    let current = env
        .state_shape()
        .map(|d| u32::try_from(d).unwrap_or(u32::MAX));
    if current != header.obs_shape {
        return Err(ReplayError::ShapeMismatch {
            recorded: header.obs_shape,
            current,
        });
    }

    let report = replay_and_compare(reader, &mut |input| {
        Ok(match input {
            Input::Reset => {
                env.reset();
                Outcome::of_reset(env.state())
            }
            Input::Act(code) => {
                let result = env.act(code);
                Outcome::of_act(result, env.state())
            }
        })
    })?;

    match &report {
        Some(r) => tracing::warn!(
            game = %header.game,
            seed = header.seed,
            step = r.step,
            kind = ?r.kind,
            "replay diverged"
        ),
        None => tracing::debug!(game = %header.game, seed = header.seed, "replay verified"),
    }
    Ok(report)
}
