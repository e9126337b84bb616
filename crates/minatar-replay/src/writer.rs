//! Replay recording writer.
//!
//! [`ReplayWriter`] streams frames to any `Write` sink. The header is
//! written immediately on construction.

use std::io::Write;

use minatar_core::{ActError, Game, Transition};

use crate::codec::{encode_frame, encode_header};
use crate::error::ReplayError;
use crate::types::{Frame, Input, Outcome, ReplayHeader};

/// Writes replay data to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use minatar_core::{Game, GameKind};
/// use minatar_engine::{EnvConfig, Environment};
/// use minatar_replay::{ReplayHeader, ReplayReader, ReplayWriter};
///
/// let config = EnvConfig::new(GameKind::Breakout, 7);
/// let mut env = Environment::new(config.clone()).unwrap();
///
/// let mut buf = Vec::new();
/// let mut writer =
///     ReplayWriter::new(&mut buf, ReplayHeader::new(&config, env.state_shape())).unwrap();
/// for a in [0, 1, 3, 3] {
///     writer.act(&mut env, a).unwrap().unwrap();
/// }
/// assert_eq!(writer.frames_written(), 4);
/// drop(writer);
///
/// let mut reader = ReplayReader::open(buf.as_slice()).unwrap();
/// assert_eq!(reader.header().env_config(), config);
/// assert_eq!(reader.next_frame().unwrap().unwrap().step, 0);
/// ```
pub struct ReplayWriter<W: Write> {
    writer: W,
    header: ReplayHeader,
    frames_written: u64,
}

impl<W: Write> ReplayWriter<W> {
    /// Create a new replay writer, immediately writing the header.
    pub fn new(mut writer: W, header: ReplayHeader) -> Result<Self, ReplayError> {
        encode_header(&mut writer, &header)?;
        Ok(Self {
            writer,
            header,
            frames_written: 0,
        })
    }

    /// The header this writer was opened with.
    pub fn header(&self) -> &ReplayHeader {
        &self.header
    }

    /// Record one input and its outcome as the next frame.
    pub fn record(&mut self, input: Input, outcome: Outcome) -> Result<(), ReplayError> {
        let frame = Frame::new(self.frames_written, input, outcome);
        self.write_frame(&frame)
    }

    /// Forward `action` to `game` and record the result.
    ///
    /// The outer `Result` is the recording; the inner one is the game's
    /// own answer, passed through untouched.
    pub fn act(
        &mut self,
        game: &mut dyn Game,
        action: i32,
    ) -> Result<Result<Transition, ActError>, ReplayError> {
        let result = game.act(action);
        self.record(Input::Act(action), Outcome::of_act(result, game.state()))?;
        Ok(result)
    }

    /// Reset `game` and record the fresh observation.
    pub fn reset(&mut self, game: &mut dyn Game) -> Result<(), ReplayError> {
        game.reset();
        self.record(Input::Reset, Outcome::of_reset(game.state()))
    }

    /// Write a pre-built frame directly. The frame's own `step` is kept.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), ReplayError> {
        encode_frame(&mut self.writer, frame)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), ReplayError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
