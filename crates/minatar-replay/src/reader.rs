//! Replay playback reader.
//!
//! [`ReplayReader`] reads frames from any `Read` source. The header is
//! validated on construction.

use std::io::Read;

use crate::codec::{decode_frame, decode_header};
use crate::error::ReplayError;
use crate::types::{Frame, ReplayHeader};

/// Reads replay data from a byte stream.
///
/// Generic over `R: Read` so tests can use `&[u8]` and production
/// code can use `BufReader<File>`.
pub struct ReplayReader<R: Read> {
    reader: R,
    header: ReplayHeader,
    frames_read: u64,
}

impl<R: Read> ReplayReader<R> {
    /// Open a replay stream, reading and validating the header.
    pub fn open(mut reader: R) -> Result<Self, ReplayError> {
        let header = decode_header(&mut reader)?;
        Ok(Self {
            reader,
            header,
            frames_read: 0,
        })
    }

    /// The replay header.
    pub fn header(&self) -> &ReplayHeader {
        &self.header
    }

    /// Read the next frame, or `None` if the stream is exhausted.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, ReplayError> {
        let frame = decode_frame(&mut self.reader)?;
        if frame.is_some() {
            self.frames_read += 1;
        }
        Ok(frame)
    }

    /// Number of frames read so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Convert into a frame iterator.
    pub fn frames(self) -> FrameIter<R> {
        FrameIter {
            reader: self.reader,
            done: false,
        }
    }
}

/// Iterator adapter over replay frames. Stops after the first error.
pub struct FrameIter<R: Read> {
    reader: R,
    done: bool,
}

impl<R: Read> Iterator for FrameIter<R> {
    type Item = Result<Frame, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match decode_frame(&mut self.reader) {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Input, Outcome};
    use crate::writer::ReplayWriter;
    use minatar_core::{GameKind, Transition};
    use minatar_engine::EnvConfig;

    fn header() -> ReplayHeader {
        ReplayHeader::new(&EnvConfig::new(GameKind::Asterix, 42), [4, 10, 10])
    }

    fn write_n(n: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut writer = ReplayWriter::new(&mut buf, header()).unwrap();
        for i in 0..n {
            let obs = vec![i as f32; 4];
            writer
                .record(Input::Act(1), Outcome::of_act(Ok(Transition::default()), &obs))
                .unwrap();
        }
        assert_eq!(writer.frames_written(), n);
        buf
    }

    #[test]
    fn roundtrip_write_read_frames() {
        let buf = write_n(5);
        let mut reader = ReplayReader::open(buf.as_slice()).unwrap();
        assert_eq!(reader.header(), &header());
        for step in 0..5u64 {
            let frame = reader.next_frame().unwrap().unwrap();
            assert_eq!(frame.step, step);
            assert_eq!(frame.input, Input::Act(1));
        }
        assert!(reader.next_frame().unwrap().is_none());
        assert_eq!(reader.frames_read(), 5);
    }

    #[test]
    fn frame_iterator_works() {
        let buf = write_n(3);
        let reader = ReplayReader::open(buf.as_slice()).unwrap();
        let frames: Vec<_> = reader.frames().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].step, 2);
    }

    #[test]
    fn truncated_stream_errors() {
        let mut buf = write_n(1);
        buf.truncate(buf.len() - 4);
        let mut reader = ReplayReader::open(buf.as_slice()).unwrap();
        assert!(reader.next_frame().is_err());
    }

    #[test]
    fn iterator_stops_after_error() {
        let mut buf = write_n(2);
        buf.truncate(buf.len() - 1);
        let reader = ReplayReader::open(buf.as_slice()).unwrap();
        let results: Vec<_> = reader.frames().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn bad_magic_on_open() {
        let data = b"XNTR\x01rest of data";
        let result = ReplayReader::open(data.as_slice());
        assert!(matches!(result, Err(ReplayError::InvalidMagic)));
    }
}
