//! Error types for the replay system.

use std::fmt;
use std::io;

use minatar_core::ConfigError;

/// Errors that can occur during replay recording, playback, or comparison.
#[derive(Debug)]
pub enum ReplayError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The file does not start with the expected `b"MNTR"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the file.
        found: u8,
    },
    /// A frame or header could not be decoded (truncated or corrupt data).
    MalformedFrame {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The header names a game tag this build does not know.
    UnknownGame {
        /// The unrecognized tag.
        tag: u8,
    },
    /// The recorded configuration cannot build an environment.
    Config(ConfigError),
    /// The rebuilt environment encodes a different observation shape.
    ShapeMismatch {
        /// Shape from the replay header.
        recorded: [u32; 3],
        /// Shape of the rebuilt environment.
        current: [u32; 3],
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"MNTR\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::MalformedFrame { detail } => write!(f, "malformed frame: {detail}"),
            Self::UnknownGame { tag } => write!(f, "unknown game tag {tag}"),
            Self::Config(e) => write!(f, "recorded config is invalid: {e}"),
            Self::ShapeMismatch { recorded, current } => write!(
                f,
                "observation shape mismatch: recorded={recorded:?}, current={current:?}"
            ),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigError> for ReplayError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
