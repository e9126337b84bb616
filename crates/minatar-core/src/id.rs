//! Game identifiers and strongly-typed channel indices.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Identifies one of the five games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameKind {
    /// Catch gold, dodge enemies.
    Asterix,
    /// Paddle, ball, three rows of bricks.
    Breakout,
    /// Chicken crossing eight lanes of traffic.
    Freeway,
    /// Submarine with oxygen, divers and two kinds of enemy.
    Seaquest,
    /// Cannon versus a marching alien block.
    SpaceInvaders,
}

impl GameKind {
    /// All games, in a fixed order.
    pub const ALL: [GameKind; 5] = [
        GameKind::Asterix,
        GameKind::Breakout,
        GameKind::Freeway,
        GameKind::Seaquest,
        GameKind::SpaceInvaders,
    ];

    /// Human-readable display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Asterix => "Asterix",
            Self::Breakout => "Breakout",
            Self::Freeway => "Freeway",
            Self::Seaquest => "SeaQuest",
            Self::SpaceInvaders => "Space Invaders",
        }
    }

    /// Stable single-byte tag, used by the replay format.
    pub fn tag(self) -> u8 {
        match self {
            Self::Asterix => 0,
            Self::Breakout => 1,
            Self::Freeway => 2,
            Self::Seaquest => 3,
            Self::SpaceInvaders => 4,
        }
    }

    /// Inverse of [`tag`](Self::tag).
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses case-insensitively, ignoring spaces, `_` and `-`, so
/// `"Space Invaders"`, `"space_invaders"` and `"spaceinvaders"` all match.
impl FromStr for GameKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "asterix" => Ok(Self::Asterix),
            "breakout" => Ok(Self::Breakout),
            "freeway" => Ok(Self::Freeway),
            "seaquest" => Ok(Self::Seaquest),
            "spaceinvaders" => Ok(Self::SpaceInvaders),
            _ => Err(ConfigError::UnknownGame { name: s.to_owned() }),
        }
    }
}

/// Index of one channel within an observation tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u32);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ChannelId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl ChannelId {
    /// The index as a `usize`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
