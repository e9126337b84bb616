//! Difficulty ramp: a monotone index that shortens movement and spawn
//! intervals down to fixed floors.

/// Difficulty ramp controller.
///
/// Each [`advance`](Self::advance) decrements the spawn interval and the
/// move interval by one where they are above their floors, then bumps the
/// index. With [`alternate_move`](Self::alternate_move) the move interval
/// only shrinks on odd indices, so movement speeds up half as often as
/// spawning.
///
/// A disabled ramp never advances; games without a ramp report index 0.
///
/// ```
/// use minatar_games::Ramp;
///
/// let mut ramp = Ramp::new(true)
///     .move_interval(5, 1)
///     .spawn_interval(10, 1)
///     .alternate_move(true);
///
/// assert!(ramp.advance());
/// assert_eq!((ramp.current_move_interval(), ramp.current_spawn_interval()), (5, 9));
/// assert!(ramp.advance());
/// assert_eq!((ramp.current_move_interval(), ramp.current_spawn_interval()), (4, 8));
/// assert_eq!(ramp.index(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ramp {
    enabled: bool,
    index: u32,
    move_interval: u32,
    move_floor: u32,
    spawn_interval: u32,
    spawn_floor: u32,
    alternate_move: bool,
}

impl Ramp {
    /// A ramp with both intervals at zero. Configure it with the builder
    /// methods.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            index: 0,
            move_interval: 0,
            move_floor: 0,
            spawn_interval: 0,
            spawn_floor: 0,
            alternate_move: false,
        }
    }

    /// Starting move interval and the value it never drops below.
    pub fn move_interval(mut self, start: u32, floor: u32) -> Self {
        self.move_interval = start;
        self.move_floor = floor;
        self
    }

    /// Starting spawn interval and the value it never drops below.
    pub fn spawn_interval(mut self, start: u32, floor: u32) -> Self {
        self.spawn_interval = start;
        self.spawn_floor = floor;
        self
    }

    /// Only shrink the move interval on odd ramp indices.
    pub fn alternate_move(mut self, on: bool) -> Self {
        self.alternate_move = on;
        self
    }

    /// Whether the ramp is enabled and some interval is still above its floor.
    pub fn can_advance(&self) -> bool {
        self.enabled
            && (self.spawn_interval > self.spawn_floor || self.move_interval > self.move_floor)
    }

    /// Step the ramp once. Returns `false` (and changes nothing) if it
    /// cannot advance.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        let move_turn = !self.alternate_move || self.index % 2 == 1;
        if self.move_interval > self.move_floor && move_turn {
            self.move_interval -= 1;
        }
        if self.spawn_interval > self.spawn_floor {
            self.spawn_interval -= 1;
        }
        self.index += 1;
        true
    }

    /// Number of times the ramp has advanced.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Current move interval.
    pub fn current_move_interval(&self) -> u32 {
        self.move_interval
    }

    /// Current spawn interval.
    pub fn current_spawn_interval(&self) -> u32 {
        self.spawn_interval
    }
}
