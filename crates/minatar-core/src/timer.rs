//! Saturating countdown timers gating movement and firing cadence.

/// An unsigned countdown that never goes below zero.
///
/// A timer is *ready* when it has reached zero. Games typically act on a
/// ready timer, [`set`](Self::set) it to its interval, and
/// [`tick`](Self::tick) it once at the end of each frame.
///
/// ```
/// use minatar_core::Timer;
///
/// let mut t = Timer::new(2);
/// assert!(!t.ready());
/// t.tick();
/// t.tick();
/// assert!(t.ready());
/// t.tick();
/// assert_eq!(t.remaining(), 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timer(u32);

impl Timer {
    /// A timer with `remaining` frames left.
    pub const fn new(remaining: u32) -> Self {
        Self(remaining)
    }

    /// A timer that is already ready.
    pub const fn ready_now() -> Self {
        Self(0)
    }

    /// Whether the countdown has reached zero.
    pub fn ready(&self) -> bool {
        self.0 == 0
    }

    /// Frames left before the timer is ready.
    pub fn remaining(&self) -> u32 {
        self.0
    }

    /// Restart the countdown at `remaining`.
    pub fn set(&mut self, remaining: u32) {
        self.0 = remaining;
    }

    /// Decrement by one, saturating at zero.
    pub fn tick(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }
}
