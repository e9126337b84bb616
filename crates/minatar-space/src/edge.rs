//! Edge (boundary) behavior for entities leaving the board.

/// What happens when an entity steps past the edge of its allowed range.
///
/// # Examples
///
/// ```
/// use minatar_space::{resolve_axis, EdgeBehavior};
///
/// assert_eq!(resolve_axis(-1, 10, EdgeBehavior::Clamp), Some(0));
/// assert_eq!(resolve_axis(-1, 10, EdgeBehavior::Wrap), Some(9));
/// assert_eq!(resolve_axis(-1, 10, EdgeBehavior::Despawn), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Position saturates at the edge.
    Clamp,
    /// Position reappears at the opposite edge (periodic).
    Wrap,
    /// The entity is removed.
    Despawn,
}

/// Resolve a single axis value against `[0, len)`.
///
/// Returns `Some(resolved)` or `None` when a [`Despawn`](EdgeBehavior::Despawn)
/// entity has left the range. `len` must be positive.
pub fn resolve_axis(val: i32, len: i32, edge: EdgeBehavior) -> Option<i32> {
    resolve_axis_in(val, 0, len - 1, edge)
}

/// Resolve a single axis value against the inclusive range `[lo, hi]`.
///
/// Used where the player is confined to a band narrower than the board,
/// e.g. the Asterix lanes `1..=8`.
pub fn resolve_axis_in(val: i32, lo: i32, hi: i32, edge: EdgeBehavior) -> Option<i32> {
    if val >= lo && val <= hi {
        return Some(val);
    }
    match edge {
        EdgeBehavior::Despawn => None,
        EdgeBehavior::Clamp => Some(val.clamp(lo, hi)),
        EdgeBehavior::Wrap => {
            let n = hi - lo + 1;
            Some(lo + (val - lo).rem_euclid(n))
        }
    }
}
