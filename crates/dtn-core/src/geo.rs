//! Planar coordinate type and spatial utilities.
//!
//! `Position` uses `f32` (single-precision) Cartesian metres, matching the
//! flat `(w, h)` world-size convention of `MovementModel.worldSize` — there
//! is no geographic projection involved, so plain Euclidean distance is
//! exact rather than an approximation.

/// A 2-D position in the simulated world, in metres.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance_m(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Squared distance — avoids the `sqrt` when only comparing distances
    /// (e.g. range checks against a squared threshold).
    #[inline]
    pub fn distance_sq_m(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// `true` if `self` and `other` are within `range` metres of each other.
    #[inline]
    pub fn within_range(self, other: Position, range: f32) -> bool {
        self.distance_sq_m(other) <= range * range
    }

    /// Clamp both coordinates to `[0, w] x [0, h]` — used to keep mobility
    /// models inside `MovementModel.worldSize`.
    #[inline]
    pub fn clamped(self, w: f32, h: f32) -> Position {
        Position {
            x: self.x.clamp(0.0, w),
            y: self.y.clamp(0.0, h),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
