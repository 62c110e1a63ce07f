//! Per-host movement state tracked by `MobilityEngine`.

use dtn_core::Tick;

use crate::model::Waypoint;

/// The waypoint a host is currently travelling toward, plus any pause before
/// the next one is chosen.
#[derive(Clone, Copy, Debug)]
pub struct MovementState {
    pub waypoint: Waypoint,
    /// Tick at which the host may resume moving after reaching `waypoint`.
    pub paused_until: Tick,
}

impl MovementState {
    /// A state that is immediately "reached" and unpaused, forcing the next
    /// `MobilityEngine::step` call to request a fresh waypoint.
    pub fn settled_at(position: dtn_core::Position) -> Self {
        Self {
            waypoint: Waypoint {
                target: position,
                speed_mps: 0.0,
                pause_secs: 0.0,
            },
            paused_until: Tick::ZERO,
        }
    }
}
