//! A host that never moves.

use dtn_core::{HostRng, Position};

use crate::model::{MobilityModel, Waypoint};

/// Places a host at a fixed `Position` and never schedules another move.
///
/// `next_waypoint` returns the host's own current position as its target
/// with `speed_mps = 0.0`, so `dtn-sim`'s movement step is a no-op and the
/// host is never re-queried before the run ends (`pause_secs` is set to the
/// scenario's remaining run length in practice, but since speed is zero the
/// exact value only affects how often the tick loop re-evaluates it — never
/// how far the host travels).
#[derive(Clone, Copy, Debug)]
pub struct StationaryMobility {
    pub position: Position,
}

impl StationaryMobility {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

impl MobilityModel for StationaryMobility {
    fn initial_position(&self, _rng: &mut HostRng) -> Position {
        self.position
    }

    fn next_waypoint(&self, current: Position, _rng: &mut HostRng) -> Waypoint {
        Waypoint {
            target: current,
            speed_mps: 0.0,
            pause_secs: f64::INFINITY,
        }
    }
}
