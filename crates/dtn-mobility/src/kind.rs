//! `MobilityKind` — a closed enum wrapping every reference mobility model, so
//! a scenario with several host groups (each possibly assigned a different
//! `movementModel`) can store one model per host without `Box<dyn
//! MobilityModel>`. Mirrors `dtn-router::RouterKind`'s dispatch pattern.

use dtn_core::{HostRng, Position};

use crate::model::{MobilityModel, Waypoint};
use crate::random_waypoint::RandomWaypointMobility;
use crate::stationary::StationaryMobility;

pub enum MobilityKind {
    RandomWaypoint(RandomWaypointMobility),
    Stationary(StationaryMobility),
}

impl MobilityModel for MobilityKind {
    fn initial_position(&self, rng: &mut HostRng) -> Position {
        match self {
            MobilityKind::RandomWaypoint(m) => m.initial_position(rng),
            MobilityKind::Stationary(m) => m.initial_position(rng),
        }
    }

    fn next_waypoint(&self, current: Position, rng: &mut HostRng) -> Waypoint {
        match self {
            MobilityKind::RandomWaypoint(m) => m.next_waypoint(current, rng),
            MobilityKind::Stationary(m) => m.next_waypoint(current, rng),
        }
    }
}
