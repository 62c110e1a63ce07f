//! The `MobilityModel` contract.

use dtn_core::{HostRng, Position};

/// A destination a host is currently travelling toward.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Waypoint {
    pub target: Position,
    /// Speed in meters/second while travelling toward `target`.
    pub speed_mps: f64,
    /// Seconds to remain stationary once `target` is reached, before calling
    /// `next_waypoint` again.
    pub pause_secs: f64,
}

/// Per-host movement behavior.
///
/// `dtn-sim`'s tick loop calls `initial_position` once at host creation, then
/// `next_waypoint` every time a host reaches its current target (or at
/// startup). Between waypoints the host moves in a straight line at
/// `Waypoint::speed_mps`; `dtn-sim` owns the actual position interpolation so
/// models stay stateless contract implementations, not position-owners.
pub trait MobilityModel: Send {
    /// Where does a host start, before any waypoint has been chosen?
    fn initial_position(&self, rng: &mut HostRng) -> Position;

    /// Pick the next destination from `current`.
    fn next_waypoint(&self, current: Position, rng: &mut HostRng) -> Waypoint;
}
