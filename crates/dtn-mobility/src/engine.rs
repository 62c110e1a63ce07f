//! Drives hosts' positions according to a pluggable `MobilityModel`.
//!
//! The engine itself is model-agnostic: it only owns each host's
//! [`MovementState`] (current waypoint + pause timer). The model for a given
//! host is passed in at call time rather than stored on the engine, so a
//! scenario with multiple groups — each potentially running a different
//! mobility model — doesn't need one engine instance per model. `dtn-sim`
//! looks up the right model per host (via `MobilityKind`) and passes a
//! reference in.

use dtn_core::{HostId, HostRng, Position, SimClock, Tick};

use crate::model::MobilityModel;
use crate::state::MovementState;

/// Per-host [`MovementState`] storage, advanced one tick at a time.
pub struct MobilityEngine {
    states: Vec<MovementState>,
}

impl MobilityEngine {
    pub fn new(host_count: usize) -> Self {
        Self {
            states: vec![MovementState::settled_at(Position::ORIGIN); host_count],
        }
    }

    /// Place `host` at its model-chosen starting position. Call once per
    /// host at simulation startup.
    pub fn init_position<M: MobilityModel + ?Sized>(&mut self, host: HostId, model: &M, rng: &mut HostRng) -> Position {
        let pos = model.initial_position(rng);
        self.states[host.index()] = MovementState::settled_at(pos);
        pos
    }

    /// Advance `host` by one tick from `current`, returning its new position.
    ///
    /// If the host has reached its waypoint and its pause has elapsed, a new
    /// waypoint is requested and the host stays put this tick (it starts
    /// moving toward the new target on the following call).
    pub fn step<M: MobilityModel + ?Sized>(
        &mut self,
        host: HostId,
        model: &M,
        current: Position,
        now: Tick,
        clock: &SimClock,
        rng: &mut HostRng,
    ) -> Position {
        let state = &mut self.states[host.index()];

        if now < state.paused_until {
            return current;
        }

        let reached = current == state.waypoint.target || state.waypoint.speed_mps <= 0.0;
        if reached {
            let wp = model.next_waypoint(current, rng);
            state.paused_until = now.offset(clock.ticks_for_secs(wp.pause_secs));
            state.waypoint = wp;
            return current;
        }

        let dx = state.waypoint.target.x - current.x;
        let dy = state.waypoint.target.y - current.y;
        let dist = (dx * dx + dy * dy).sqrt();
        let step_dist = (state.waypoint.speed_mps * clock.update_interval_secs) as f32;

        if step_dist >= dist {
            state.waypoint.target
        } else {
            Position::new(current.x + dx / dist * step_dist, current.y + dy / dist * step_dist)
        }
    }
}
