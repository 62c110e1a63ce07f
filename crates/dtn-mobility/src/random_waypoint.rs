//! The classic random-waypoint model: pick a uniform random point in the
//! world bounds, travel to it at a uniform random speed, pause, repeat.

use dtn_core::{HostRng, Position};

use crate::model::{MobilityModel, Waypoint};

/// Uniform random waypoint selection within `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug)]
pub struct RandomWaypointMobility {
    pub world_width_m: f32,
    pub world_height_m: f32,
    pub min_speed_mps: f64,
    pub max_speed_mps: f64,
    pub min_pause_secs: f64,
    pub max_pause_secs: f64,
}

impl RandomWaypointMobility {
    pub fn new(world_width_m: f32, world_height_m: f32, min_speed_mps: f64, max_speed_mps: f64) -> Self {
        Self {
            world_width_m,
            world_height_m,
            min_speed_mps,
            max_speed_mps,
            min_pause_secs: 0.0,
            max_pause_secs: 0.0,
        }
    }

    pub fn with_pause(mut self, min_pause_secs: f64, max_pause_secs: f64) -> Self {
        self.min_pause_secs = min_pause_secs;
        self.max_pause_secs = max_pause_secs;
        self
    }

    fn random_point(&self, rng: &mut HostRng) -> Position {
        Position::new(
            rng.gen_range(0.0..self.world_width_m),
            rng.gen_range(0.0..self.world_height_m),
        )
    }
}

impl MobilityModel for RandomWaypointMobility {
    fn initial_position(&self, rng: &mut HostRng) -> Position {
        self.random_point(rng)
    }

    fn next_waypoint(&self, _current: Position, rng: &mut HostRng) -> Waypoint {
        let speed_mps = if self.max_speed_mps > self.min_speed_mps {
            rng.gen_range(self.min_speed_mps..self.max_speed_mps)
        } else {
            self.min_speed_mps
        };
        let pause_secs = if self.max_pause_secs > self.min_pause_secs {
            rng.gen_range(self.min_pause_secs..self.max_pause_secs)
        } else {
            self.min_pause_secs
        };
        Waypoint {
            target: self.random_point(rng),
            speed_mps,
            pause_secs,
        }
    }
}
