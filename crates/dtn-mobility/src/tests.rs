//! Unit tests for dtn-mobility.

use dtn_core::{HostId, HostRng, Position, SimClock, Tick};

use crate::{MobilityEngine, RandomWaypointMobility, StationaryMobility};

#[cfg(test)]
mod stationary {
    use super::*;

    #[test]
    fn never_moves() {
        let mut rng = HostRng::new(0, HostId(0));
        let clock = SimClock::new(1.0);
        let model = StationaryMobility::new(Position::new(10.0, 20.0));
        let mut eng = MobilityEngine::new(1);

        let pos = eng.init_position(HostId(0), &model, &mut rng);
        assert_eq!(pos, Position::new(10.0, 20.0));

        let mut current = pos;
        for tick in 0..10 {
            current = eng.step(HostId(0), &model, current, Tick(tick), &clock, &mut rng);
        }
        assert_eq!(current, Position::new(10.0, 20.0));
    }
}

#[cfg(test)]
mod random_waypoint {
    use super::*;

    #[test]
    fn stays_within_world_bounds() {
        let mut rng = HostRng::new(1, HostId(0));
        let clock = SimClock::new(1.0);
        let model = RandomWaypointMobility::new(100.0, 100.0, 1.0, 5.0);
        let mut eng = MobilityEngine::new(1);

        let mut current = eng.init_position(HostId(0), &model, &mut rng);
        for tick in 0..500 {
            current = eng.step(HostId(0), &model, current, Tick(tick), &clock, &mut rng);
            assert!(current.x >= 0.0 && current.x <= 100.0);
            assert!(current.y >= 0.0 && current.y <= 100.0);
        }
    }

    #[test]
    fn eventually_reaches_a_waypoint() {
        let mut rng = HostRng::new(2, HostId(0));
        let clock = SimClock::new(1.0);
        let model = RandomWaypointMobility::new(50.0, 50.0, 10.0, 10.0);
        let mut eng = MobilityEngine::new(1);

        let mut current = eng.init_position(HostId(0), &model, &mut rng);
        let start = current;
        let mut moved = false;
        for tick in 0..200 {
            current = eng.step(HostId(0), &model, current, Tick(tick), &clock, &mut rng);
            if current != start {
                moved = true;
            }
        }
        assert!(moved, "host should have moved at least once in 200 ticks");
    }

    #[test]
    fn determinism_same_seed_same_path() {
        let clock = SimClock::new(1.0);
        let model = RandomWaypointMobility::new(100.0, 100.0, 1.0, 5.0).with_pause(1.0, 3.0);

        let run = || {
            let mut rng = HostRng::new(42, HostId(3));
            let mut eng = MobilityEngine::new(1);
            let mut current = eng.init_position(HostId(3), &model, &mut rng);
            let mut path = vec![current];
            for tick in 0..50 {
                current = eng.step(HostId(3), &model, current, Tick(tick), &clock, &mut rng);
                path.push(current);
            }
            path
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn pause_delays_next_waypoint_selection() {
        let mut rng = HostRng::new(5, HostId(0));
        let clock = SimClock::new(1.0);
        // Guaranteed long pause; speed high enough to arrive in 1 tick.
        let model = RandomWaypointMobility::new(1.0, 1.0, 1000.0, 1000.0).with_pause(10.0, 10.0);
        let mut eng = MobilityEngine::new(1);

        let mut current = eng.init_position(HostId(0), &model, &mut rng);
        // First step requests a waypoint (host "reached" its settled position).
        current = eng.step(HostId(0), &model, current, Tick(0), &clock, &mut rng);
        let after_first = current;
        // Host should reach the (tiny, 1m world) target almost immediately,
        // then sit paused rather than re-rolling a waypoint every tick.
        for tick in 1..5 {
            current = eng.step(HostId(0), &model, current, Tick(tick), &clock, &mut rng);
        }
        // Position stabilizes once within the 1x1 world and paused.
        assert!((current.x - after_first.x).abs() <= 1.0);
    }
}

#[cfg(test)]
mod kind_dispatch {
    use super::*;
    use crate::MobilityKind;

    #[test]
    fn stationary_variant_never_moves() {
        let mut rng = HostRng::new(9, HostId(0));
        let clock = SimClock::new(1.0);
        let model = MobilityKind::Stationary(StationaryMobility::new(Position::new(3.0, 4.0)));
        let mut eng = MobilityEngine::new(1);

        let mut current = eng.init_position(HostId(0), &model, &mut rng);
        for tick in 0..5 {
            current = eng.step(HostId(0), &model, current, Tick(tick), &clock, &mut rng);
        }
        assert_eq!(current, Position::new(3.0, 4.0));
    }
}
