//! Unit tests for dtn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ConnectionId, HostId, InterfaceId};

    #[test]
    fn index_roundtrip() {
        let id = HostId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(HostId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(HostId(0) < HostId(1));
        assert!(ConnectionId(100) > ConnectionId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(HostId::INVALID.0, u32::MAX);
        assert_eq!(InterfaceId::INVALID.0, u32::MAX);
        assert_eq!(ConnectionId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(HostId(7).to_string(), "HostId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;

    #[test]
    fn zero_distance() {
        let p = Position::new(100.0, 200.0);
        assert!(p.distance_m(p) < 1e-6);
    }

    #[test]
    fn pythagorean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_m(b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn within_range_uses_inclusive_bound() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(10.0, 0.0);
        assert!(a.within_range(b, 10.0));
        assert!(!a.within_range(b, 9.999));
    }

    #[test]
    fn clamp_to_world_bounds() {
        let p = Position::new(-5.0, 500.0);
        let c = p.clamped(100.0, 100.0);
        assert_eq!(c, Position::new(0.0, 100.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(1.0);
        assert_eq!(clock.elapsed_secs(), 0.0);
        clock.advance();
        assert_eq!(clock.elapsed_secs(), 1.0);
        clock.advance();
        assert_eq!(clock.elapsed_secs(), 2.0);
    }

    #[test]
    fn ticks_for_minutes_matches_ttl_semantics() {
        let clock = SimClock::new(1.0);
        // 5-minute TTL at 1 s/tick should be 300 ticks.
        assert_eq!(clock.ticks_for_minutes(5.0), 300);
    }

    #[test]
    fn sim_config_end_tick() {
        let cfg = SimConfig {
            update_interval_secs: 1.0,
            end_time_secs: 43_200.0, // 12 simulated hours
            seed: 42,
            randomize_update_order: false,
        };
        assert_eq!(cfg.end_tick(), Tick(43_200));
    }
}

#[cfg(test)]
mod rng {
    use crate::{HostId, HostRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = HostRng::new(12345, HostId(0));
        let mut r2 = HostRng::new(12345, HostId(0));
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_hosts_differ() {
        let mut r0 = HostRng::new(1, HostId(0));
        let mut r1 = HostRng::new(1, HostId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent hosts should diverge");
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = HostRng::new(0, HostId(0));
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod result {
    use crate::TransferResult;

    #[test]
    fn only_rcv_ok_is_accepting() {
        assert!(TransferResult::RcvOk.is_ok());
        assert!(!TransferResult::DeniedNoSpace.is_ok());
    }

    #[test]
    fn transient_denials() {
        assert!(TransferResult::DeniedPolicy.is_transient());
        assert!(TransferResult::TryLaterBusy.is_transient());
        assert!(TransferResult::DeniedNoSpace.is_transient());
        assert!(!TransferResult::DeniedOld.is_transient());
        assert!(!TransferResult::DeniedTtlExpired.is_transient());
    }

    #[test]
    fn display() {
        assert_eq!(TransferResult::RcvOk.to_string(), "RCV_OK");
        assert_eq!(TransferResult::DeniedNoSpace.to_string(), "DENIED_NO_SPACE");
    }
}
