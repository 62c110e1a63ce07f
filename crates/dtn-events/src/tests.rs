//! Unit tests for dtn-events.

use std::io::Cursor;

use dtn_core::{HostId, SimRng, Tick};

use crate::external_events::{load_trace_reader, TracePlayback};
use crate::generator::MessageEventGenerator;
use crate::wake_queue::WakeQueue;

mod wake_queue_tests {
    use super::*;

    #[test]
    fn drains_only_the_requested_tick() {
        let mut q: WakeQueue<usize> = WakeQueue::new();
        q.push(Tick(5), 1);
        q.push(Tick(5), 2);
        q.push(Tick(10), 3);
        assert_eq!(q.drain_tick(Tick(7)), None);
        let at_5 = q.drain_tick(Tick(5)).unwrap();
        assert_eq!(at_5, vec![1, 2]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(10)));
    }
}

mod generator_tests {
    use super::*;

    #[test]
    fn fires_distinct_source_and_destination_within_range() {
        let mut gen = MessageEventGenerator::new(
            (30.0, 60.0),
            (100, 500),
            (HostId(0), HostId(9)),
            60.0,
            "M",
        );
        let mut rng = SimRng::new(42);
        for _ in 0..50 {
            let msg = gen.fire(Tick(0), &mut rng);
            assert_ne!(msg.from, msg.to);
            assert!(msg.from.index() <= 9 && msg.to.index() <= 9);
            assert!(msg.size_bytes >= 100 && msg.size_bytes <= 500);
        }
    }

    #[test]
    fn message_ids_are_sequential_and_prefixed() {
        let mut gen = MessageEventGenerator::new((1.0, 1.0), (10, 10), (HostId(0), HostId(1)), 10.0, "evt");
        let mut rng = SimRng::new(1);
        let first = gen.fire(Tick(0), &mut rng);
        let second = gen.fire(Tick(1), &mut rng);
        assert_eq!(first.id.as_str(), "evt0");
        assert_eq!(second.id.as_str(), "evt1");
    }
}

mod external_events_tests {
    use super::*;

    const TRACE: &str = "host_a,host_b,start_tick,end_tick\n\
                          2,3,100,200\n\
                          0,1,10,50\n";

    #[test]
    fn loads_and_sorts_by_start_tick() {
        let events = load_trace_reader(Cursor::new(TRACE)).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].host_a, HostId(0));
        assert_eq!(events[0].start, Tick(10));
        assert_eq!(events[1].start, Tick(100));
    }

    #[test]
    fn playback_yields_connects_and_disconnects_at_the_right_ticks() {
        let events = load_trace_reader(Cursor::new(TRACE)).unwrap();
        let mut playback = TracePlayback::new(events);

        assert!(playback.due_connects(Tick(9)).is_empty());
        assert_eq!(playback.due_connects(Tick(10)).len(), 1);
        assert!(playback.due_disconnects(Tick(49)).is_empty());
        assert_eq!(playback.due_disconnects(Tick(50)).len(), 1);

        assert_eq!(playback.due_connects(Tick(100)).len(), 1);
        assert_eq!(playback.due_disconnects(Tick(200)).len(), 1);
        assert!(playback.is_exhausted());
    }

    #[test]
    fn rejects_a_contact_event_with_end_before_start() {
        let bad = "host_a,host_b,start_tick,end_tick\n0,1,50,10\n";
        assert!(load_trace_reader(Cursor::new(bad)).is_err());
    }
}
