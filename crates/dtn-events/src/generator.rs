//! Message Event Generator: a periodic source that injects new
//! messages between randomly chosen hosts in a configured address range.

use dtn_core::{HostId, SimRng, Tick};
use dtn_net::{Message, MessageId};

/// One message-event generator instance's configuration.
///
/// Several instances with different `host_range`/`prefix` pairs can run
/// side by side in the same scenario (e.g. one per traffic class).
pub struct MessageEventGenerator {
    interval_secs: (f64, f64),
    size_bytes: (u64, u64),
    host_range: (HostId, HostId),
    ttl_minutes: f64,
    prefix: String,
    seq: u64,
}

impl MessageEventGenerator {
    /// # Panics
    /// Panics in debug mode if either range is inverted, or `host_range`
    /// spans fewer than two hosts (no distinct destination is possible).
    pub fn new(
        interval_secs: (f64, f64),
        size_bytes: (u64, u64),
        host_range: (HostId, HostId),
        ttl_minutes: f64,
        prefix: impl Into<String>,
    ) -> Self {
        debug_assert!(interval_secs.0 <= interval_secs.1);
        debug_assert!(size_bytes.0 <= size_bytes.1);
        debug_assert!(host_range.0 < host_range.1, "host_range must span at least two hosts");
        Self {
            interval_secs,
            size_bytes,
            host_range,
            ttl_minutes,
            prefix: prefix.into(),
            seq: 0,
        }
    }

    /// Sample this generator's next firing delay, in seconds.
    pub fn next_interval_secs(&self, rng: &mut SimRng) -> f64 {
        rng.gen_range(self.interval_secs.0..=self.interval_secs.1)
    }

    /// Create the next message: a uniformly chosen source/destination pair
    /// (distinct hosts) within `host_range`, a uniformly sampled size, and an
    /// id of the form `"{prefix}{seq}"`.
    pub fn fire(&mut self, now: Tick, rng: &mut SimRng) -> Message {
        let lo = self.host_range.0.index() as u32;
        let hi = self.host_range.1.index() as u32;
        let from = HostId(rng.gen_range(lo..=hi));
        let to = loop {
            let candidate = HostId(rng.gen_range(lo..=hi));
            if candidate != from {
                break candidate;
            }
        };
        let size = rng.gen_range(self.size_bytes.0..=self.size_bytes.1);

        let id = MessageId::new(format!("{}{}", self.prefix, self.seq));
        self.seq += 1;
        Message::new(id, from, to, size, self.ttl_minutes, now)
    }
}
