//! `WakeQueue` — sparse per-tick activation queue.
//!
//! # Why this exists
//!
//! Most ticks have nothing scheduled: a message-event generator fires every
//! few minutes, not every tick, and external-event playback only has
//! something to do at the ticks a trace records a connect/disconnect.
//! Iterating every generator/event index each tick to ask "anything due?"
//! costs O(generators) per tick regardless of how sparse the schedule is.
//!
//! `WakeQueue` inverts the problem: a generator registers the tick at which
//! it next needs to fire. Each tick the simulation drains only the entries
//! scheduled for that tick — O(active) work instead of O(total).
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log W) insert and pop where W = number of distinct
//! future ticks currently enqueued — tiny for any realistic scenario size.

use std::collections::BTreeMap;

use dtn_core::Tick;

/// A priority-queue mapping simulation ticks → opaque scheduled ids due at
/// that tick (e.g. a message-event generator index, or an external-event
/// trace line number).
#[derive(Default)]
pub struct WakeQueue<T> {
    inner: BTreeMap<Tick, Vec<T>>,
    total: usize,
}

impl<T> WakeQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
            total: 0,
        }
    }

    /// Schedule `item` to fire at `tick`.
    pub fn push(&mut self, tick: Tick, item: T) {
        self.inner.entry(tick).or_default().push(item);
        self.total += 1;
    }

    /// Remove and return every item scheduled for exactly `tick`.
    pub fn drain_tick(&mut self, tick: Tick) -> Option<Vec<T>> {
        let items = self.inner.remove(&tick)?;
        self.total -= items.len();
        Some(items)
    }

    /// The earliest tick with at least one queued item, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }
}
