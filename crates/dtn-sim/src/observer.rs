//! Simulation observer trait for progress reporting and data collection.

use dtn_core::{HostId, Tick};
use dtn_net::{HostStore, Message};
use dtn_router::RouterKind;

/// Per-tick counters handed to [`SimObserver::on_tick_end`].
///
/// Cheap to copy; `dtn-output` accumulates these into CSV reports rather
/// than the sim holding on to per-tick history itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickStats {
    pub connections_opened: u32,
    pub connections_closed: u32,
    pub transfers_completed: u32,
    pub messages_delivered: u32,
    pub messages_created: u32,
    pub messages_expired: u32,
    pub transfers_denied: u32,
}

/// Callbacks invoked by [`World::run`][crate::World::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, once all five processing steps
    /// (mobility, contacts, routing, transfer progress, expiry, generators)
    /// have run.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// A connection between two hosts came up.
    fn on_connection_up(&mut self, _tick: Tick, _a: HostId, _b: HostId) {}

    /// A connection between two hosts went down.
    fn on_connection_down(&mut self, _tick: Tick, _a: HostId, _b: HostId) {}

    /// A message transfer across a connection finished.
    ///
    /// `delivered` is true when the receiving host is the message's final
    /// destination, false when it is merely a relay hop.
    fn on_transfer_done(&mut self, _tick: Tick, _message: &Message, _delivered: bool) {}

    /// Called at snapshot intervals. Provides read-only access to full host
    /// state so output writers can record position/buffer snapshots without
    /// the sim needing to know about any specific output format.
    fn on_snapshot(&mut self, _tick: Tick, _hosts: &HostStore) {}

    /// Called alongside `on_snapshot`, with read-only access to every host's
    /// router. Separated from `on_snapshot` because reading router state
    /// (community membership, centrality) has nothing to do with host
    /// topology and several observers only need one or the other.
    fn on_router_snapshot(&mut self, _tick: Tick, _routers: &[RouterKind]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing. Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
