//! `SimOutputObserver<W>` — bridges `dtn_sim::SimObserver` to an `OutputWriter`.

use rustc_hash::FxHashMap;

use dtn_config::ReportSection;
use dtn_core::{HostId, SimClock, Tick};
use dtn_net::HostStore;
use dtn_router::{Router, RouterKind};
use dtn_sim::{SimObserver, TickStats};

use crate::row::{CommunityRow, MessageStatsRow, NodeTrajectoryRow, PopularityRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes trajectory, community, popularity, and
/// aggregate message-stats reports to any [`OutputWriter`] backend.
///
/// Per-host/per-tick samples (trajectory, community, popularity) are only
/// emitted once every `interval_ticks`, starting at `warmup_ticks` — computed
/// from [`ReportSection`] at construction. Errors from the writer are stored
/// internally because `SimObserver` methods have no return value; check with
/// [`take_error`][Self::take_error] after the run.
pub struct SimOutputObserver<W: OutputWriter> {
    writer: W,
    update_interval_secs: f64,
    warmup_ticks: u64,
    interval_ticks: u64,
    last_error: Option<OutputError>,

    contact_counts: FxHashMap<HostId, u64>,

    messages_created: u64,
    messages_delivered: u64,
    messages_relayed: u64,
    messages_dropped: u64,
    latency_sum_secs: f64,
    hop_count_sum: u64,
    buffer_time_sum_secs: f64,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`. `end_tick` is the scenario's
    /// planned final tick, used with `report.nrof_reports` to space out
    /// periodic samples evenly across the run.
    pub fn new(writer: W, clock: &SimClock, report: &ReportSection, end_tick: Tick) -> Self {
        let warmup_ticks = clock.ticks_for_secs(report.warmup_secs);
        let span = end_tick.0.saturating_sub(warmup_ticks).max(1);
        let interval_ticks = (span / report.nrof_reports.max(1)).max(1);

        Self {
            writer,
            update_interval_secs: clock.update_interval_secs,
            warmup_ticks,
            interval_ticks,
            last_error: None,
            contact_counts: FxHashMap::default(),
            messages_created: 0,
            messages_delivered: 0,
            messages_relayed: 0,
            messages_dropped: 0,
            latency_sum_secs: 0.0,
            hop_count_sum: 0,
            buffer_time_sum_secs: 0.0,
        }
    }

    /// Take the stored write error (if any) after `world.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn due_for_sample(&self, tick: Tick) -> bool {
        tick.0 >= self.warmup_ticks && (tick.0 - self.warmup_ticks) % self.interval_ticks == 0
    }

    fn sim_time_secs(&self, tick: Tick) -> f64 {
        tick.0 as f64 * self.update_interval_secs
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, stats: &TickStats) {
        self.messages_created += stats.messages_created as u64;
        self.messages_dropped += stats.messages_expired as u64;
        self.messages_delivered += stats.messages_delivered as u64;
        self.messages_relayed += (stats.transfers_completed - stats.messages_delivered) as u64;
    }

    fn on_connection_up(&mut self, _tick: Tick, a: HostId, b: HostId) {
        *self.contact_counts.entry(a).or_insert(0) += 1;
        *self.contact_counts.entry(b).or_insert(0) += 1;
    }

    fn on_transfer_done(&mut self, tick: Tick, message: &dtn_net::Message, delivered: bool) {
        if !delivered {
            return;
        }
        let age_secs = tick.since(message.created_at) as f64 * self.update_interval_secs;
        let hops = message.hop_count().max(1) as f64;
        self.latency_sum_secs += age_secs;
        self.hop_count_sum += hops as u64;
        self.buffer_time_sum_secs += age_secs / hops;
    }

    fn on_snapshot(&mut self, tick: Tick, hosts: &HostStore) {
        if !self.due_for_sample(tick) {
            return;
        }
        let sim_time = self.sim_time_secs(tick);

        let trajectory: Vec<NodeTrajectoryRow> = hosts
            .hosts()
            .iter()
            .map(|h| NodeTrajectoryRow { sim_time_secs: sim_time, host_id: h.id.0, x: h.position.x, y: h.position.y })
            .collect();
        let result = self.writer.write_trajectory(&trajectory);
        self.store_err(result);

        let popularity: Vec<PopularityRow> = hosts
            .hosts()
            .iter()
            .map(|h| PopularityRow {
                sim_time_secs_floor: sim_time as u64,
                host_id: h.id.0,
                contact_count: self.contact_counts.get(&h.id).copied().unwrap_or(0),
            })
            .collect();
        let result = self.writer.write_popularity(&popularity);
        self.store_err(result);
    }

    fn on_router_snapshot(&mut self, tick: Tick, routers: &[RouterKind]) {
        if !self.due_for_sample(tick) {
            return;
        }
        let sim_time_floor = self.sim_time_secs(tick) as u64;
        let community: Vec<CommunityRow> = routers
            .iter()
            .enumerate()
            .map(|(i, r)| CommunityRow {
                sim_time_secs_floor: sim_time_floor,
                host_id: i as u32,
                community_size: r.community_members().len() as u32,
            })
            .collect();
        let result = self.writer.write_community(&community);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let delivered = self.messages_delivered as f64;
        let row = MessageStatsRow {
            messages_created: self.messages_created,
            messages_delivered: self.messages_delivered,
            messages_relayed: self.messages_relayed,
            messages_dropped: self.messages_dropped,
            delivery_ratio: if self.messages_created > 0 { delivered / self.messages_created as f64 } else { 0.0 },
            overhead_ratio: if delivered > 0.0 { self.messages_relayed as f64 / delivered } else { 0.0 },
            avg_latency_secs: if delivered > 0.0 { self.latency_sum_secs / delivered } else { 0.0 },
            avg_hop_count: if delivered > 0.0 { self.hop_count_sum as f64 / delivered } else { 0.0 },
            avg_buffer_time_secs: if delivered > 0.0 { self.buffer_time_sum_secs / delivered } else { 0.0 },
        };
        let result = self.writer.write_message_stats(&row);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
