//! The `World` struct and its tick loop.
//!
//! # Six-step tick loop
//!
//! ```text
//! for tick in 0..config.end_tick():
//!   ① Mobility   — step every host along its model (geometric contacts only).
//!   ② Contacts   — rebuild the grid and reconcile UP/DOWN connections, or
//!                  replay the next due connects/disconnects from a trace.
//!   ③ Routing    — call Router::update for every host with at least one
//!                  idle connection, then start accepted transfers.
//!   ④ Transfers  — advance every in-flight transfer; finish and deliver
//!                  the ones that complete this tick.
//!   ⑤ Expiry     — drop messages whose TTL has elapsed from every buffer.
//!   ⑥ Generators — fire any message-event generator due this tick.
//! ```

use rustc_hash::FxHashSet;

use dtn_core::{HostId, ConnectionId, Position, SimClock, SimConfig, SimRng, Tick};
use dtn_events::{ContactEvent, MessageEventGenerator, TracePlayback, WakeQueue};
use dtn_grid::UniformGrid;
use dtn_mobility::{MobilityEngine, MobilityKind};
use dtn_net::{ConnectionState, ConnectionStore, HostRngs, HostStore, Transfer};
use dtn_router::{PeerHandle, PeerView, Router, RouterKind, TransferRequest};

use crate::observer::{SimObserver, TickStats};

/// Where connectivity between hosts comes from: derived from mobility each
/// tick, or replayed from a pre-recorded trace.
pub enum ContactSource {
    Geometric {
        mobility: MobilityEngine,
        models: Vec<MobilityKind>,
        grid: UniformGrid,
        world_size: (f32, f32),
    },
    External {
        trace: TracePlayback,
    },
}

/// All simulation state, and the tick loop that advances it.
///
/// Build via [`crate::builder::WorldBuilder`] or
/// [`crate::builder::build_from_scenario`].
pub struct World {
    pub config: SimConfig,
    pub clock: SimClock,
    pub hosts: HostStore,
    pub host_rngs: HostRngs,
    pub connections: ConnectionStore,
    pub routers: Vec<RouterKind>,
    pub contacts: ContactSource,
    pub generators: Vec<MessageEventGenerator>,
    pub generator_wake: WakeQueue<usize>,
    pub sim_rng: SimRng,
}

impl World {
    /// Run until `config.end_tick()`.
    pub fn run(&mut self, observer: &mut dyn SimObserver) {
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }
            observer.on_tick_start(now);
            let stats = self.process_tick(now, observer);
            observer.on_tick_end(now, &stats);
            observer.on_snapshot(now, &self.hosts);
            observer.on_router_snapshot(now, &self.routers);
            self.clock.advance();
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    /// Useful for tests and incremental stepping.
    pub fn run_ticks(&mut self, n: u64, observer: &mut dyn SimObserver) {
        for _ in 0..n {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            let stats = self.process_tick(now, observer);
            observer.on_tick_end(now, &stats);
            observer.on_snapshot(now, &self.hosts);
            observer.on_router_snapshot(now, &self.routers);
            self.clock.advance();
        }
    }

    /// Advance the world by exactly one tick, returning this tick's counters.
    pub fn process_tick(&mut self, now: Tick, observer: &mut dyn SimObserver) -> TickStats {
        let mut stats = TickStats::default();

        self.step_mobility(now);

        if matches!(self.contacts, ContactSource::Geometric { .. }) {
            self.detect_geometric_contacts(now, &mut stats, observer);
        } else {
            self.detect_external_contacts(now, &mut stats, observer);
        }

        self.run_routers(now, &mut stats);
        self.progress_transfers(now, &mut stats, observer);
        self.expire_messages(now, &mut stats);
        self.fire_generators(now, &mut stats);

        stats
    }

    // ── Step ① mobility ────────────────────────────────────────────────────

    fn step_mobility(&mut self, now: Tick) {
        let ContactSource::Geometric { mobility, models, world_size, .. } = &mut self.contacts else {
            return;
        };
        let host_ids: Vec<HostId> = self.hosts.host_ids().collect();
        for host in host_ids {
            let current = self.hosts.host(host).position;
            let model = &models[host.index()];
            let rng = self.host_rngs.get_mut(host);
            let next = mobility.step(host, model, current, now, &self.clock, rng);
            self.hosts.host_mut(host).position = next.clamped(world_size.0, world_size.1);
        }
    }

    // ── Step ② contacts ────────────────────────────────────────────────────

    /// Only the first interface on each host participates in contact
    /// detection — a documented simplification, not full multi-interface
    /// pairing.
    fn detect_geometric_contacts(&mut self, now: Tick, stats: &mut TickStats, observer: &mut dyn SimObserver) {
        let ContactSource::Geometric { grid, .. } = &mut self.contacts else {
            return;
        };

        let positions: Vec<(HostId, Position)> = self
            .hosts
            .host_ids()
            .map(|h| (h, self.hosts.host(h).position))
            .collect();
        grid.rebuild(positions.iter().copied());

        let mut desired: FxHashSet<(HostId, HostId)> = FxHashSet::default();
        for &(host, pos) in &positions {
            let Some(iface) = self.hosts.interfaces_of(host).next() else { continue };
            for cand in grid.candidates_near(pos, host) {
                if cand <= host {
                    continue; // pair already considered from the other side
                }
                let Some(cand_iface) = self.hosts.interfaces_of(cand).next() else { continue };
                if iface.name != cand_iface.name {
                    continue;
                }
                let range = iface.transmit_range_m.min(cand_iface.transmit_range_m);
                let cand_pos = self.hosts.host(cand).position;
                if pos.within_range(cand_pos, range) {
                    desired.insert((host, cand));
                }
            }
        }

        let to_close: Vec<ConnectionId> = self
            .connections
            .iter()
            .filter(|c| {
                let pair = if c.host_a <= c.host_b { (c.host_a, c.host_b) } else { (c.host_b, c.host_a) };
                !desired.contains(&pair)
            })
            .map(|c| c.id)
            .collect();
        for id in to_close {
            close_connection(&mut self.connections, &mut self.routers, id, now, stats, observer);
        }

        for (a, b) in desired {
            if self.connections.between(a, b).is_none() {
                open_connection(&self.hosts, &mut self.connections, &mut self.routers, a, b, now, stats, observer);
            }
        }
    }

    fn detect_external_contacts(&mut self, now: Tick, stats: &mut TickStats, observer: &mut dyn SimObserver) {
        let ContactSource::External { trace } = &mut self.contacts else {
            return;
        };
        let connects: Vec<ContactEvent> = trace.due_connects(now).to_vec();
        let disconnects: Vec<ContactEvent> = trace.due_disconnects(now).to_vec();

        for ev in disconnects {
            if let Some(conn) = self.connections.between(ev.host_a, ev.host_b) {
                let id = conn.id;
                close_connection(&mut self.connections, &mut self.routers, id, now, stats, observer);
            }
        }
        for ev in connects {
            if self.connections.between(ev.host_a, ev.host_b).is_none() {
                open_connection(
                    &self.hosts, &mut self.connections, &mut self.routers, ev.host_a, ev.host_b, now, stats, observer,
                );
            }
        }
    }

    // ── Step ③ routing ─────────────────────────────────────────────────────

    fn run_routers(&mut self, now: Tick, stats: &mut TickStats) {
        let host_count = self.hosts.host_count();
        let mut idle_peers: Vec<Vec<(HostId, ConnectionId)>> = vec![Vec::new(); host_count];
        for conn in self.connections.iter() {
            if conn.state == ConnectionState::UpIdle {
                idle_peers[conn.host_a.index()].push((conn.host_b, conn.id));
                idle_peers[conn.host_b.index()].push((conn.host_a, conn.id));
            }
        }

        for idx in 0..host_count {
            if idle_peers[idx].is_empty() {
                continue;
            }
            let host = HostId(idx as u32);
            let requests = update_host_router(host, &self.hosts, &idle_peers[idx], &mut self.routers, now);

            for req in requests {
                let Some(&(_, conn_id)) = idle_peers[idx].iter().find(|&&(p, _)| p == req.peer) else {
                    continue;
                };
                let Some(conn) = self.connections.get(conn_id) else { continue };
                if !conn.is_idle() {
                    continue;
                }

                let accepted = {
                    let Some(msg) = self.hosts.host(host).buffer.get(&req.message_id) else { continue };
                    let peer_buffer = &self.hosts.host(req.peer).buffer;
                    if self.routers[req.peer.index()].accept(msg, peer_buffer) {
                        Some((msg.id.clone(), msg.size_bytes))
                    } else {
                        log::trace!("host {} declined {} from {}", req.peer, req.message_id, host);
                        stats.transfers_denied += 1;
                        None
                    }
                };

                if let Some((msg_id, size)) = accepted {
                    if let Some(conn) = self.connections.get_mut(conn_id) {
                        conn.start_transfer(msg_id, host, size, now);
                    }
                }
            }
        }
    }

    // ── Step ④ transfer progress ───────────────────────────────────────────

    fn progress_transfers(&mut self, now: Tick, stats: &mut TickStats, observer: &mut dyn SimObserver) {
        let tick_duration_secs = self.clock.update_interval_secs;
        let mut completed = Vec::new();
        for conn in self.connections.iter_mut() {
            if let Some(transfer) = conn.progress(tick_duration_secs) {
                completed.push(transfer);
            }
        }
        for transfer in completed {
            finish_transfer(&mut self.hosts, &mut self.routers, transfer, now, stats, observer);
        }
    }

    // ── Step ⑤ expiry ──────────────────────────────────────────────────────

    fn expire_messages(&mut self, now: Tick, stats: &mut TickStats) {
        let host_ids: Vec<HostId> = self.hosts.host_ids().collect();
        let clock = self.clock;
        for host in host_ids {
            let expired = self.hosts.host_mut(host).buffer.expire(now, |m| clock.ticks_for_minutes(m));
            stats.messages_expired += expired.len() as u32;
        }
    }

    // ── Step ⑥ generators ──────────────────────────────────────────────────

    fn fire_generators(&mut self, now: Tick, stats: &mut TickStats) {
        let Some(due) = self.generator_wake.drain_tick(now) else { return };

        for gi in due {
            let msg = self.generators[gi].fire(now, &mut self.sim_rng);
            stats.messages_created += 1;

            let source = msg.from;
            let size = msg.size_bytes;
            if !self.hosts.host(source).buffer.has_room_for(size) {
                let victim = self.routers[source.index()].next_message_to_remove(&self.hosts.host(source).buffer, size);
                if let Some(victim) = victim {
                    self.hosts.host_mut(source).buffer.remove(&victim);
                }
            }
            if self.hosts.host(source).buffer.has_room_for(size) {
                self.hosts.host_mut(source).buffer.insert(msg);
            } else {
                log::warn!("dropping newly generated message {} at host {}: buffer full", msg.id, source);
            }

            let next_delay_secs = self.generators[gi].next_interval_secs(&mut self.sim_rng);
            self.generator_wake.push(now.offset(self.clock.ticks_for_secs(next_delay_secs)), gi);
        }
    }
}

// ── Free helpers ────────────────────────────────────────────────────────────

fn open_connection(
    hosts: &HostStore,
    connections: &mut ConnectionStore,
    routers: &mut [RouterKind],
    a: HostId,
    b: HostId,
    now: Tick,
    stats: &mut TickStats,
    observer: &mut dyn SimObserver,
) -> Option<ConnectionId> {
    let iface_a = hosts.interfaces_of(a).next()?;
    let iface_b = hosts.interfaces_of(b).next()?;
    let speed = iface_a.transmit_speed_bps.min(iface_b.transmit_speed_bps);
    let id = connections.push(a, iface_a.id, b, iface_b.id, speed, now);

    routers[a.index()].on_connection_up(b, now);
    routers[b.index()].on_connection_up(a, now);

    stats.connections_opened += 1;
    log::debug!("connection {id} up: {a} <-> {b}");
    observer.on_connection_up(now, a, b);
    Some(id)
}

fn close_connection(
    connections: &mut ConnectionStore,
    routers: &mut [RouterKind],
    id: ConnectionId,
    now: Tick,
    stats: &mut TickStats,
    observer: &mut dyn SimObserver,
) {
    let Some(mut conn) = connections.remove(id) else { return };
    conn.abort_transfer();

    routers[conn.host_a.index()].on_connection_down(conn.host_b, now);
    routers[conn.host_b.index()].on_connection_down(conn.host_a, now);

    stats.connections_closed += 1;
    log::debug!("connection {id} down: {} <-> {}", conn.host_a, conn.host_b);
    observer.on_connection_down(now, conn.host_a, conn.host_b);
}

/// Give `host`'s router a mutable view of its own state and a read-only
/// [`PeerView`] over every other connected router, via a double split-borrow
/// of `routers` — not every [`RouterKind`] variant has a cheap `Default`, so
/// a take-and-restore dance isn't an option here.
fn update_host_router(
    host: HostId,
    hosts: &HostStore,
    idle_peers: &[(HostId, ConnectionId)],
    routers: &mut [RouterKind],
    now: Tick,
) -> Vec<TransferRequest> {
    let i = host.index();
    let (before, rest) = routers.split_at_mut(i);
    let (mine, after) = rest.split_at_mut(1);

    let peer_router_ref = |peer: HostId| -> &dyn Router {
        let j = peer.index();
        if j < i { &before[j] } else { &after[j - i - 1] }
    };

    let peers: Vec<PeerHandle<'_>> = idle_peers
        .iter()
        .map(|&(peer, _conn)| PeerHandle {
            host: peer,
            buffer: &hosts.host(peer).buffer,
            router: peer_router_ref(peer),
        })
        .collect();

    let view = PeerView {
        self_host: host,
        self_buffer: &hosts.host(host).buffer,
        peers,
    };

    mine[0].update(&view, now)
}

/// On final delivery, mark the id delivered on the receiver and never
/// re-insert it into the buffer — a later-arriving copy of an already
/// delivered id must be turned away by `Router::accept`, not silently
/// re-delivered and double-counted. On a relay (not final delivery), insert
/// into the receiver's buffer as before, evicting via its router's drop
/// policy if necessary. The sending host keeps its own copy after a handoff
/// unless its router's `drop_own_copy_after_send` says otherwise (used by
/// single-copy handoff strategies like Spray-and-Focus's focus phase).
fn finish_transfer(
    hosts: &mut HostStore,
    routers: &mut [RouterKind],
    transfer: Transfer,
    now: Tick,
    stats: &mut TickStats,
    observer: &mut dyn SimObserver,
) {
    let Some(mut msg) = hosts.host(transfer.from).buffer.get(&transfer.message_id).cloned() else {
        return; // sender's copy is gone (expired mid-transfer)
    };
    msg.record_hop(transfer.to, now);

    let delivered = transfer.to == msg.to;
    if delivered {
        hosts.host_mut(transfer.to).buffer.mark_delivered(msg.id.clone());
    } else {
        let receiver = hosts.host_mut(transfer.to);
        if !receiver.buffer.has_room_for(msg.size_bytes) {
            if let Some(victim) = routers[transfer.to.index()].next_message_to_remove(&receiver.buffer, msg.size_bytes) {
                receiver.buffer.remove(&victim);
            }
        }
        if !receiver.buffer.has_room_for(msg.size_bytes) {
            log::warn!("dropping message {} at host {}: no room after eviction", msg.id, transfer.to);
            return;
        }
        receiver.buffer.insert(msg.clone());
    }

    let drop_own_copy = !delivered && routers[transfer.from.index()].drop_own_copy_after_send(&msg.id);
    routers[transfer.from.index()].on_transfer_done(&msg, delivered, now);
    if drop_own_copy {
        hosts.host_mut(transfer.from).buffer.remove(&msg.id);
    }
    routers[transfer.to.index()].on_transfer_done(&msg, delivered, now);

    stats.transfers_completed += 1;
    if delivered {
        stats.messages_delivered += 1;
    }
    observer.on_transfer_done(now, &msg, delivered);
}
