//! Bubble Rap routing: community detection plus a two-tier
//! forward rule — bubble up through the global social network using global
//! centrality until a community member of the destination is reached, then
//! bubble up within that community using local centrality.

use dtn_core::{HostId, Tick};
use dtn_net::{Buffer, Message, MessageId};

use crate::base::{fifo_victim, final_deliveries};
use crate::history::ConnectionHistory;
use crate::peer_view::PeerView;
use crate::router::{Router, TransferRequest};

/// How community membership is decided from contact history.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CommunityDetection {
    /// A peer joins this router's community once its familiar set overlaps
    /// the existing community in at least `k` hosts — the K-clique
    /// percolation rule: communities grow from hosts that already share `k`
    /// acquaintances with the clique, not from raw contact frequency with
    /// this host alone.
    KClique { k: u32 },
    /// A peer joins once cumulative contact duration crosses `threshold_ticks`.
    Simple { threshold_ticks: u64 },
}

/// Centrality estimator — both read the same contact history, differing only
/// in how far back they look.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CentralityMetric {
    /// Count unique hosts with a contact that finished within the last
    /// `window_ticks`.
    SWindow { window_ticks: u64 },
    /// Count every unique host ever contacted since simulation start.
    CWindow,
}

pub struct BubbleRapRouter {
    detection: CommunityDetection,
    centrality_metric: CentralityMetric,
    history: ConnectionHistory,
    /// This router's own host id, learned from the first `PeerView` it sees
    /// (the trait has no `new(host)` hook for strategies that don't need
    /// one) — needed to seed `community` with `{self}` per the standard
    /// K-clique bootstrap.
    self_host: Option<HostId>,
    community: Vec<HostId>,
    /// Every host this router has completed at least one contact with,
    /// independent of community admission — the set a peer's K-clique check
    /// overlaps against.
    familiar: Vec<HostId>,
    cached_centrality: f32,
    cached_local_centrality: f32,
    centrality_computed_at: Option<Tick>,
}

impl BubbleRapRouter {
    pub fn new(detection: CommunityDetection, centrality_metric: CentralityMetric) -> Self {
        Self {
            detection,
            centrality_metric,
            history: ConnectionHistory::new(),
            self_host: None,
            community: Vec::new(),
            familiar: Vec::new(),
            cached_centrality: 0.0,
            cached_local_centrality: 0.0,
            centrality_computed_at: None,
        }
    }

    /// Simple-threshold admission only needs this host's own contact
    /// history, so it can run as soon as a contact closes.
    fn recompute_membership_simple(&mut self, peer: HostId) {
        if let CommunityDetection::Simple { threshold_ticks } = self.detection {
            if self.history.total_duration_ticks(peer) >= threshold_ticks && !self.community.contains(&peer) {
                self.community.push(peer);
            }
        }
    }

    /// K-clique admission needs the peer's *own* familiar set, which is only
    /// available while connected — run once per connected peer per tick
    /// from `update`.
    fn recompute_membership_kclique(&mut self, peer: HostId, peer_familiar: &[HostId]) {
        if let CommunityDetection::KClique { k } = self.detection {
            if self.community.contains(&peer) {
                return;
            }
            let overlap = peer_familiar.iter().filter(|h| self.community.contains(h)).count() as u32;
            if overlap >= k {
                self.community.push(peer);
            }
        }
    }

    /// Count unique hosts with a qualifying contact, optionally restricted
    /// to `restrict_to` (local centrality filters to the local community;
    /// global centrality passes `None`).
    fn unique_contacts(&self, now: Tick, restrict_to: Option<&[HostId]>) -> f32 {
        let mut count = 0u32;
        for peer in self.history.known_peers() {
            if let Some(allowed) = restrict_to {
                if !allowed.contains(&peer) {
                    continue;
                }
            }
            let qualifies = match self.centrality_metric {
                CentralityMetric::SWindow { window_ticks } => self
                    .history
                    .finished_contacts(peer)
                    .iter()
                    .any(|w| now.since(w.end) <= window_ticks),
                CentralityMetric::CWindow => self.history.contact_count(peer) > 0,
            };
            if qualifies {
                count += 1;
            }
        }
        count as f32
    }

    /// Recompute both centralities once per tick; cheap to call repeatedly
    /// within the same tick.
    fn refresh_centrality(&mut self, now: Tick) {
        if self.centrality_computed_at == Some(now) {
            return;
        }
        self.cached_centrality = self.unique_contacts(now, None);
        self.cached_local_centrality = self.unique_contacts(now, Some(&self.community));
        self.centrality_computed_at = Some(now);
    }
}

impl Router for BubbleRapRouter {
    fn accept(&self, msg: &Message, buffer: &Buffer) -> bool {
        !buffer.has_seen(&msg.id)
    }

    fn next_message_to_remove(&self, buffer: &Buffer, incoming_size: u64) -> Option<MessageId> {
        fifo_victim(buffer, incoming_size)
    }

    fn on_connection_up(&mut self, peer: HostId, now: Tick) {
        self.history.open(peer, now);
    }

    fn on_connection_down(&mut self, peer: HostId, now: Tick) {
        self.history.close(peer, now);
        if !self.familiar.contains(&peer) {
            self.familiar.push(peer);
        }
        self.recompute_membership_simple(peer);
    }

    fn update(&mut self, view: &PeerView<'_>, now: Tick) -> Vec<TransferRequest> {
        if self.self_host.is_none() {
            self.self_host = Some(view.self_host);
            if !self.community.contains(&view.self_host) {
                self.community.push(view.self_host);
            }
        }
        self.refresh_centrality(now);

        let mut out = final_deliveries(view);

        for peer in &view.peers {
            self.recompute_membership_kclique(peer.host, peer.router.familiar_set());
        }

        for peer in &view.peers {
            for msg in view.self_buffer.iter() {
                if msg.to == view.self_host || peer.buffer.has_seen(&msg.id) {
                    continue;
                }
                let dest_in_own_community = self.community.contains(&msg.to);
                let dest_in_peer_community = peer.router.community_members().contains(&msg.to);
                let forward = if dest_in_own_community {
                    // Local bubble: only forward to a fellow community
                    // member with higher local centrality.
                    dest_in_peer_community && peer.router.local_centrality() > self.cached_local_centrality
                } else {
                    // Global bubble: climb towards higher global centrality,
                    // or hand straight to a host that already bubbled the
                    // destination into its own community.
                    peer.router.centrality() > self.cached_centrality || dest_in_peer_community
                };
                if forward {
                    out.push(TransferRequest {
                        peer: peer.host,
                        message_id: msg.id.clone(),
                    });
                }
            }
        }
        out
    }

    fn community_members(&self) -> &[HostId] {
        &self.community
    }

    fn centrality(&self) -> f32 {
        self.cached_centrality
    }

    fn familiar_set(&self) -> &[HostId] {
        &self.familiar
    }

    fn local_centrality(&self) -> f32 {
        self.cached_local_centrality
    }
}
