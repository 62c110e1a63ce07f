//! PeopleRank routing: a PageRank-style social rank computed over a
//! static group membership graph, refreshed from peers met at each contact.

use rustc_hash::FxHashMap;

use dtn_core::{HostId, Tick};
use dtn_net::{Buffer, Message, MessageId};

use crate::base::{fifo_victim, final_deliveries};
use crate::peer_view::PeerView;
use crate::router::{Router, TransferRequest};

pub const DEFAULT_DAMPING: f32 = 0.8;

/// Static host→group table built once after host construction. Shared (`Arc`) across every `PeopleRankRouter`
/// in the simulation rather than recomputed per host.
pub struct SocialGraph {
    group_of: FxHashMap<HostId, String>,
}

impl SocialGraph {
    pub fn new(group_of: FxHashMap<HostId, String>) -> Self {
        Self { group_of }
    }

    pub fn group(&self, host: HostId) -> Option<&str> {
        self.group_of.get(&host).map(String::as_str)
    }

    /// All other hosts sharing `host`'s group.
    pub fn neighbors_of(&self, host: HostId) -> Vec<HostId> {
        let Some(group) = self.group(host) else {
            return Vec::new();
        };
        self.group_of
            .iter()
            .filter(|(h, g)| **h != host && g.as_str() == group)
            .map(|(h, _)| *h)
            .collect()
    }
}

pub struct PeopleRankRouter {
    damping: f32,
    neighbors: Vec<HostId>,
    rank: f32,
    /// Latest `(rank, degree)` heard from each neighbor, refreshed on contact.
    peer_state: FxHashMap<HostId, (f32, u32)>,
}

impl PeopleRankRouter {
    pub fn new(host: HostId, graph: &SocialGraph, damping: f32) -> Self {
        Self {
            damping,
            neighbors: graph.neighbors_of(host),
            rank: 1.0 - damping,
            peer_state: FxHashMap::default(),
        }
    }

    fn recompute(&mut self) {
        let contribution: f32 = self
            .neighbors
            .iter()
            .filter_map(|n| self.peer_state.get(n))
            .map(|(rank, degree)| if *degree > 0 { rank / *degree as f32 } else { 0.0 })
            .sum();
        self.rank = (1.0 - self.damping) + self.damping * contribution;
    }
}

impl Router for PeopleRankRouter {
    fn accept(&self, msg: &Message, buffer: &Buffer) -> bool {
        !buffer.has_seen(&msg.id)
    }

    fn next_message_to_remove(&self, buffer: &Buffer, incoming_size: u64) -> Option<MessageId> {
        fifo_victim(buffer, incoming_size)
    }

    fn update(&mut self, view: &PeerView<'_>, _now: Tick) -> Vec<TransferRequest> {
        for peer in &view.peers {
            if self.neighbors.contains(&peer.host) {
                self.peer_state
                    .insert(peer.host, (peer.router.social_rank(), peer.router.social_degree()));
            }
        }
        self.recompute();

        let mut out = final_deliveries(view);
        for peer in &view.peers {
            for msg in view.self_buffer.iter() {
                if msg.to == view.self_host || peer.buffer.has_seen(&msg.id) {
                    continue;
                }
                if peer.router.social_rank() > self.rank {
                    out.push(TransferRequest {
                        peer: peer.host,
                        message_id: msg.id.clone(),
                    });
                }
            }
        }
        out
    }

    fn social_rank(&self) -> f32 {
        self.rank
    }

    fn social_degree(&self) -> u32 {
        self.neighbors.len() as u32
    }
}
