//! SimBet routing: forward towards peers that are either socially
//! similar to the destination or sit on many shortest social paths
//! (high betweenness).

use rustc_hash::FxHashSet;

use dtn_core::{HostId, Tick};
use dtn_net::{Buffer, Message, MessageId};

use crate::base::{fifo_victim, final_deliveries};
use crate::peer_view::PeerView;
use crate::router::{Router, TransferRequest};

pub const ALPHA: f32 = 0.7;
pub const BETA: f32 = 0.3;

pub struct SimBetRouter {
    contacts: Vec<HostId>,
    betweenness: f32,
}

impl SimBetRouter {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            betweenness: 0.0,
        }
    }

    fn jaccard(&self, peer_contacts: &[HostId]) -> f32 {
        if self.contacts.is_empty() && peer_contacts.is_empty() {
            return 0.0;
        }
        let self_set: FxHashSet<HostId> = self.contacts.iter().copied().collect();
        let peer_set: FxHashSet<HostId> = peer_contacts.iter().copied().collect();
        let intersection = self_set.intersection(&peer_set).count();
        let union = self_set.union(&peer_set).count();
        if union == 0 {
            0.0
        } else {
            intersection as f32 / union as f32
        }
    }

    fn utility(&self, peer_contacts: &[HostId], peer_betweenness: f32) -> f32 {
        ALPHA * self.jaccard(peer_contacts) + (1.0 - ALPHA) * peer_betweenness
    }
}

impl Default for SimBetRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Router for SimBetRouter {
    fn accept(&self, msg: &Message, buffer: &Buffer) -> bool {
        !buffer.has_seen(&msg.id)
    }

    fn next_message_to_remove(&self, buffer: &Buffer, incoming_size: u64) -> Option<MessageId> {
        fifo_victim(buffer, incoming_size)
    }

    fn on_connection_up(&mut self, peer: HostId, _now: Tick) {
        if !self.contacts.contains(&peer) {
            self.contacts.push(peer);
        }
    }

    fn update(&mut self, view: &PeerView<'_>, _now: Tick) -> Vec<TransferRequest> {
        // Betweenness: how many of our peers, besides self, have this peer in
        // their own contact set — recomputed and decayed every tick we see
        // at least one connection.
        for peer in &view.peers {
            let seen_by_others = view
                .peers
                .iter()
                .filter(|other| other.host != peer.host)
                .filter(|other| other.router.community_members().contains(&peer.host))
                .count();
            self.betweenness = self.betweenness * (1.0 - BETA) + seen_by_others as f32 * BETA;
        }

        let self_contacts = self.contacts.clone();
        let self_utility = self.utility(&self_contacts, self.betweenness);
        let mut out = final_deliveries(view);
        for peer in &view.peers {
            let peer_contacts = peer.router.community_members();
            let peer_utility = self.utility(peer_contacts, peer.router.centrality());
            for msg in view.self_buffer.iter() {
                if msg.to == view.self_host || peer.buffer.has_seen(&msg.id) {
                    continue;
                }
                if peer_utility > self_utility {
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
        // Not a real community — reuses this query slot to expose the raw
        // contact set so peers can compute Jaccard similarity and
        // betweenness against this host without a dedicated trait method.
        &self.contacts
    }

    fn centrality(&self) -> f32 {
        self.betweenness
    }
}
