//! Spray-and-Focus routing: identical spray phase to binary
//! Spray-and-Wait; once down to a single copy, switch to a focus phase that
//! hands the only copy off based on which peer saw the destination most
//! recently.

use rustc_hash::{FxHashMap, FxHashSet};

use dtn_core::{HostId, Tick};
use dtn_net::{Buffer, Message, MessageId};

use crate::base::{fifo_victim, final_deliveries};
use crate::peer_view::PeerView;
use crate::router::{Router, TransferRequest};

pub struct SprayAndFocusRouter {
    initial_copies: u32,
    copies: FxHashMap<MessageId, u32>,
    /// Most recent tick this host was directly connected to each peer —
    /// the recency signal the focus phase compares across hosts.
    last_encounter: FxHashMap<HostId, Tick>,
    /// Messages this host has already handed to a peer as a single-copy
    /// focus-phase transfer but not yet confirmed complete. A message in
    /// this set is never re-offered — its own buffer copy is dropped once
    /// the transfer actually finishes (see `drop_own_copy_after_send`), not
    /// speculatively here, so a message never exists as two full copies.
    focusing: FxHashSet<MessageId>,
}

impl SprayAndFocusRouter {
    pub fn new(initial_copies: u32) -> Self {
        Self {
            initial_copies: initial_copies.max(1),
            copies: FxHashMap::default(),
            last_encounter: FxHashMap::default(),
            focusing: FxHashSet::default(),
        }
    }

    fn copies_for(&mut self, msg: &Message) -> u32 {
        *self.copies.entry(msg.id.clone()).or_insert(self.initial_copies)
    }

    /// Peer to hand the single remaining copy to: the connected peer with a
    /// strictly fresher encounter with `dest` than this host has (or any
    /// encounter at all, if this host has never met `dest` directly).
    fn best_focus_peer(&self, view: &PeerView<'_>, dest: HostId, msg_id: &MessageId) -> Option<HostId> {
        let self_last = self.last_encounter.get(&dest).copied();
        view.peers
            .iter()
            .filter(|p| !p.buffer.has_seen(msg_id))
            .filter_map(|p| p.router.last_contact_with(dest).map(|t| (p.host, t)))
            .filter(|(_, peer_last)| match self_last {
                Some(ours) => *peer_last > ours,
                None => true,
            })
            .max_by_key(|(_, peer_last)| *peer_last)
            .map(|(host, _)| host)
    }
}

impl Router for SprayAndFocusRouter {
    fn accept(&self, msg: &Message, buffer: &Buffer) -> bool {
        !buffer.has_seen(&msg.id)
    }

    fn next_message_to_remove(&self, buffer: &Buffer, incoming_size: u64) -> Option<MessageId> {
        fifo_victim(buffer, incoming_size)
    }

    fn on_connection_up(&mut self, peer: HostId, now: Tick) {
        self.last_encounter.insert(peer, now);
    }

    fn on_transfer_done(&mut self, msg: &Message, delivered: bool, _now: Tick) {
        if delivered {
            self.copies.remove(&msg.id);
            self.focusing.remove(&msg.id);
        } else if self.focusing.remove(&msg.id) {
            self.copies.remove(&msg.id);
        }
    }

    fn update(&mut self, view: &PeerView<'_>, _now: Tick) -> Vec<TransferRequest> {
        let mut out = final_deliveries(view);

        let mut halved: Vec<(MessageId, u32)> = Vec::new();

        for msg in view.self_buffer.iter() {
            if msg.to == view.self_host || self.focusing.contains(&msg.id) {
                continue;
            }
            let current = self.copies_for(msg);
            if current > 1 {
                for peer in &view.peers {
                    if peer.buffer.has_seen(&msg.id) {
                        continue;
                    }
                    let given = (current / 2).max(1);
                    out.push(TransferRequest {
                        peer: peer.host,
                        message_id: msg.id.clone(),
                    });
                    halved.push((msg.id.clone(), current - given));
                    break;
                }
            } else if let Some(peer) = self.best_focus_peer(view, msg.to, &msg.id) {
                out.push(TransferRequest {
                    peer,
                    message_id: msg.id.clone(),
                });
                self.focusing.insert(msg.id.clone());
            }
        }

        for (id, kept) in halved {
            self.copies.insert(id, kept);
        }
        out
    }

    fn copies_remaining(&self, msg: &MessageId) -> Option<u32> {
        self.copies.get(msg).copied()
    }

    fn last_contact_with(&self, host: HostId) -> Option<Tick> {
        self.last_encounter.get(&host).copied()
    }

    fn drop_own_copy_after_send(&self, msg_id: &MessageId) -> bool {
        self.focusing.contains(msg_id)
    }
}
