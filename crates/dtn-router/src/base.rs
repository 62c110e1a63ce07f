//! Shared router-base logic usable by every strategy.
//!
//! Final delivery is not a policy decision — every strategy hands a message
//! straight to its destination host the moment they're connected, regardless
//! of forwarding rules. `final_deliveries` implements that once so strategy
//! `update()` bodies only need to add their own relay logic on top.

use dtn_net::{Buffer, MessageId};

use crate::peer_view::PeerView;
use crate::router::TransferRequest;

/// Oldest-first (FIFO) eviction victim — the simplest drop policy and the
/// default fallback used by strategies that don't implement their own.
pub fn fifo_victim(buffer: &Buffer, incoming_size: u64) -> Option<MessageId> {
    if buffer.has_room_for(incoming_size) {
        return None;
    }
    buffer.iter().next().map(|m| m.id.clone())
}

/// Pick the oldest message whose size is at least `min_bytes` to evict —
/// used by queueing policies that only want to drop "big enough" messages
/// to free exactly the needed space in as few evictions as possible.
pub fn largest_victim(buffer: &Buffer) -> Option<MessageId> {
    buffer.iter().max_by_key(|m| m.size_bytes).map(|m| m.id.clone())
}

/// Requests to hand every message addressed to a directly connected peer
/// straight to that peer, if it doesn't already have a copy.
pub fn final_deliveries(view: &PeerView<'_>) -> Vec<TransferRequest> {
    let mut out = Vec::new();
    for peer in &view.peers {
        for msg in view.self_buffer.iter() {
            if msg.to == peer.host && !peer.buffer.has_seen(&msg.id) {
                out.push(TransferRequest {
                    peer: peer.host,
                    message_id: msg.id.clone(),
                });
            }
        }
    }
    out
}

/// Flood every message the peer doesn't already have, except messages
/// destined for `self_host` itself (those have nowhere further to go) and
/// messages already forwarded to that exact peer before (hop path check) —
/// used by Epidemic and as the fallback relay pass for several other
/// strategies.
pub fn flood_missing(view: &PeerView<'_>) -> Vec<TransferRequest> {
    let mut out = Vec::new();
    for peer in &view.peers {
        for msg in view.self_buffer.iter() {
            if msg.to == view.self_host {
                continue;
            }
            if peer.buffer.has_seen(&msg.id) {
                continue;
            }
            if msg.hop_path.contains(&peer.host) {
                continue;
            }
            out.push(TransferRequest {
                peer: peer.host,
                message_id: msg.id.clone(),
            });
        }
    }
    out
}
