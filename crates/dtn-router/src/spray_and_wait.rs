//! Spray-and-Wait routing: each message starts with `L` copies. The
//! spray phase halves the copy count and gives half away per relay (binary)
//! or gives away one at a time (standard); once a host is down to a single
//! copy it only hands the message to its final destination (wait phase).

use rustc_hash::FxHashMap;

use dtn_core::Tick;
use dtn_net::{Buffer, Message, MessageId, PropertyValue};

use crate::base::{fifo_victim, final_deliveries};
use crate::peer_view::PeerView;
use crate::router::{Router, TransferRequest};

const COPIES_PROPERTY: &str = "SprayAndWaitRouter.copies";

/// Binary halves the copy count with each handoff; standard decrements by
/// exactly one (so the same initial `L` lasts through more hops at the cost
/// of slower initial spread).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SprayMode {
    Binary,
    Standard,
}

pub struct SprayAndWaitRouter {
    mode: SprayMode,
    initial_copies: u32,
    /// Copies remaining per message, tracked independently of the message's
    /// own property bag so a message created by the event generator doesn't
    /// need to know about this strategy at all.
    copies: FxHashMap<MessageId, u32>,
}

impl SprayAndWaitRouter {
    pub fn new(mode: SprayMode, initial_copies: u32) -> Self {
        Self {
            mode,
            initial_copies: initial_copies.max(1),
            copies: FxHashMap::default(),
        }
    }

    fn copies_for(&mut self, msg: &Message) -> u32 {
        *self.copies.entry(msg.id.clone()).or_insert(self.initial_copies)
    }

    /// Copies handed to the peer, and copies this host keeps, after one handoff.
    fn split(&self, current: u32) -> (u32, u32) {
        match self.mode {
            SprayMode::Binary => {
                let given = current / 2;
                (given.max(1), current - given.max(1))
            }
            SprayMode::Standard => (1, current.saturating_sub(1)),
        }
    }

    pub fn copies_remaining_for(&self, msg: &MessageId) -> Option<u32> {
        self.copies.get(msg).copied()
    }
}

impl Router for SprayAndWaitRouter {
    fn accept(&self, msg: &Message, buffer: &Buffer) -> bool {
        !buffer.has_seen(&msg.id)
    }

    fn next_message_to_remove(&self, buffer: &Buffer, incoming_size: u64) -> Option<MessageId> {
        fifo_victim(buffer, incoming_size)
    }

    fn on_transfer_done(&mut self, msg: &Message, delivered: bool, _now: Tick) {
        if delivered {
            self.copies.remove(&msg.id);
        }
    }

    fn update(&mut self, view: &PeerView<'_>, _now: Tick) -> Vec<TransferRequest> {
        let mut out = final_deliveries(view);

        let mut splits: Vec<(MessageId, u32, u32)> = Vec::new();
        for msg in view.self_buffer.iter() {
            if msg.to == view.self_host {
                continue;
            }
            let current = self.copies_for(msg);
            if current <= 1 {
                continue; // wait phase: only final_deliveries may move this message further
            }
            for peer in &view.peers {
                if peer.buffer.has_seen(&msg.id) {
                    continue;
                }
                let (given, kept) = self.split(current);
                out.push(TransferRequest {
                    peer: peer.host,
                    message_id: msg.id.clone(),
                });
                splits.push((msg.id.clone(), given, kept));
                break; // spray to exactly one peer per tick per message
            }
        }
        for (id, _given, kept) in splits {
            self.copies.insert(id, kept);
        }
        out
    }

    fn copies_remaining(&self, msg: &MessageId) -> Option<u32> {
        self.copies_remaining_for(msg)
    }
}

/// Stamp the handed-over copy count onto the message's property bag so a
/// receiving router (potentially a different process/instance, e.g. after a
/// checkpoint restore) can recover `given` copies without re-deriving it.
/// Called by `dtn-sim` after a spray transfer completes.
pub fn stamp_copies(msg: &mut Message, copies: u32) {
    msg.set_property(COPIES_PROPERTY, PropertyValue::Int(copies as i64));
}
