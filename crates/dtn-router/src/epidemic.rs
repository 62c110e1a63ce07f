//! Epidemic routing: flood every message to every peer that doesn't
//! already have it. No per-message state, no limits — the baseline every
//! other strategy is measured against.

use dtn_core::Tick;
use dtn_net::{Buffer, MessageId};

use crate::base::{fifo_victim, final_deliveries, flood_missing};
use crate::peer_view::PeerView;
use crate::router::{Router, TransferRequest};

#[derive(Default)]
pub struct EpidemicRouter;

impl EpidemicRouter {
    pub fn new() -> Self {
        Self
    }
}

impl Router for EpidemicRouter {
    fn next_message_to_remove(&self, buffer: &Buffer, incoming_size: u64) -> Option<MessageId> {
        fifo_victim(buffer, incoming_size)
    }

    fn update(&mut self, view: &PeerView<'_>, _now: Tick) -> Vec<TransferRequest> {
        let mut out = final_deliveries(view);
        out.extend(flood_missing(view));
        out
    }
}
