//! `RouterKind` — a closed tagged enum wrapping every concrete strategy
//!. Dispatch is a single `match`
//! per method rather than a `Box<dyn Router>` per host, so `dtn-sim` can hold
//! a plain `Vec<RouterKind>` indexed by `HostId` without heap allocation per
//! host.

use dtn_core::{HostId, Tick};
use dtn_net::{Buffer, Message, MessageId};

use crate::bubble_rap::BubbleRapRouter;
use crate::epidemic::EpidemicRouter;
use crate::peer_view::PeerView;
use crate::peoplerank::PeopleRankRouter;
use crate::prophet::ProphetRouter;
use crate::router::{Router, TransferRequest};
use crate::simbet::SimBetRouter;
use crate::spray_and_focus::SprayAndFocusRouter;
use crate::spray_and_wait::SprayAndWaitRouter;

pub enum RouterKind {
    Epidemic(EpidemicRouter),
    SprayAndWait(SprayAndWaitRouter),
    Prophet(ProphetRouter),
    BubbleRap(BubbleRapRouter),
    PeopleRank(PeopleRankRouter),
    SimBet(SimBetRouter),
    SprayAndFocus(SprayAndFocusRouter),
}

macro_rules! dispatch {
    ($self:ident, $method:ident ($($arg:expr),*)) => {
        match $self {
            RouterKind::Epidemic(r) => r.$method($($arg),*),
            RouterKind::SprayAndWait(r) => r.$method($($arg),*),
            RouterKind::Prophet(r) => r.$method($($arg),*),
            RouterKind::BubbleRap(r) => r.$method($($arg),*),
            RouterKind::PeopleRank(r) => r.$method($($arg),*),
            RouterKind::SimBet(r) => r.$method($($arg),*),
            RouterKind::SprayAndFocus(r) => r.$method($($arg),*),
        }
    };
}

impl Router for RouterKind {
    fn accept(&self, msg: &Message, buffer: &Buffer) -> bool {
        dispatch!(self, accept(msg, buffer))
    }

    fn next_message_to_remove(&self, buffer: &Buffer, incoming_size: u64) -> Option<MessageId> {
        dispatch!(self, next_message_to_remove(buffer, incoming_size))
    }

    fn on_connection_up(&mut self, peer: HostId, now: Tick) {
        dispatch!(self, on_connection_up(peer, now))
    }

    fn on_connection_down(&mut self, peer: HostId, now: Tick) {
        dispatch!(self, on_connection_down(peer, now))
    }

    fn on_transfer_done(&mut self, msg: &Message, delivered: bool, now: Tick) {
        dispatch!(self, on_transfer_done(msg, delivered, now))
    }

    fn update(&mut self, view: &PeerView<'_>, now: Tick) -> Vec<TransferRequest> {
        dispatch!(self, update(view, now))
    }

    fn predictability(&self, dest: HostId) -> f32 {
        dispatch!(self, predictability(dest))
    }

    fn copies_remaining(&self, msg: &MessageId) -> Option<u32> {
        dispatch!(self, copies_remaining(msg))
    }

    fn community_members(&self) -> &[HostId] {
        dispatch!(self, community_members())
    }

    fn centrality(&self) -> f32 {
        dispatch!(self, centrality())
    }

    fn social_rank(&self) -> f32 {
        dispatch!(self, social_rank())
    }

    fn social_degree(&self) -> u32 {
        dispatch!(self, social_degree())
    }

    fn last_contact_with(&self, host: HostId) -> Option<Tick> {
        dispatch!(self, last_contact_with(host))
    }

    fn known_dests(&self) -> Vec<HostId> {
        dispatch!(self, known_dests())
    }

    fn familiar_set(&self) -> &[HostId] {
        dispatch!(self, familiar_set())
    }

    fn local_centrality(&self) -> f32 {
        dispatch!(self, local_centrality())
    }

    fn drop_own_copy_after_send(&self, msg_id: &MessageId) -> bool {
        dispatch!(self, drop_own_copy_after_send(msg_id))
    }
}
