//! The `Router` trait — the main extension point for routing strategies.

use dtn_core::{HostId, Tick};
use dtn_net::{Buffer, Message, MessageId};

use crate::peer_view::PeerView;

/// A request, produced by [`Router::update`], to start moving one message
/// across one idle connection.
///
/// `dtn-sim` executes these after `update()` returns: it checks the
/// connection is still idle and the peer's `accept()` still approves, then
/// calls `Connection::start_transfer`.
#[derive(Clone, Debug)]
pub struct TransferRequest {
    pub peer: HostId,
    pub message_id: MessageId,
}

/// Pluggable per-host routing strategy.
///
/// Each `Host` owns exactly one boxed `Router` instance.
/// Cross-host inspection (PRoPHET's predictability comparison, Bubble Rap's
/// community/centrality checks) happens through the *generic query methods*
/// below — `dtn-sim` hands every strategy a [`PeerView`] built from
/// `&dyn Router` references to connected peers' routers, so strategies read
/// each other's state through trait methods, never by downcasting to a
/// concrete type.
pub trait Router: Send {
    /// Should an incoming copy of `msg` be accepted into `buffer`?
    ///
    /// Called before any bytes are transferred. The default implementation
    /// denies only already-delivered/duplicate messages and defers space
    /// accounting to `next_message_to_remove`; strategies override this to
    /// add policy-specific rejection (e.g. Spray-and-Wait denies a copy with
    /// zero remaining spray count).
    fn accept(&self, msg: &Message, buffer: &Buffer) -> bool {
        !buffer.has_seen(&msg.id)
    }

    /// Which message should be evicted to make room for an incoming message
    /// of `incoming_size` bytes? `None` means "nothing need be evicted" or
    /// "this strategy never evicts" (caller then falls back to denying the
    /// incoming transfer).
    fn next_message_to_remove(&self, buffer: &Buffer, incoming_size: u64) -> Option<MessageId>;

    /// A connection to `peer` has just come up.
    fn on_connection_up(&mut self, _peer: HostId, _now: Tick) {}

    /// A connection to `peer` has just gone down.
    fn on_connection_down(&mut self, _peer: HostId, _now: Tick) {}

    /// A transfer of `msg` finished — `delivered = true` if `msg.to` was the
    /// receiving host (final delivery), `false` if it was only relayed.
    fn on_transfer_done(&mut self, _msg: &Message, _delivered: bool, _now: Tick) {}

    /// Decide which messages to start sending across currently-idle
    /// connections this tick. `view` exposes this host's own buffer plus a
    /// read-only handle to every peer currently connected with an idle link.
    fn update(&mut self, view: &PeerView<'_>, now: Tick) -> Vec<TransferRequest>;

    // ── Cross-host query surface (defaults: "I have no opinion") ──────────

    /// PRoPHET delivery predictability to `dest`, in `[0, 1]`.
    fn predictability(&self, _dest: HostId) -> f32 {
        0.0
    }

    /// Spray-and-Wait copies remaining for `msg`, if this router is tracking it.
    fn copies_remaining(&self, _msg: &MessageId) -> Option<u32> {
        None
    }

    /// Bubble Rap: host ids in this router's detected local community.
    fn community_members(&self) -> &[HostId] {
        &[]
    }

    /// Bubble Rap / SimBet: a scalar centrality estimate for this host.
    fn centrality(&self) -> f32 {
        0.0
    }

    /// PeopleRank-style social rank for this host, in `[0, 1]`.
    fn social_rank(&self) -> f32 {
        0.0
    }

    /// PeopleRank-style social graph degree (neighbor count) for this host.
    fn social_degree(&self) -> u32 {
        0
    }

    /// Spray-and-Focus: the last tick this host was directly connected to
    /// `host`, if this router tracks encounter recency.
    fn last_contact_with(&self, _host: HostId) -> Option<Tick> {
        None
    }

    /// PRoPHET: every destination this router currently holds a (possibly
    /// aged-to-zero) predictability entry for. Used by a peer applying the
    /// transitive update `P(a,c) += (1-P(a,c)) * P(a,b) * P(b,c) * beta` over
    /// every `c` the peer has an opinion on.
    fn known_dests(&self) -> Vec<HostId> {
        Vec::new()
    }

    /// Bubble Rap: host ids this router has directly encountered at least
    /// once, independent of community admission. The K-clique rule consults a
    /// peer's `familiar_set` to test overlap against the local community.
    fn familiar_set(&self) -> &[HostId] {
        &[]
    }

    /// Bubble Rap: centrality restricted to this router's local community,
    /// distinct from the global `centrality()` used for the global bubble
    /// phase.
    fn local_centrality(&self) -> f32 {
        0.0
    }

    /// Spray-and-Focus: should the sender drop its own copy once a transfer
    /// of `msg_id` to a peer completes without delivery? Used for the
    /// single-copy focus-phase handoff, where forwarding relinquishes the
    /// copy rather than retaining it alongside the peer's.
    fn drop_own_copy_after_send(&self, _msg_id: &MessageId) -> bool {
        false
    }
}
