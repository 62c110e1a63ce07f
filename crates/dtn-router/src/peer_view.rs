//! Read-only cross-host query surface handed to `Router::update`.

use dtn_core::HostId;
use dtn_net::Buffer;

use crate::router::Router;

/// A connected peer, as seen from the host whose `Router::update` is running.
pub struct PeerHandle<'a> {
    pub host: HostId,
    pub buffer: &'a Buffer,
    pub router: &'a dyn Router,
}

/// Everything one host's router may read about itself and its currently
/// idle-connected peers during `update()`.
///
/// Built fresh by `dtn-sim` each tick from the hosts a given host has an
/// `UpIdle` connection to — strategies never reach further than one hop, by
/// construction (matching the "sees only directly connected peers" contract
/// every opportunistic routing strategy in this family assumes).
pub struct PeerView<'a> {
    pub self_host: HostId,
    pub self_buffer: &'a Buffer,
    pub peers: Vec<PeerHandle<'a>>,
}

impl<'a> PeerView<'a> {
    pub fn peer(&self, host: HostId) -> Option<&PeerHandle<'a>> {
        self.peers.iter().find(|p| p.host == host)
    }
}
