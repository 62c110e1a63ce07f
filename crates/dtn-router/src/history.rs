//! Per-router connection history.
//!
//! Used by Bubble Rap's community detection and centrality estimators, and
//! available to any strategy that wants contact-duration statistics.

use rustc_hash::FxHashMap;

use dtn_core::{HostId, Tick};

/// One finished contact window.
#[derive(Copy, Clone, Debug)]
pub struct ContactWindow {
    pub start: Tick,
    pub end: Tick,
}

impl ContactWindow {
    pub fn duration_ticks(&self) -> u64 {
        self.end.since(self.start)
    }
}

/// Per-peer contact history for one host's router.
///
/// Not `Sync` by design — each host's router instance owns its own history
/// and this crate assumes the single-threaded cooperative tick loop, so
/// no locking is needed.
#[derive(Default, Debug)]
pub struct ConnectionHistory {
    finished: FxHashMap<HostId, Vec<ContactWindow>>,
    open: FxHashMap<HostId, Tick>,
}

impl ConnectionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a connection coming up with `peer` at `now`.
    pub fn open(&mut self, peer: HostId, now: Tick) {
        self.open.insert(peer, now);
    }

    /// Record a connection going down with `peer` at `now`. No-op if there
    /// was no matching open contact (defensive against out-of-order events).
    pub fn close(&mut self, peer: HostId, now: Tick) {
        if let Some(start) = self.open.remove(&peer) {
            self.finished.entry(peer).or_default().push(ContactWindow { start, end: now });
        }
    }

    pub fn is_open(&self, peer: HostId) -> bool {
        self.open.contains_key(&peer)
    }

    pub fn finished_contacts(&self, peer: HostId) -> &[ContactWindow] {
        self.finished.get(&peer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All peers this host has ever had a finished or open contact with.
    pub fn known_peers(&self) -> impl Iterator<Item = HostId> + '_ {
        let finished = self.finished.keys().copied();
        let open = self.open.keys().copied().filter(|p| !self.finished.contains_key(p));
        finished.chain(open)
    }

    /// Total finished-contact duration with `peer`, summed across all windows.
    pub fn total_duration_ticks(&self, peer: HostId) -> u64 {
        self.finished_contacts(peer).iter().map(|w| w.duration_ticks()).sum()
    }

    /// Number of finished contacts with `peer` — a simple frequency signal
    /// used by centrality estimators.
    pub fn contact_count(&self, peer: HostId) -> usize {
        self.finished_contacts(peer).len()
    }
}
