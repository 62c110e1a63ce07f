//! Fluent builder for assembling a `HostStore` + `HostRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use dtn_core::Position;
//! use dtn_net::HostStoreBuilder;
//!
//! let (mut store, mut rngs) = HostStoreBuilder::new(/*seed=*/ 42)
//!     .host("p0", Position::new(0.0, 0.0), 5_000_000)
//!     .interface("wlan", 10.0, 250_000.0)
//!     .host("p1", Position::new(5.0, 0.0), 5_000_000)
//!     .interface("wlan", 10.0, 250_000.0)
//!     .build();
//!
//! assert_eq!(store.host_count(), 2);
//! assert_eq!(rngs.len(), 2);
//! ```

use dtn_core::Position;

use crate::host::{HostRngs, HostStore};

/// Fluent builder for [`HostStore`] + [`HostRngs`].
///
/// `.host(..)` starts a new host; subsequent `.interface(..)` calls attach
/// interfaces to the most recently added host. This mirrors how a scenario
/// config is walked: one host block, each with one or more interface blocks.
pub struct HostStoreBuilder {
    seed: u64,
    store: HostStore,
    current_host: Option<dtn_core::HostId>,
}

impl HostStoreBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            store: HostStore::new(),
            current_host: None,
        }
    }

    /// Add a host; subsequent `.interface(..)` calls attach to this host.
    pub fn host(mut self, name: impl Into<String>, position: Position, buffer_capacity_bytes: u64) -> Self {
        let id = self.store.push_host(name, position, buffer_capacity_bytes);
        self.current_host = Some(id);
        self
    }

    /// Attach an interface to the host added by the preceding `.host(..)` call.
    ///
    /// # Panics
    /// Panics if called before any `.host(..)` — a builder-usage bug, not a
    /// runtime condition reachable from scenario data.
    pub fn interface(mut self, name: impl Into<String>, transmit_range_m: f32, transmit_speed_bps: f64) -> Self {
        let host = self.current_host.expect("interface() called before host()");
        self.store.push_interface(host, name, transmit_range_m, transmit_speed_bps);
        self
    }

    pub fn build(self) -> (HostStore, HostRngs) {
        let count = self.store.host_count();
        let rngs = HostRngs::new(count, self.seed);
        (self.store, rngs)
    }
}
