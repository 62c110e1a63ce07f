//! Host and Interface topology primitives.

use dtn_core::{ConnectionId, HostId, InterfaceId, Position};

use crate::message::Buffer;

// ── Interface ─────────────────────────────────────────────────────────────────

/// A radio/network interface on a host.
///
/// Two interfaces may connect iff they belong to distinct hosts and each
/// lies within the other's `transmit_range_m`` as the
/// effective range, so range symmetry never has to be asserted per-pair).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interface {
    pub id: InterfaceId,
    pub host: HostId,
    /// Human-readable interface name, e.g. `"wlan"` (matches a scenario's
    /// `Group.Interface` label; used only for logging and reports).
    pub name: String,
    pub transmit_range_m: f32,
    pub transmit_speed_bps: f64,
    /// Connections currently up on this interface.
    pub connections: Vec<ConnectionId>,
}

impl Interface {
    pub fn new(
        id: InterfaceId,
        host: HostId,
        name: impl Into<String>,
        transmit_range_m: f32,
        transmit_speed_bps: f64,
    ) -> Self {
        Self {
            id,
            host,
            name: name.into(),
            transmit_range_m,
            transmit_speed_bps,
            connections: Vec::new(),
        }
    }

    pub fn is_connected_to(&self, conn: ConnectionId) -> bool {
        self.connections.contains(&conn)
    }
}

// ── Host ──────────────────────────────────────────────────────────────────────

/// A mobile network node.
///
/// The router instance is intentionally *not* a field here — `dtn-net` has no
/// dependency on `dtn-router` (that would be circular, since strategies
/// inspect `Host`/`Buffer` state via `PeerView`). `dtn-sim::World` pairs each
/// `HostId` with a router by parallel index.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Host {
    pub id: HostId,
    /// Display name composed of a group prefix and intra-group index, e.g. `"p12"`.
    pub name: String,
    pub position: Position,
    pub interfaces: Vec<InterfaceId>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub buffer: Buffer,
}

impl Host {
    pub fn new(id: HostId, name: impl Into<String>, position: Position, buffer_capacity_bytes: u64) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            interfaces: Vec::new(),
            buffer: Buffer::new(buffer_capacity_bytes),
        }
    }
}

// ── HostStore ─────────────────────────────────────────────────────────────────

/// Arena storage for all hosts, interfaces, and connections.
///
/// `HostId`/`InterfaceId`/`ConnectionId` are indices into the respective
/// `Vec`s. Storing entities by stable integer id rather than by
/// reference sidesteps the Host↔Interface↔Connection↔Host reference cycle
/// entirely — no `Rc`/`RefCell`/arena-crate machinery is needed.
pub struct HostStore {
    hosts: Vec<Host>,
    interfaces: Vec<Interface>,
}

impl HostStore {
    pub fn new() -> Self {
        Self {
            hosts: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    /// Add a host with no interfaces yet; returns its freshly assigned id.
    pub fn push_host(&mut self, name: impl Into<String>, position: Position, buffer_capacity_bytes: u64) -> HostId {
        let id = HostId(self.hosts.len() as u32);
        self.hosts.push(Host::new(id, name, position, buffer_capacity_bytes));
        id
    }

    /// Add an interface to an existing host.
    pub fn push_interface(
        &mut self,
        host: HostId,
        name: impl Into<String>,
        transmit_range_m: f32,
        transmit_speed_bps: f64,
    ) -> InterfaceId {
        let id = InterfaceId(self.interfaces.len() as u32);
        self.interfaces
            .push(Interface::new(id, host, name, transmit_range_m, transmit_speed_bps));
        self.hosts[host.index()].interfaces.push(id);
        id
    }

    pub fn host(&self, id: HostId) -> &Host {
        &self.hosts[id.index()]
    }

    pub fn host_mut(&mut self, id: HostId) -> &mut Host {
        &mut self.hosts[id.index()]
    }

    pub fn interface(&self, id: InterfaceId) -> &Interface {
        &self.interfaces[id.index()]
    }

    pub fn interface_mut(&mut self, id: InterfaceId) -> &mut Interface {
        &mut self.interfaces[id.index()]
    }

    pub fn host_ids(&self) -> impl Iterator<Item = HostId> + '_ {
        (0..self.hosts.len() as u32).map(HostId)
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn interfaces_of(&self, host: HostId) -> impl Iterator<Item = &Interface> + '_ {
        self.hosts[host.index()]
            .interfaces
            .iter()
            .map(move |iid| &self.interfaces[iid.index()])
    }
}

impl Default for HostStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── HostRngs ──────────────────────────────────────────────────────────────────

/// Per-host deterministic RNG state, kept alongside `HostStore` but in a
/// separate struct so callers can hold `&HostStore` and `&mut HostRngs`
/// simultaneously (mirrors the split used for per-agent RNGs elsewhere in
/// this stack).
pub struct HostRngs {
    inner: Vec<dtn_core::HostRng>,
}

impl HostRngs {
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| dtn_core::HostRng::new(global_seed, HostId(i)))
            .collect();
        Self { inner }
    }

    pub fn get_mut(&mut self, host: HostId) -> &mut dtn_core::HostRng {
        &mut self.inner[host.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn push(&mut self, global_seed: u64, host: HostId) {
        debug_assert_eq!(host.index(), self.inner.len());
        self.inner.push(dtn_core::HostRng::new(global_seed, host));
    }
}
