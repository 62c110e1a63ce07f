//! Connection state machine.

use dtn_core::{ConnectionId, HostId, InterfaceId, Tick};

use crate::message::MessageId;

/// Up/down lifecycle state of a `Connection`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectionState {
    /// Up, no transfer currently in flight in either direction.
    UpIdle,
    /// Up, with exactly one in-flight transfer.
    UpTransferring,
    /// Torn down — endpoints left range or a host was removed. A `Connection`
    /// in this state is retained by `dtn-sim` only long enough to fire the
    /// `on_connection_down` listener, then dropped from the arena.
    Down,
}

/// A bidirectional radio link between two interfaces on distinct hosts.
///
/// `host_a < host_b` is not guaranteed — the pair is ordered by discovery,
/// not by id. Direction of an in-flight transfer is tracked explicitly via
/// `transfer_from`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    pub id: ConnectionId,
    pub host_a: HostId,
    pub interface_a: InterfaceId,
    pub host_b: HostId,
    pub interface_b: InterfaceId,
    pub state: ConnectionState,
    pub opened_at: Tick,
    /// `min(interface_a.transmit_speed_bps, interface_b.transmit_speed_bps)`.
    pub speed_bps: f64,

    in_flight: Option<Transfer>,
}

/// Bookkeeping for the single transfer this connection may carry at a time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transfer {
    pub message_id: MessageId,
    pub from: HostId,
    pub to: HostId,
    pub bytes_sent: u64,
    pub total_bytes: u64,
    pub started_at: Tick,
}

impl Transfer {
    pub fn is_complete(&self) -> bool {
        self.bytes_sent >= self.total_bytes
    }

    pub fn remaining_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.bytes_sent)
    }
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        host_a: HostId,
        interface_a: InterfaceId,
        host_b: HostId,
        interface_b: InterfaceId,
        speed_bps: f64,
        opened_at: Tick,
    ) -> Self {
        Self {
            id,
            host_a,
            interface_a,
            host_b,
            interface_b,
            state: ConnectionState::UpIdle,
            opened_at,
            speed_bps,
            in_flight: None,
        }
    }

    /// The host on the other end of this connection from `from`.
    ///
    /// # Panics
    /// Panics if `from` is neither endpoint — a caller bug, not a runtime condition.
    pub fn other(&self, from: HostId) -> HostId {
        if from == self.host_a {
            self.host_b
        } else if from == self.host_b {
            self.host_a
        } else {
            panic!("host {from} is not an endpoint of connection {}", self.id);
        }
    }

    pub fn has_endpoint(&self, host: HostId) -> bool {
        host == self.host_a || host == self.host_b
    }

    pub fn in_flight(&self) -> Option<&Transfer> {
        self.in_flight.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    /// Begin transferring `message_id` from `from` to the peer.
    ///
    /// # Panics
    /// Debug-asserts the connection was idle — the router base is
    /// responsible for checking `is_idle()` before calling this.
    pub fn start_transfer(&mut self, message_id: MessageId, from: HostId, total_bytes: u64, now: Tick) {
        debug_assert!(self.in_flight.is_none(), "connection {} already transferring", self.id);
        let to = self.other(from);
        self.in_flight = Some(Transfer {
            message_id,
            from,
            to,
            bytes_sent: 0,
            total_bytes,
            started_at: now,
        });
        self.state = ConnectionState::UpTransferring;
    }

    /// Advance the in-flight transfer by the bytes deliverable in one tick
    /// at `self.speed_bps` over `tick_duration_secs`.
    ///
    /// Returns the completed `Transfer` if this step finished it.
    pub fn progress(&mut self, tick_duration_secs: f64) -> Option<Transfer> {
        let done = {
            let t = self.in_flight.as_mut()?;
            let deliverable = (self.speed_bps * tick_duration_secs).max(0.0) as u64;
            t.bytes_sent = (t.bytes_sent + deliverable).min(t.total_bytes);
            t.is_complete()
        };
        if done {
            self.state = ConnectionState::UpIdle;
            self.in_flight.take()
        } else {
            None
        }
    }

    /// Abort any in-flight transfer (peer went out of range mid-transfer).
    pub fn abort_transfer(&mut self) -> Option<Transfer> {
        self.state = ConnectionState::UpIdle;
        self.in_flight.take()
    }
}

/// Arena storage for connections, keyed by `ConnectionId`.
pub struct ConnectionStore {
    connections: Vec<Option<Connection>>,
}

impl ConnectionStore {
    pub fn new() -> Self {
        Self { connections: Vec::new() }
    }

    pub fn push(
        &mut self,
        host_a: HostId,
        interface_a: InterfaceId,
        host_b: HostId,
        interface_b: InterfaceId,
        speed_bps: f64,
        now: Tick,
    ) -> ConnectionId {
        let id = ConnectionId(self.connections.len() as u32);
        self.connections
            .push(Some(Connection::new(id, host_a, interface_a, host_b, interface_b, speed_bps, now)));
        id
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.index())?.as_ref()
    }

    pub fn get_mut(&mut self, id: ConnectionId) -> Option<&mut Connection> {
        self.connections.get_mut(id.index())?.as_mut()
    }

    /// Remove a connection from the arena (after its `on_connection_down`
    /// listener has fired).
    pub fn remove(&mut self, id: ConnectionId) -> Option<Connection> {
        self.connections.get_mut(id.index())?.take()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter_map(|c| c.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Connection> {
        self.connections.iter_mut().filter_map(|c| c.as_mut())
    }

    /// Connections with both endpoints equal to `(a, b)` in either order.
    pub fn between(&self, a: HostId, b: HostId) -> Option<&Connection> {
        self.iter().find(|c| c.has_endpoint(a) && c.has_endpoint(b))
    }
}

impl Default for ConnectionStore {
    fn default() -> Self {
        Self::new()
    }
}
