//! Messages and per-host buffers.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use dtn_core::{HostId, Tick};

// ── MessageId ─────────────────────────────────────────────────────────────────

/// A message's immutable string identity.
///
/// Backed by `Arc<str>` rather than `String` — a message is cloned into every
/// buffer that carries a copy, and event generators mint ids by formatting
/// `"{prefix}{counter}"` once at creation time.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageId(pub Arc<str>);

impl MessageId {
    pub fn new(s: impl Into<Arc<str>>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Property bag ──────────────────────────────────────────────────────────────

/// A single strategy-qualified property value attached to a `Message`.
///
/// Router strategies stash bookkeeping here (e.g. Spray-and-Wait's remaining
/// copy count, Bubble Rap's origin label) under keys of the form
/// `"SprayAndWaitRouter.copies"` so two strategies never collide.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl PropertyValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            PropertyValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }
}

// ── Message ───────────────────────────────────────────────────────────────────

/// An application message travelling through the network.
///
/// `Message` is cloned (not referenced) into every buffer that holds a copy;
/// `id` is what makes two clones "the same message" for delivery and aging
/// purposes. Mutating one host's copy (e.g. appending a hop) never affects
/// another host's copy of the same id — that's intentional, each buffer
/// tracks its own view (e.g. `received_at`).
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub id: MessageId,
    pub from: HostId,
    pub to: HostId,
    pub size_bytes: u64,
    /// Initial TTL in minutes, as authored (`Scenario.Events.Class.ttl` or
    /// equivalent); never mutated after creation.
    pub ttl_minutes: f64,
    /// Tick at which the message was created.
    pub created_at: Tick,
    /// Tick at which the current holder received this copy.
    pub received_at: Tick,
    /// Ordered list of hosts this copy has passed through, oldest first.
    /// Always starts with `from`.
    pub hop_path: Vec<HostId>,
    properties: HashMap<String, PropertyValue>,
}

impl Message {
    pub fn new(
        id: MessageId,
        from: HostId,
        to: HostId,
        size_bytes: u64,
        ttl_minutes: f64,
        created_at: Tick,
    ) -> Self {
        Self {
            id,
            from,
            to,
            size_bytes,
            ttl_minutes,
            created_at,
            received_at: created_at,
            hop_path: vec![from],
            properties: HashMap::new(),
        }
    }

    /// Expiry tick, computed from `ttl_minutes` via the clock's tick resolution.
    pub fn expires_at(&self, ticks_per_minute: impl Fn(f64) -> u64) -> Tick {
        self.created_at.offset(ticks_per_minute(self.ttl_minutes))
    }

    /// `true` once `now` has passed this message's expiry tick.
    pub fn is_expired(&self, now: Tick, ticks_per_minute: impl Fn(f64) -> u64) -> bool {
        now.since(self.created_at.min(now)) >= ticks_per_minute(self.ttl_minutes)
    }

    /// Append `host` to the hop path and bump `received_at`, as a copy moves
    /// to a new holder. Invariant: hop paths are strictly non-repeating
    /// in their final element — the caller must not append the current tail.
    pub fn record_hop(&mut self, host: HostId, now: Tick) {
        debug_assert_ne!(self.hop_path.last().copied(), Some(host));
        self.hop_path.push(host);
        self.received_at = now;
    }

    pub fn hop_count(&self) -> usize {
        self.hop_path.len().saturating_sub(1)
    }

    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.properties.insert(key.into(), value);
    }
}

// ── Buffer ────────────────────────────────────────────────────────────────────

/// A host's bounded message store.
///
/// `Buffer` only tracks membership and byte accounting; it has no opinion on
/// *which* message to evict when full — that decision belongs to the router's
/// drop policy (`Router::next_message_to_remove`), which is handed a
/// `&Buffer` and returns the victim's id.
#[derive(Debug)]
pub struct Buffer {
    capacity_bytes: u64,
    used_bytes: u64,
    messages: indexmap_like::InsertOrderMap,
    /// Ids already delivered to this host's application layer and evicted
    /// from `messages`. Delivery never re-inserts into `messages` — this is
    /// what makes a second, later-arriving copy of a delivered id get turned
    /// away by `Router::accept` instead of silently re-delivered.
    delivered: HashSet<MessageId>,
}

/// Minimal insertion-ordered map so FIFO/queueing policies can iterate
/// oldest-first without pulling in an extra dependency for one data
/// structure this crate needs nowhere else.
mod indexmap_like {
    use super::{Message, MessageId};
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    pub struct InsertOrderMap {
        order: Vec<MessageId>,
        entries: HashMap<MessageId, Message>,
    }

    impl InsertOrderMap {
        pub fn new() -> Self {
            Self {
                order: Vec::new(),
                entries: HashMap::new(),
            }
        }

        pub fn insert(&mut self, msg: Message) -> Option<Message> {
            let id = msg.id.clone();
            if let Some(old) = self.entries.insert(id.clone(), msg) {
                Some(old)
            } else {
                self.order.push(id);
                None
            }
        }

        pub fn remove(&mut self, id: &MessageId) -> Option<Message> {
            let removed = self.entries.remove(id)?;
            self.order.retain(|existing| existing != id);
            Some(removed)
        }

        pub fn get(&self, id: &MessageId) -> Option<&Message> {
            self.entries.get(id)
        }

        pub fn get_mut(&mut self, id: &MessageId) -> Option<&mut Message> {
            self.entries.get_mut(id)
        }

        pub fn contains(&self, id: &MessageId) -> bool {
            self.entries.contains_key(id)
        }

        pub fn len(&self) -> usize {
            self.order.len()
        }

        /// Oldest-first iteration order (insertion order).
        pub fn iter(&self) -> impl Iterator<Item = &Message> {
            self.order.iter().filter_map(move |id| self.entries.get(id))
        }
    }
}

impl Buffer {
    pub fn new(capacity_bytes: u64) -> Self {
        Self {
            capacity_bytes,
            used_bytes: 0,
            messages: indexmap_like::InsertOrderMap::new(),
            delivered: HashSet::new(),
        }
    }

    pub fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes
    }

    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    pub fn free_bytes(&self) -> u64 {
        self.capacity_bytes.saturating_sub(self.used_bytes)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.len() == 0
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.messages.contains(id)
    }

    /// Has `id` already been delivered to this host's application layer?
    pub fn is_delivered(&self, id: &MessageId) -> bool {
        self.delivered.contains(id)
    }

    /// Record `id` as delivered, without keeping a copy in `messages`.
    pub fn mark_delivered(&mut self, id: MessageId) {
        self.delivered.insert(id);
    }

    /// `true` if this host is currently holding `id`, or has already
    /// delivered it — the complete "have I seen this message" check every
    /// strategy's duplicate-acceptance/forwarding logic should use instead of
    /// `contains` alone.
    pub fn has_seen(&self, id: &MessageId) -> bool {
        self.contains(id) || self.is_delivered(id)
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.messages.get(id)
    }

    pub fn get_mut(&mut self, id: &MessageId) -> Option<&mut Message> {
        self.messages.get_mut(id)
    }

    /// Oldest-first iteration, used by FIFO-family drop/queueing policies.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Would `size_bytes` fit without evicting anything?
    pub fn has_room_for(&self, size_bytes: u64) -> bool {
        size_bytes <= self.capacity_bytes && self.free_bytes() >= size_bytes
    }

    /// Insert a message, updating byte accounting.
    ///
    /// # Panics
    /// Debug-asserts that the insertion does not exceed `capacity_bytes` —
    /// callers (the connection state machine) must run the drop policy first.
    pub fn insert(&mut self, msg: Message) {
        let size = msg.size_bytes;
        if let Some(old) = self.messages.insert(msg) {
            self.used_bytes -= old.size_bytes;
        }
        self.used_bytes += size;
        debug_assert!(
            self.used_bytes <= self.capacity_bytes,
            "buffer over capacity: {} > {}",
            self.used_bytes,
            self.capacity_bytes
        );
    }

    /// Remove and return a message by id, if present.
    pub fn remove(&mut self, id: &MessageId) -> Option<Message> {
        let removed = self.messages.remove(id)?;
        self.used_bytes -= removed.size_bytes;
        Some(removed)
    }

    /// Drop every message whose TTL has expired as of `now`. Returns the removed ids.
    pub fn expire(&mut self, now: Tick, ticks_per_minute: impl Fn(f64) -> u64 + Copy) -> Vec<MessageId> {
        let expired: Vec<MessageId> = self
            .iter()
            .filter(|m| m.is_expired(now, ticks_per_minute))
            .map(|m| m.id.clone())
            .collect();
        for id in &expired {
            self.remove(id);
        }
        expired
    }
}
