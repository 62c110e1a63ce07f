//! `dtn-net` — topology and message primitives for the `dtn-sim` simulator.
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|--------------------------------------------------------|
//! | [`message`]   | `Message`, `MessageId`, `PropertyValue`, `Buffer`      |
//! | [`host`]      | `Host`, `Interface`, `HostStore`, `HostRngs`           |
//! | [`connection`]| `Connection`, `ConnectionState`, `Transfer`, `ConnectionStore` |
//! | [`builder`]   | `HostStoreBuilder` (fluent construction)               |
//!
//! This crate has no dependency on `dtn-router` — routers inspect hosts and
//! buffers through `dtn-router`'s `PeerView`, built from the types here.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to public types.        |

pub mod builder;
pub mod connection;
pub mod host;
pub mod message;

#[cfg(test)]
mod tests;

pub use builder::HostStoreBuilder;
pub use connection::{Connection, ConnectionState, ConnectionStore, Transfer};
pub use host::{Host, HostRngs, HostStore, Interface};
pub use message::{Buffer, Message, MessageId, PropertyValue};
