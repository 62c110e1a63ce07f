//! `dtn-core` — foundational types for the `dtn-sim` opportunistic-networking
//! simulator.
//!
//! This crate is a dependency of every other `dtn-*` crate. It intentionally
//! has no `dtn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `HostId`, `InterfaceId`, `ConnectionId`               |
//! | [`geo`]    | `Position`, Euclidean distance                        |
//! | [`time`]   | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]    | `HostRng` (per-host), `SimRng` (global)               |
//! | [`result`] | `TransferResult` result-code enum                     |
//! | [`error`]  | `DtnError`, `DtnResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `dtn-config` and `dtn-output`.                 |

pub mod error;
pub mod geo;
pub mod ids;
pub mod result;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DtnError, DtnResult};
pub use geo::Position;
pub use ids::{ConnectionId, HostId, InterfaceId};
pub use result::TransferResult;
pub use rng::{HostRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
