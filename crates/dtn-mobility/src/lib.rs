//! `dtn-mobility` — the `MobilityModel` contract and reference implementations.
//!
//! # Crate layout
//!
//! | Module               | Contents                                            |
//! |-----------------------|-----------------------------------------------------|
//! | [`model`]             | `MobilityModel` trait, `Waypoint`                    |
//! | [`state`]             | `MovementState` — per-host waypoint + pause tracking |
//! | [`engine`]            | `MobilityEngine` — advances hosts tick by tick       |
//! | [`stationary`]        | `StationaryMobility`                                 |
//! | [`random_waypoint`]   | `RandomWaypointMobility`                             |
//! | [`kind`]              | `MobilityKind` — closed enum dispatching to the above|
//!
//! `MobilityEngine` is model-agnostic: it only owns per-host `MovementState`.
//! The model for a given call is passed in by reference, so one engine
//! instance serves every host even when different host groups run different
//! models (via `MobilityKind`).

pub mod engine;
pub mod kind;
pub mod model;
pub mod random_waypoint;
pub mod stationary;
pub mod state;

#[cfg(test)]
mod tests;

pub use engine::MobilityEngine;
pub use kind::MobilityKind;
pub use model::{MobilityModel, Waypoint};
pub use random_waypoint::RandomWaypointMobility;
pub use stationary::StationaryMobility;
pub use state::MovementState;
