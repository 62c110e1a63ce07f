//! `dtn-sim` — tick loop orchestrator for the DTN simulator.
//!
//! # Six-step tick loop
//!
//! ```text
//! for tick in 0..config.end_tick():
//!   ① Mobility   — step every host along its movement model.
//!   ② Contacts   — rebuild the grid and reconcile UP/DOWN connections,
//!                  or replay the next due connects/disconnects from a trace.
//!   ③ Routing    — call Router::update for every host with at least one
//!                  idle connection, then start accepted transfers.
//!   ④ Transfers  — advance every in-flight transfer; finish and deliver
//!                  the ones that complete this tick.
//!   ⑤ Expiry     — drop messages whose TTL has elapsed from every buffer.
//!   ⑥ Generators — fire any message-event generator due this tick.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the mobility step on Rayon's thread pool.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dtn_core::SimConfig;
//! use dtn_sim::{NoopObserver, WorldBuilder};
//!
//! let mut world = WorldBuilder::new(config, (1000.0, 1000.0), 2.0)
//!     .host("p0", 5_000_000, "wlan", 10.0, 250_000.0, router_a, mobility_a)
//!     .host("p1", 5_000_000, "wlan", 10.0, 250_000.0, router_b, mobility_b)
//!     .build()?;
//! world.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::{build_from_scenario, ScenarioContactMode, WorldBuilder};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use world::{ContactSource, World};
