//! `dtn-config` — key=value, dotted-namespace scenario configuration.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|---------------------------------------------------------|
//! | [`settings`] | `Settings` — raw key/value store with typed lookups     |
//! | [`scenario`] | `ScenarioConfig` and its section types, built from `Settings` |
//! | [`error`]    | `ConfigError`, `ConfigResult<T>`                         |
//!
//! # Scope
//!
//! This crate does **not** implement the `[a; b; c;]` run-sweep expansion
//! syntax or `%%Name.path%%` substitution — a settings file using either
//! loads as literal text and fails the first typed lookup that needs a
//! single value. See `DESIGN.md` for the rationale.

pub mod error;
pub mod scenario;
pub mod settings;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, ConfigResult};
pub use scenario::{
    EventClassConfig, GroupConfig, InterfaceConfig, MovementModelSection, ReportSection,
    ScenarioConfig, ScenarioSection,
};
pub use settings::Settings;
