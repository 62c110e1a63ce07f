//! `dtn-events` — scheduled message injection and external contact traces.
//!
//! # Crate layout
//!
//! | Module             | Contents                                         |
//! |---------------------|--------------------------------------------------|
//! | [`generator`]       | `MessageEventGenerator`                   |
//! | [`external_events`]  | `ContactEvent`, CSV loader, `TracePlayback` |
//! | [`wake_queue`]       | `WakeQueue<T>` (`BTreeMap<Tick, Vec<T>>`)         |
//! | [`error`]            | `EventsError`, `EventsResult<T>`                  |
//!
//! # Design notes
//!
//! Both sources are driven by `dtn-sim`'s tick loop rather than by polling:
//! a `MessageEventGenerator` schedules its own next firing tick into a
//! `WakeQueue<usize>` (indexed by generator id), and a `TracePlayback` is
//! advanced with the current tick to pull out exactly the events due.

pub mod error;
pub mod external_events;
pub mod generator;
pub mod wake_queue;

#[cfg(test)]
mod tests;

pub use error::{EventsError, EventsResult};
pub use external_events::{load_trace_csv, load_trace_reader, ContactEvent, TracePlayback};
pub use generator::MessageEventGenerator;
pub use wake_queue::WakeQueue;
