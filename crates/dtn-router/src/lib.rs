//! `dtn-router` — the pluggable per-host routing strategy layer.
//!
//! # Crate layout
//!
//! | Module              | Contents                                                      |
//! |---------------------|----------------------------------------------------------------|
//! | [`router`]          | `Router` trait, `TransferRequest`                              |
//! | [`peer_view`]       | `PeerView`/`PeerHandle` — read-only cross-host query surface    |
//! | [`history`]         | `ConnectionHistory` contact-window bookkeeping                  |
//! | [`base`]            | Shared drop/delivery/flood helpers reused by multiple strategies|
//! | [`epidemic`]        | `EpidemicRouter`                                                |
//! | [`spray_and_wait`]  | `SprayAndWaitRouter` (binary/standard)                          |
//! | [`prophet`]         | `ProphetRouter` (GRTR/GRTR_SORT/GRTR_MAX/COIN × FIFO/MOFO/MOPR/SHLI/LEPR/Random) |
//! | [`bubble_rap`]      | `BubbleRapRouter` (K-clique/Simple community, S-/C-window centrality) |
//! | [`peoplerank`]      | `PeopleRankRouter`, `SocialGraph`                               |
//! | [`simbet`]          | `SimBetRouter`                                                  |
//! | [`spray_and_focus`] | `SprayAndFocusRouter`                                           |
//! | [`kind`]            | `RouterKind` — closed enum dispatching to all of the above      |
//! | [`error`]           | `RouterError`, `RouterResult<T>`                                |
//!
//! # Design notes
//!
//! Every strategy implements the single [`Router`] trait. Cross-host reads
//! (PRoPHET comparing predictabilities, Bubble Rap comparing centralities,
//! PeopleRank comparing ranks, SimBet comparing utilities) go through the
//! trait's query methods via [`PeerView`], never through downcasting to a
//! concrete type — so a simulation can mix strategies across hosts and any
//! strategy can read any other's advertised state.
//!
//! `dtn-sim` stores one [`kind::RouterKind`] per host rather than
//! `Box<dyn Router>`, trading a `match` per call for no heap allocation and
//! no vtable indirection per host per tick.

pub mod base;
pub mod bubble_rap;
pub mod epidemic;
pub mod error;
pub mod history;
pub mod kind;
pub mod peer_view;
pub mod peoplerank;
pub mod prophet;
pub mod router;
pub mod simbet;
pub mod spray_and_focus;
pub mod spray_and_wait;

#[cfg(test)]
mod tests;

pub use bubble_rap::{BubbleRapRouter, CentralityMetric, CommunityDetection};
pub use epidemic::EpidemicRouter;
pub use error::{RouterError, RouterResult};
pub use history::{ConnectionHistory, ContactWindow};
pub use kind::RouterKind;
pub use peer_view::{PeerHandle, PeerView};
pub use peoplerank::{PeopleRankRouter, SocialGraph};
pub use prophet::{ForwardingPolicy, ProphetRouter, QueueingPolicy};
pub use router::{Router, TransferRequest};
pub use simbet::SimBetRouter;
pub use spray_and_focus::SprayAndFocusRouter;
pub use spray_and_wait::{SprayAndWaitRouter, SprayMode};
