//! `dtn-output` — simulation report writers.
//!
//! A CSV backend implements four reports behind [`OutputWriter`]:
//!
//! | File                  | Contents                                              |
//! |-----------------------|--------------------------------------------------------|
//! | `node_trajectory.csv` | `SimTime,HostID,X,Y` position samples                   |
//! | `community.csv`       | per-host detected-community size samples                |
//! | `popularity.csv`      | per-host contact-derived popularity samples             |
//! | `message_stats.csv`   | one aggregate row: delivery ratio, overhead, latency, … |
//!
//! [`SimOutputObserver`] bridges `dtn_sim::SimObserver`'s tick-boundary hooks
//! to these report writers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dtn_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &world.clock, &cfg.report, world.config.end_tick());
//! world.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CommunityRow, MessageStatsRow, NodeTrajectoryRow, PopularityRow};
pub use writer::OutputWriter;
