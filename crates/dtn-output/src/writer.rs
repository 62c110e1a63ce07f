//! The `OutputWriter` trait implemented by all backend writers.

use crate::row::{CommunityRow, MessageStatsRow, NodeTrajectoryRow, PopularityRow};
use crate::OutputResult;

/// Trait implemented by every report backend.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of node-position samples.
    fn write_trajectory(&mut self, rows: &[NodeTrajectoryRow]) -> OutputResult<()>;

    /// Write a batch of per-host community-size samples.
    fn write_community(&mut self, rows: &[CommunityRow]) -> OutputResult<()>;

    /// Write a batch of per-host popularity samples.
    fn write_popularity(&mut self, rows: &[PopularityRow]) -> OutputResult<()>;

    /// Write the one-shot aggregate message-stats row.
    fn write_message_stats(&mut self, row: &MessageStatsRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
