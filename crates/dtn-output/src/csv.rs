//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `node_trajectory.csv`
//! - `community.csv`
//! - `popularity.csv`
//! - `message_stats.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::{CommunityRow, MessageStatsRow, NodeTrajectoryRow, PopularityRow};
use crate::writer::OutputWriter;
use crate::OutputResult;

/// Writes simulation output to four CSV files.
pub struct CsvWriter {
    trajectory: Writer<File>,
    community: Writer<File>,
    popularity: Writer<File>,
    message_stats: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the four CSV files in `dir` and write their header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trajectory = Writer::from_path(dir.join("node_trajectory.csv"))?;
        trajectory.write_record(["SimTime", "HostID", "X", "Y"])?;

        let mut community = Writer::from_path(dir.join("community.csv"))?;
        community.write_record(["SimTime", "HostID", "CommunitySize"])?;

        let mut popularity = Writer::from_path(dir.join("popularity.csv"))?;
        popularity.write_record(["SimTime", "HostID", "ContactCount"])?;

        let mut message_stats = Writer::from_path(dir.join("message_stats.csv"))?;
        message_stats.write_record([
            "messages_created",
            "messages_delivered",
            "messages_relayed",
            "messages_dropped",
            "delivery_ratio",
            "overhead_ratio",
            "avg_latency_secs",
            "avg_hop_count",
            "avg_buffer_time_secs",
        ])?;

        Ok(Self {
            trajectory,
            community,
            popularity,
            message_stats,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trajectory(&mut self, rows: &[NodeTrajectoryRow]) -> OutputResult<()> {
        for row in rows {
            self.trajectory.write_record(&[
                row.sim_time_secs.to_string(),
                row.host_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_community(&mut self, rows: &[CommunityRow]) -> OutputResult<()> {
        for row in rows {
            self.community.write_record(&[
                row.sim_time_secs_floor.to_string(),
                row.host_id.to_string(),
                row.community_size.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_popularity(&mut self, rows: &[PopularityRow]) -> OutputResult<()> {
        for row in rows {
            self.popularity.write_record(&[
                row.sim_time_secs_floor.to_string(),
                row.host_id.to_string(),
                row.contact_count.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_message_stats(&mut self, row: &MessageStatsRow) -> OutputResult<()> {
        self.message_stats.write_record(&[
            row.messages_created.to_string(),
            row.messages_delivered.to_string(),
            row.messages_relayed.to_string(),
            row.messages_dropped.to_string(),
            row.delivery_ratio.to_string(),
            row.overhead_ratio.to_string(),
            row.avg_latency_secs.to_string(),
            row.avg_hop_count.to_string(),
            row.avg_buffer_time_secs.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trajectory.flush()?;
        self.community.flush()?;
        self.popularity.flush()?;
        self.message_stats.flush()?;
        Ok(())
    }
}
