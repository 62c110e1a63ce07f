//! External-Event Source: replays pre-recorded contact events from a
//! CSV trace instead of deriving connectivity from geometric mobility.
//!
//! # CSV format
//!
//! ```csv
//! host_a,host_b,start_tick,end_tick
//! 0,3,10,40
//! 1,2,12,50
//! ```
//!
//! Rows need not be sorted; [`load_trace_csv`] sorts by `start_tick` so
//! playback can issue connect/disconnect events in chronological order.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use dtn_core::{HostId, Tick};

use crate::EventsError;

/// One recorded contact window between two hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactEvent {
    pub host_a: HostId,
    pub host_b: HostId,
    pub start: Tick,
    pub end: Tick,
}

#[derive(Deserialize)]
struct ContactRecord {
    host_a: u32,
    host_b: u32,
    start_tick: u64,
    end_tick: u64,
}

pub fn load_trace_csv(path: &Path) -> Result<Vec<ContactEvent>, EventsError> {
    let file = std::fs::File::open(path).map_err(EventsError::Io)?;
    load_trace_reader(file)
}

pub fn load_trace_reader<R: Read>(reader: R) -> Result<Vec<ContactEvent>, EventsError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut events = Vec::new();
    for result in csv_reader.deserialize::<ContactRecord>() {
        let row = result.map_err(|e| EventsError::Parse(e.to_string()))?;
        if row.end_tick <= row.start_tick {
            return Err(EventsError::Parse(format!(
                "contact event end_tick ({}) must be after start_tick ({})",
                row.end_tick, row.start_tick
            )));
        }
        events.push(ContactEvent {
            host_a: HostId(row.host_a),
            host_b: HostId(row.host_b),
            start: Tick(row.start_tick),
            end: Tick(row.end_tick),
        });
    }
    events.sort_unstable_by_key(|e| e.start);
    Ok(events)
}

/// Chronological playback cursor over a loaded trace.
///
/// Holds two pointers into the trace (sorted by `start`/`end` respectively)
/// so each tick's due connects and disconnects are found without rescanning
/// the whole trace.
pub struct TracePlayback {
    by_start: Vec<ContactEvent>,
    by_end: Vec<ContactEvent>,
    next_start_idx: usize,
    next_end_idx: usize,
}

impl TracePlayback {
    pub fn new(mut events: Vec<ContactEvent>) -> Self {
        events.sort_unstable_by_key(|e| e.start);
        let mut by_end = events.clone();
        by_end.sort_unstable_by_key(|e| e.end);
        Self {
            by_start: events,
            by_end,
            next_start_idx: 0,
            next_end_idx: 0,
        }
    }

    /// Contact events that should connect as of `now`.
    pub fn due_connects(&mut self, now: Tick) -> &[ContactEvent] {
        let start = self.next_start_idx;
        while self.next_start_idx < self.by_start.len() && self.by_start[self.next_start_idx].start <= now {
            self.next_start_idx += 1;
        }
        &self.by_start[start..self.next_start_idx]
    }

    /// Contact events that should disconnect as of `now`.
    pub fn due_disconnects(&mut self, now: Tick) -> &[ContactEvent] {
        let start = self.next_end_idx;
        while self.next_end_idx < self.by_end.len() && self.by_end[self.next_end_idx].end <= now {
            self.next_end_idx += 1;
        }
        &self.by_end[start..self.next_end_idx]
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_start_idx >= self.by_start.len() && self.next_end_idx >= self.by_end.len()
    }
}
