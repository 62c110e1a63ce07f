//! xsmall — smallest example for the DTN simulator.
//!
//! Ten hosts random-waypointing around a 500x500 m field, flooding messages
//! epidemically for an hour of simulated time. Scale comment: swap in
//! `dtn_sim::build_from_scenario` and a real settings file on disk to run
//! larger, config-driven scenarios.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use dtn_config::ReportSection;
use dtn_core::{HostId, SimConfig};
use dtn_events::MessageEventGenerator;
use dtn_mobility::{MobilityKind, RandomWaypointMobility};
use dtn_output::{CsvWriter, SimOutputObserver};
use dtn_router::{EpidemicRouter, RouterKind};
use dtn_sim::WorldBuilder;

const HOST_COUNT: u32 = 10;
const SEED: u64 = 42;
const WORLD_SIZE_M: (f32, f32) = (500.0, 500.0);
const END_TIME_SECS: f64 = 3_600.0;
const OUTPUT_DIR: &str = "output/xsmall";

fn main() -> Result<()> {
    println!("=== xsmall — DTN epidemic flood over {HOST_COUNT} hosts ===");

    let config = SimConfig {
        update_interval_secs: 1.0,
        end_time_secs: END_TIME_SECS,
        seed: SEED,
        randomize_update_order: false,
    };

    let mut builder = WorldBuilder::new(config, WORLD_SIZE_M, 2.0);
    for i in 0..HOST_COUNT {
        let mobility = MobilityKind::RandomWaypoint(
            RandomWaypointMobility::new(WORLD_SIZE_M.0, WORLD_SIZE_M.1, 1.0, 2.0).with_pause(5.0, 30.0),
        );
        builder = builder.host(
            format!("p{i}"),
            5_000_000,
            "wlan",
            30.0,
            250_000.0,
            RouterKind::Epidemic(EpidemicRouter::new()),
            mobility,
        );
    }

    let mut world = builder
        .generator(MessageEventGenerator::new(
            (30.0, 60.0),
            (100_000, 500_000),
            (HostId(0), HostId(HOST_COUNT - 1)),
            30.0,
            "m",
        ))
        .build()?;

    println!("World: {HOST_COUNT} hosts over {:?} m, {} ticks", WORLD_SIZE_M, world.config.end_tick());

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let report = ReportSection {
        nrof_reports: 20,
        warmup_secs: 0.0,
        report_dir: OUTPUT_DIR.to_string(),
        report_classes: Vec::new(),
    };
    let writer = CsvWriter::new(Path::new(&report.report_dir))?;
    let mut observer = SimOutputObserver::new(writer, &world.clock, &report, world.config.end_tick());

    let t0 = Instant::now();
    world.run(&mut observer);
    let elapsed = t0.elapsed();

    if let Some(e) = observer.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("Reports written to {OUTPUT_DIR}/");

    Ok(())
}
