//! Two ways to assemble a [`World`]: a low-level fluent [`WorldBuilder`] for
//! tests and small hand-built scenarios, and [`build_from_scenario`] for
//! scenarios parsed by `dtn-config`.

use rustc_hash::FxHashMap;

use dtn_core::{HostId, Position, SimConfig, SimRng, Tick};
use dtn_config::{GroupConfig, ScenarioConfig};
use dtn_events::{ContactEvent, MessageEventGenerator, TracePlayback, WakeQueue};
use dtn_grid::{recommended_cell_size, UniformGrid};
use dtn_mobility::{MobilityEngine, MobilityKind, RandomWaypointMobility, StationaryMobility};
use dtn_net::{ConnectionStore, HostRngs, HostStore};
use dtn_router::{
    peoplerank, BubbleRapRouter, CentralityMetric, CommunityDetection, EpidemicRouter, ForwardingPolicy,
    PeopleRankRouter, ProphetRouter, QueueingPolicy, RouterKind, SimBetRouter, SocialGraph, SprayAndFocusRouter,
    SprayAndWaitRouter, SprayMode,
};

use crate::world::{ContactSource, World};
use crate::{SimError, SimResult};

// Fixed defaults for router/grid parameters that `dtn-config`'s parsing
// surface has no key for (see DESIGN.md).
const DEFAULT_CELL_SIZE_MULT: f32 = 2.0;
const DEFAULT_EVENT_TTL_MINUTES: f64 = 300.0;
const DEFAULT_SPRAY_COPIES: u32 = 6;
const DEFAULT_KCLIQUE_K: u32 = 3;

// ── Low-level fluent builder ────────────────────────────────────────────────

struct HostDef {
    name: String,
    buffer_capacity_bytes: u64,
    interface_name: String,
    transmit_range_m: f32,
    transmit_speed_bps: f64,
    router: RouterKind,
    mobility: MobilityKind,
}

/// Fluent builder for a [`World`] with one interface per host.
///
/// # Example
///
/// ```rust,ignore
/// let world = WorldBuilder::new(config, (1000.0, 1000.0), 2.0)
///     .host("p0", 5_000_000, "wlan", 10.0, 250_000.0, RouterKind::Epidemic(EpidemicRouter::new()), mobility_a)
///     .host("p1", 5_000_000, "wlan", 10.0, 250_000.0, RouterKind::Epidemic(EpidemicRouter::new()), mobility_b)
///     .build()?;
/// ```
pub struct WorldBuilder {
    config: SimConfig,
    world_size: (f32, f32),
    cell_size_mult: f32,
    host_defs: Vec<HostDef>,
    generators: Vec<MessageEventGenerator>,
    trace: Option<Vec<ContactEvent>>,
}

impl WorldBuilder {
    pub fn new(config: SimConfig, world_size: (f32, f32), cell_size_mult: f32) -> Self {
        Self {
            config,
            world_size,
            cell_size_mult,
            host_defs: Vec::new(),
            generators: Vec::new(),
            trace: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn host(
        mut self,
        name: impl Into<String>,
        buffer_capacity_bytes: u64,
        interface_name: impl Into<String>,
        transmit_range_m: f32,
        transmit_speed_bps: f64,
        router: RouterKind,
        mobility: MobilityKind,
    ) -> Self {
        self.host_defs.push(HostDef {
            name: name.into(),
            buffer_capacity_bytes,
            interface_name: interface_name.into(),
            transmit_range_m,
            transmit_speed_bps,
            router,
            mobility,
        });
        self
    }

    pub fn generator(mut self, event_gen: MessageEventGenerator) -> Self {
        self.generators.push(event_gen);
        self
    }

    /// Replay connectivity from a pre-recorded trace instead of deriving it
    /// from mobility. When set, every pushed `.host(..)`'s `mobility` field
    /// is still used to place its starting position but is never stepped.
    pub fn trace(mut self, events: Vec<ContactEvent>) -> Self {
        self.trace = Some(events);
        self
    }

    pub fn build(self) -> SimResult<World> {
        let host_count = self.host_defs.len();
        let mut hosts = HostStore::new();
        let mut host_rngs = HostRngs::new(host_count, self.config.seed);
        let mut routers = Vec::with_capacity(host_count);
        let mut models = Vec::with_capacity(host_count);
        let mut mobility_engine = MobilityEngine::new(host_count);
        let mut max_range = f32::MIN_POSITIVE;

        for def in self.host_defs {
            let host_id = hosts.push_host(def.name, Position::ORIGIN, def.buffer_capacity_bytes);
            hosts.push_interface(host_id, def.interface_name, def.transmit_range_m, def.transmit_speed_bps);
            max_range = max_range.max(def.transmit_range_m);

            let rng = host_rngs.get_mut(host_id);
            let position = mobility_engine.init_position(host_id, &def.mobility, rng);
            hosts.host_mut(host_id).position = position;

            models.push(def.mobility);
            routers.push(def.router);
        }

        let clock = self.config.make_clock();
        let mut sim_rng = SimRng::new(self.config.seed);
        let mut generator_wake = WakeQueue::new();
        for (gi, event_gen) in self.generators.iter().enumerate() {
            let delay = event_gen.next_interval_secs(&mut sim_rng);
            generator_wake.push(Tick::ZERO.offset(clock.ticks_for_secs(delay)), gi);
        }

        let cell_size = recommended_cell_size(max_range, self.cell_size_mult);
        let contacts = match self.trace {
            Some(events) => ContactSource::External { trace: TracePlayback::new(events) },
            None => ContactSource::Geometric {
                mobility: mobility_engine,
                models,
                grid: UniformGrid::new(cell_size),
                world_size: self.world_size,
            },
        };

        Ok(World {
            config: self.config,
            clock,
            hosts,
            host_rngs,
            connections: ConnectionStore::new(),
            routers,
            contacts,
            generators: self.generators,
            generator_wake,
            sim_rng,
        })
    }
}

// ── High-level scenario builder ─────────────────────────────────────────────

/// Where a scenario-built [`World`] gets its connectivity from.
pub enum ScenarioContactMode {
    Geometric,
    External(Vec<ContactEvent>),
}

/// Assemble a [`World`] from a parsed [`ScenarioConfig`].
///
/// Router and movement-model strategy names are matched case-insensitively
/// after stripping a conventional trailing `"Router"`/`"Movement"` suffix, so
/// both bare names (`"Epidemic"`) and class-name-style strings
/// (`"EpidemicRouter"`) resolve. Per-strategy sub-parameters (spray copy
/// counts, PRoPHET's forwarding/queueing policy, …) have no corresponding
/// scenario keys and use fixed defaults — see DESIGN.md.
pub fn build_from_scenario(cfg: &ScenarioConfig, mode: ScenarioContactMode) -> SimResult<World> {
    let sim_config = SimConfig {
        update_interval_secs: cfg.scenario.update_interval_secs,
        end_time_secs: cfg.scenario.end_time_secs,
        seed: cfg.movement_model.rng_seed,
        randomize_update_order: false,
    };
    let clock = sim_config.make_clock();
    let world_size = (cfg.movement_model.world_size.0 as f32, cfg.movement_model.world_size.1 as f32);

    let mut hosts = HostStore::new();
    let mut host_groups: Vec<usize> = Vec::new();

    for (gi, group) in cfg.groups.iter().enumerate() {
        for local_idx in 0..group.nrof_hosts {
            let name = format!("{}{}", group.group_id, local_idx);
            let host_id = hosts.push_host(name, Position::ORIGIN, group.buffer_size_bytes);
            debug_assert_eq!(host_id.index(), host_groups.len());
            host_groups.push(gi);

            for iface_name in &group.interfaces {
                let iface_cfg = cfg
                    .interfaces
                    .iter()
                    .find(|i| &i.name == iface_name)
                    .ok_or_else(|| SimError::UnknownInterface(iface_name.clone()))?;
                hosts.push_interface(
                    host_id,
                    iface_cfg.name.clone(),
                    iface_cfg.transmit_range_m as f32,
                    iface_cfg.transmit_speed_bytes_per_sec as f64,
                );
            }
        }
    }

    let host_count = hosts.host_count();
    let mut host_rngs = HostRngs::new(host_count, sim_config.seed);

    let group_of: FxHashMap<HostId, String> = (0..host_count)
        .map(|i| (HostId(i as u32), cfg.groups[host_groups[i]].group_id.clone()))
        .collect();
    let social_graph = SocialGraph::new(group_of);

    let mut routers = Vec::with_capacity(host_count);
    let mut models = Vec::with_capacity(host_count);
    let mut mobility_engine = MobilityEngine::new(host_count);

    for i in 0..host_count {
        let host_id = HostId(i as u32);
        let group = &cfg.groups[host_groups[i]];

        let model = build_mobility(group, world_size)?;
        let position = {
            let rng = host_rngs.get_mut(host_id);
            mobility_engine.init_position(host_id, &model, rng)
        };
        hosts.host_mut(host_id).position = position;
        models.push(model);

        routers.push(build_router(group, host_id, &social_graph, sim_config.update_interval_secs, sim_config.seed)?);
    }

    let max_range = cfg
        .interfaces
        .iter()
        .map(|i| i.transmit_range_m as f32)
        .fold(f32::MIN_POSITIVE, f32::max);
    let cell_size = recommended_cell_size(max_range, DEFAULT_CELL_SIZE_MULT);

    let contacts = match mode {
        ScenarioContactMode::Geometric => ContactSource::Geometric {
            mobility: mobility_engine,
            models,
            grid: UniformGrid::new(cell_size),
            world_size,
        },
        ScenarioContactMode::External(events) => ContactSource::External { trace: TracePlayback::new(events) },
    };

    let mut sim_rng = SimRng::new(sim_config.seed);
    let mut generator_wake = WakeQueue::new();
    let generators: Vec<MessageEventGenerator> = cfg
        .events
        .iter()
        .map(|class| {
            MessageEventGenerator::new(
                class.interval_secs,
                class.size_bytes,
                (HostId(class.hosts.0 as u32), HostId(class.hosts.1 as u32)),
                DEFAULT_EVENT_TTL_MINUTES,
                class.prefix.clone(),
            )
        })
        .collect();
    for (gi, event_gen) in generators.iter().enumerate() {
        let delay = event_gen.next_interval_secs(&mut sim_rng);
        generator_wake.push(Tick::ZERO.offset(clock.ticks_for_secs(delay)), gi);
    }

    Ok(World {
        config: sim_config,
        clock,
        hosts,
        host_rngs,
        connections: ConnectionStore::new(),
        routers,
        contacts,
        generators,
        generator_wake,
        sim_rng,
    })
}

fn normalize(raw: &str, suffix: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    lower.strip_suffix(&suffix.to_ascii_lowercase()).unwrap_or(&lower).to_string()
}

fn build_mobility(group: &GroupConfig, world_size: (f32, f32)) -> SimResult<MobilityKind> {
    match normalize(&group.movement_model, "movement").as_str() {
        "randomwaypoint" | "randomwalk" => Ok(MobilityKind::RandomWaypoint(
            RandomWaypointMobility::new(world_size.0, world_size.1, group.speed_mps.0, group.speed_mps.1)
                .with_pause(group.wait_time_secs.0, group.wait_time_secs.1),
        )),
        "stationary" | "nomovement" => Ok(MobilityKind::Stationary(StationaryMobility::new(Position::ORIGIN))),
        other => Err(SimError::UnknownMovementModel(other.to_string())),
    }
}

fn build_router(
    group: &GroupConfig,
    host_id: HostId,
    social_graph: &SocialGraph,
    update_interval_secs: f64,
    seed: u64,
) -> SimResult<RouterKind> {
    match normalize(&group.router, "router").as_str() {
        "epidemic" => Ok(RouterKind::Epidemic(EpidemicRouter::new())),
        "sprayandwait" => Ok(RouterKind::SprayAndWait(SprayAndWaitRouter::new(SprayMode::Binary, DEFAULT_SPRAY_COPIES))),
        "prophet" | "prophetv2" => Ok(RouterKind::Prophet(ProphetRouter::new(
            ForwardingPolicy::Grtr,
            QueueingPolicy::Fifo,
            update_interval_secs,
            seed,
            host_id,
        ))),
        "bubblerap" => Ok(RouterKind::BubbleRap(BubbleRapRouter::new(
            CommunityDetection::KClique { k: DEFAULT_KCLIQUE_K },
            CentralityMetric::CWindow,
        ))),
        "peoplerank" => Ok(RouterKind::PeopleRank(PeopleRankRouter::new(host_id, social_graph, peoplerank::DEFAULT_DAMPING))),
        "simbet" => Ok(RouterKind::SimBet(SimBetRouter::new())),
        "sprayandfocus" => Ok(RouterKind::SprayAndFocus(SprayAndFocusRouter::new(DEFAULT_SPRAY_COPIES))),
        other => Err(SimError::UnknownRouter(other.to_string())),
    }
}
