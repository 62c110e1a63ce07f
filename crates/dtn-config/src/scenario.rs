//! Typed `ScenarioConfig` assembled from raw [`Settings`].

use crate::error::{ConfigError, ConfigResult};
use crate::settings::{parse_byte_size, Settings};

#[derive(Debug, Clone)]
pub struct ScenarioSection {
    pub name: String,
    pub simulate_connections: bool,
    pub update_interval_secs: f64,
    pub end_time_secs: f64,
    pub nrof_host_groups: u64,
}

#[derive(Debug, Clone)]
pub struct MovementModelSection {
    pub rng_seed: u64,
    pub world_size: (f64, f64),
    pub warmup_secs: f64,
}

#[derive(Debug, Clone)]
pub struct InterfaceConfig {
    pub name: String,
    pub kind: String,
    pub transmit_speed_bytes_per_sec: u64,
    pub transmit_range_m: f64,
}

#[derive(Debug, Clone)]
pub struct GroupConfig {
    pub group_id: String,
    pub nrof_hosts: u64,
    pub buffer_size_bytes: u64,
    pub movement_model: String,
    pub router: String,
    pub interfaces: Vec<String>,
    pub msg_ttl_minutes: f64,
    pub speed_mps: (f64, f64),
    pub wait_time_secs: (f64, f64),
}

#[derive(Debug, Clone)]
pub struct EventClassConfig {
    pub class: String,
    pub interval_secs: (f64, f64),
    pub size_bytes: (u64, u64),
    pub hosts: (u64, u64),
    pub prefix: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReportSection {
    pub nrof_reports: u64,
    pub warmup_secs: f64,
    pub report_dir: String,
    pub report_classes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub scenario: ScenarioSection,
    pub movement_model: MovementModelSection,
    pub interfaces: Vec<InterfaceConfig>,
    pub groups: Vec<GroupConfig>,
    pub events: Vec<EventClassConfig>,
    pub report: ReportSection,
}

impl ScenarioConfig {
    pub fn from_settings(settings: &Settings) -> ConfigResult<Self> {
        Ok(Self {
            scenario: parse_scenario(settings)?,
            movement_model: parse_movement_model(settings)?,
            interfaces: parse_interfaces(settings)?,
            groups: parse_groups(settings)?,
            events: parse_events(settings)?,
            report: parse_report(settings)?,
        })
    }
}

fn parse_scenario(s: &Settings) -> ConfigResult<ScenarioSection> {
    Ok(ScenarioSection {
        name: s.require("Scenario.name")?.to_string(),
        simulate_connections: s.get_bool("Scenario.simulateConnections")?.unwrap_or(true),
        update_interval_secs: require_f64(s, "Scenario.updateInterval")?,
        end_time_secs: require_f64(s, "Scenario.endTime")?,
        nrof_host_groups: s.get_u64("Scenario.nrofHostGroups")?.unwrap_or(0),
    })
}

fn parse_movement_model(s: &Settings) -> ConfigResult<MovementModelSection> {
    let size = s.require("MovementModel.worldSize")?;
    let (w, h) = size.split_once(',').ok_or_else(|| ConfigError::Malformed {
        key: "MovementModel.worldSize".into(),
        value: size.to_string(),
        reason: "expected \"width,height\"".into(),
    })?;
    let parse_dim = |v: &str| {
        v.trim().parse::<f64>().map_err(|_| ConfigError::Malformed {
            key: "MovementModel.worldSize".into(),
            value: size.to_string(),
            reason: "width/height must be numeric".into(),
        })
    };
    Ok(MovementModelSection {
        rng_seed: s.get_u64("MovementModel.rngSeed")?.unwrap_or(0),
        world_size: (parse_dim(w)?, parse_dim(h)?),
        warmup_secs: s.get_f64("MovementModel.warmup")?.unwrap_or(0.0),
    })
}

fn parse_interfaces(s: &Settings) -> ConfigResult<Vec<InterfaceConfig>> {
    s.base_names_with_suffix("type")
        .into_iter()
        .map(|name| {
            Ok(InterfaceConfig {
                kind: s.require(&format!("{name}.type"))?.to_string(),
                transmit_speed_bytes_per_sec: s
                    .get_bytes(&format!("{name}.transmitSpeed"))?
                    .ok_or_else(|| ConfigError::MissingKey(format!("{name}.transmitSpeed")))?,
                transmit_range_m: s
                    .get_f64(&format!("{name}.transmitRange"))?
                    .ok_or_else(|| ConfigError::MissingKey(format!("{name}.transmitRange")))?,
                name,
            })
        })
        .collect()
}

fn parse_groups(s: &Settings) -> ConfigResult<Vec<GroupConfig>> {
    let n = s.get_u64("Scenario.nrofHostGroups")?.unwrap_or(0);
    (0..n)
        .map(|i| {
            let prefix = format!("Group{i}");
            let nrof_interfaces = s.get_u64(&format!("{prefix}.nrofInterfaces"))?.unwrap_or(1);
            let interfaces = (1..=nrof_interfaces)
                .map(|k| s.require(&format!("{prefix}.interface{k}")).map(str::to_string))
                .collect::<ConfigResult<Vec<_>>>()?;
            Ok(GroupConfig {
                group_id: s.require(&format!("{prefix}.groupID"))?.to_string(),
                nrof_hosts: s
                    .get_u64(&format!("{prefix}.nrofHosts"))?
                    .ok_or_else(|| ConfigError::MissingKey(format!("{prefix}.nrofHosts")))?,
                buffer_size_bytes: s
                    .get_bytes(&format!("{prefix}.bufferSize"))?
                    .ok_or_else(|| ConfigError::MissingKey(format!("{prefix}.bufferSize")))?,
                movement_model: s.require(&format!("{prefix}.movementModel"))?.to_string(),
                router: s.require(&format!("{prefix}.router"))?.to_string(),
                interfaces,
                msg_ttl_minutes: s
                    .get_f64(&format!("{prefix}.msgTtl"))?
                    .ok_or_else(|| ConfigError::MissingKey(format!("{prefix}.msgTtl")))?,
                speed_mps: require_range(s, &format!("{prefix}.speed"))?,
                wait_time_secs: require_range(s, &format!("{prefix}.waitTime"))?,
            })
        })
        .collect()
}

fn parse_events(s: &Settings) -> ConfigResult<Vec<EventClassConfig>> {
    let n = s.get_u64("Events.nrof")?.unwrap_or(0);
    (0..n)
        .map(|i| {
            let prefix = format!("Events{i}");
            Ok(EventClassConfig {
                class: s.require(&format!("{prefix}.class"))?.to_string(),
                interval_secs: require_range(s, &format!("{prefix}.interval"))?,
                size_bytes: require_byte_range(s, &format!("{prefix}.size"))?,
                hosts: require_u64_range(s, &format!("{prefix}.hosts"))?,
                prefix: s.get_or(&format!("{prefix}.prefix"), ""),
                file_path: s.get(&format!("{prefix}.filePath")).map(str::to_string),
            })
        })
        .collect()
}

fn parse_report(s: &Settings) -> ConfigResult<ReportSection> {
    let n = s.get_u64("Report.nrofReports")?.unwrap_or(0);
    let report_classes = (0..n)
        .map(|i| s.require(&format!("Report.report{i}")).map(str::to_string))
        .collect::<ConfigResult<Vec<_>>>()?;
    Ok(ReportSection {
        nrof_reports: n,
        warmup_secs: s.get_f64("Report.warmup")?.unwrap_or(0.0),
        report_dir: s.get_or("Report.reportDir", "."),
        report_classes,
    })
}

// ── Small parsing helpers ─────────────────────────────────────────────────────

fn require_f64(s: &Settings, key: &str) -> ConfigResult<f64> {
    s.get_f64(key)?.ok_or_else(|| ConfigError::MissingKey(key.to_string()))
}

fn split_pair<'a>(s: &'a Settings, key: &str) -> ConfigResult<(&'a str, &'a str)> {
    let raw = s.require(key)?;
    raw.split_once(',').ok_or_else(|| ConfigError::Malformed {
        key: key.to_string(),
        value: raw.to_string(),
        reason: "expected \"lo,hi\"".into(),
    })
}

fn require_range(s: &Settings, key: &str) -> ConfigResult<(f64, f64)> {
    let (lo, hi) = split_pair(s, key)?;
    let parse = |v: &str| {
        v.trim().parse::<f64>().map_err(|_| ConfigError::Malformed {
            key: key.to_string(),
            value: v.to_string(),
            reason: "expected a number".into(),
        })
    };
    Ok((parse(lo)?, parse(hi)?))
}

fn require_u64_range(s: &Settings, key: &str) -> ConfigResult<(u64, u64)> {
    let (lo, hi) = split_pair(s, key)?;
    let parse = |v: &str| {
        v.trim().parse::<u64>().map_err(|_| ConfigError::Malformed {
            key: key.to_string(),
            value: v.to_string(),
            reason: "expected an integer".into(),
        })
    };
    Ok((parse(lo)?, parse(hi)?))
}

fn require_byte_range(s: &Settings, key: &str) -> ConfigResult<(u64, u64)> {
    let (lo, hi) = split_pair(s, key)?;
    let parse = |v: &str| {
        parse_byte_size(v.trim()).map_err(|reason| ConfigError::Malformed {
            key: key.to_string(),
            value: v.to_string(),
            reason,
        })
    };
    Ok((parse(lo)?, parse(hi)?))
}
