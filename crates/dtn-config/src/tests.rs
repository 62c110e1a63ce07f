//! Unit tests for dtn-config.

use crate::scenario::ScenarioConfig;
use crate::settings::Settings;

const MINIMAL: &str = "
# a comment, and a blank line above
Scenario.name = test-run
Scenario.updateInterval = 1.0
Scenario.endTime = 43200
Scenario.nrofHostGroups = 1

MovementModel.rngSeed = 7
MovementModel.worldSize = 1000,1000
MovementModel.warmup = 0

btInterface.type = SimpleBroadcastInterface
btInterface.transmitSpeed = 250k
btInterface.transmitRange = 10

Group0.groupID = n
Group0.nrofHosts = 40
Group0.bufferSize = 5M
Group0.movementModel = RandomWaypoint
Group0.router = Epidemic
Group0.nrofInterfaces = 1
Group0.interface1 = btInterface
Group0.msgTtl = 300
Group0.speed = 0.5,1.5
Group0.waitTime = 0,120

Events.nrof = 1
Events0.class = MessageEventGenerator
Events0.interval = 25,35
Events0.size = 500k,1M
Events0.hosts = 0,39
Events0.prefix = M

Report.nrofReports = 1
Report.warmup = 0
Report.reportDir = reports
Report.report0 = MessageStatsReport
";

mod settings_tests {
    use super::*;

    #[test]
    fn parses_key_value_pairs_and_skips_comments() {
        let s = Settings::parse(MINIMAL).unwrap();
        assert_eq!(s.get("Scenario.name"), Some("test-run"));
    }

    #[test]
    fn byte_size_suffixes_are_applied() {
        let s = Settings::parse("x = 250k\ny = 5M\nz = 10").unwrap();
        assert_eq!(s.get_bytes("x").unwrap(), Some(250_000));
        assert_eq!(s.get_bytes("y").unwrap(), Some(5_000_000));
        assert_eq!(s.get_bytes("z").unwrap(), Some(10));
    }

    #[test]
    fn missing_key_is_none_not_an_error() {
        let s = Settings::parse(MINIMAL).unwrap();
        assert_eq!(s.get("Nonexistent.key"), None);
    }

    #[test]
    fn malformed_line_without_equals_is_rejected() {
        assert!(Settings::parse("this is not a key=value line\nreally not").is_err());
    }

    #[test]
    fn interface_discovery_finds_all_declared_interfaces() {
        let s = Settings::parse(MINIMAL).unwrap();
        assert_eq!(s.base_names_with_suffix("type"), vec!["btInterface".to_string()]);
    }
}

mod scenario_tests {
    use super::*;

    #[test]
    fn builds_a_full_scenario_from_minimal_settings() {
        let settings = Settings::parse(MINIMAL).unwrap();
        let scenario = ScenarioConfig::from_settings(&settings).unwrap();

        assert_eq!(scenario.scenario.name, "test-run");
        assert_eq!(scenario.movement_model.world_size, (1000.0, 1000.0));
        assert_eq!(scenario.interfaces.len(), 1);
        assert_eq!(scenario.interfaces[0].transmit_speed_bytes_per_sec, 250_000);

        assert_eq!(scenario.groups.len(), 1);
        let group = &scenario.groups[0];
        assert_eq!(group.nrof_hosts, 40);
        assert_eq!(group.buffer_size_bytes, 5_000_000);
        assert_eq!(group.interfaces, vec!["btInterface".to_string()]);

        assert_eq!(scenario.events.len(), 1);
        assert_eq!(scenario.events[0].size_bytes, (500_000, 1_000_000));

        assert_eq!(scenario.report.report_classes, vec!["MessageStatsReport".to_string()]);
    }

    #[test]
    fn missing_required_key_names_the_offending_key() {
        let settings = Settings::parse("Scenario.name = broken\n").unwrap();
        let err = ScenarioConfig::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("Scenario.updateInterval"));
    }
}
