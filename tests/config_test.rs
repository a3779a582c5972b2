use clap::Parser;
use mechswitch::config::{ConditionParams, RoundConfig, TimingParams};
use mechswitch::error::MechSwitchError;

// Parses RoundConfig the way the CLI subcommands flatten it
#[derive(Parser, Debug)]
struct Harness {
    #[command(flatten)]
    config: RoundConfig,
}

#[test]
fn test_cli_defaults_match_default_impl() {
    let parsed = Harness::parse_from(["harness"]);
    assert_eq!(parsed.config, RoundConfig::default());
}

#[test]
fn test_default_timing_values() {
    let t = TimingParams::default();
    assert_eq!(t.tap_threshold, 0.5);
    assert_eq!(t.min_hold, 5.0);
    assert_eq!(t.faulty_release_window, 2.5);
    assert_eq!(t.hold_effect_delay, 0.5);
    assert_eq!(t.faulty_blink_interval, 0.15);
    assert_eq!(t.lockout_duration, 60.0);
    assert!(t.validate().is_ok());
}

#[test]
fn test_flags_override_defaults() {
    let parsed = Harness::parse_from([
        "harness",
        "--min-hold",
        "3.0",
        "--lockout-duration",
        "10",
        "--no-conditions",
    ]);
    assert_eq!(parsed.config.timing.min_hold, 3.0);
    assert_eq!(parsed.config.timing.lockout_duration, 10.0);
    assert!(parsed.config.conditions.no_conditions);
    assert_eq!(parsed.config.conditions.condition_roll_range, 30);
}

#[test]
fn test_default_condition_params() {
    let c = ConditionParams::default();
    assert_eq!(c.condition_roll_range, 30);
    assert!(!c.no_conditions);
}

#[test]
fn test_rejects_non_positive_durations() {
    let mut config = RoundConfig::default();
    config.timing.faulty_blink_interval = 0.0;
    match config.validate() {
        Err(MechSwitchError::Config(msg)) => assert!(msg.contains("faulty_blink_interval")),
        other => panic!("expected config error, got {:?}", other),
    }

    let mut config = RoundConfig::default();
    config.timing.lockout_duration = f32::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_tap_threshold_above_min_hold() {
    let mut config = RoundConfig::default();
    config.timing.tap_threshold = 6.0;
    match config.validate() {
        Err(MechSwitchError::Config(msg)) => assert!(msg.contains("tap_threshold")),
        other => panic!("expected config error, got {:?}", other),
    }
}
