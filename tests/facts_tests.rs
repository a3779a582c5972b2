use mechswitch::error::MechSwitchError;
use mechswitch::facts::{BombFacts, FactsProvider, Port, TimerReading, Weekday};
use rstest::rstest;
use std::fs::File;
use std::io::Write;

const SAMPLE: &str = r#"{
    "serial_number": "qx7r40",
    "indicators": [
        { "label": "FRK", "lit": true },
        { "label": "BOB" }
    ],
    "batteries": 3,
    "port_plates": [["DVI", "Parallel"], [], ["RJ45", "Serial"]],
    "modules": ["Mechanical Switches", "Simon Says", "Simon Says"],
    "solvable_modules": ["Mechanical Switches", "Simon Says"],
    "day_of_week": "Sunday"
}"#;

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bomb.json");
    let mut f = File::create(&path).unwrap();
    f.write_all(SAMPLE.as_bytes()).unwrap();

    let facts = BombFacts::load_from_file(&path).unwrap();
    assert_eq!(facts.serial_number(), "QX7R40");
    assert_eq!(facts.lit_indicator_count(), 1);
    assert_eq!(facts.indicators().len(), 2);
    assert_eq!(facts.battery_count(), 3);
    assert_eq!(facts.port_count(), 4);
    assert_eq!(facts.port_count_of(Port::Dvi), 1);
    assert!(facts.has_empty_port_plate());
    assert_eq!(facts.module_names().len(), 3);
    assert_eq!(facts.solvable_count_containing("Simon"), 1);
    assert_eq!(facts.day_of_week(), Weekday::Sunday);
}

#[test]
fn test_omitted_fields_default() {
    let facts = BombFacts::from_json(r#"{ "serial_number": "AB1C2D" }"#).unwrap();
    assert!(facts.indicators.is_empty());
    assert_eq!(facts.batteries, 0);
    assert!(facts.modules.is_empty());
    assert_eq!(facts.day_of_week, Weekday::Monday);
    // Solvable list falls back to the module list.
    assert!(facts.solvable_module_names().is_empty());
}

#[test]
fn test_serial_letters_and_digits() {
    let facts = BombFacts::new("QX7R40");
    assert_eq!(facts.serial_letters(), vec!['Q', 'X', 'R']);
    assert_eq!(facts.serial_digits(), vec![7, 4, 0]);
}

#[rstest]
#[case(r#"{ "serial_number": "AB1C2" }"#)]
#[case(r#"{ "serial_number": "AB1C2DE" }"#)]
#[case(r#"{ "serial_number": "AB-C2D" }"#)]
fn test_invalid_serial_rejected(#[case] json: &str) {
    match BombFacts::from_json(json) {
        Err(MechSwitchError::Validation(msg)) => assert!(msg.contains("Serial number")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_error_messages_name_the_source() {
    let err = BombFacts::from_json(r#"{ "serial_number": "AB1C2" }"#).unwrap_err();
    assert!(err.to_string().starts_with("Bomb facts rejected: Serial number"), "{}", err);

    let err = BombFacts::from_json("{ not json").unwrap_err();
    assert!(err.to_string().starts_with("Bad bomb facts or report JSON:"), "{}", err);
}

#[test]
fn test_malformed_json_is_json_error() {
    let result = BombFacts::from_json("{ not json");
    assert!(matches!(result, Err(MechSwitchError::Json(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = BombFacts::load_from_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(MechSwitchError::Io(_))));
}

#[rstest]
#[case(0.0, 0, 0)]
#[case(9.99, 9, 9)]
#[case(125.0, 5, 5)]
#[case(359.0, 9, 59)]
#[case(-3.0, 0, 0)]
fn test_timer_reading(#[case] elapsed: f32, #[case] last: u8, #[case] seconds: u8) {
    let t = TimerReading::from_seconds(elapsed);
    assert_eq!(t.last_digit, last);
    assert_eq!(t.seconds, seconds);
}
