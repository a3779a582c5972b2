use mechswitch::config::RoundConfig;
use mechswitch::facts::BombFacts;
use mechswitch::presentation::NullSink;
use mechswitch::round::{ModuleId, ModuleState};
use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::process::{Command, Output};

fn mechswitch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mechswitch"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_solve_text() {
    let output = mechswitch(&[
        "solve",
        "--serial",
        "AB1C2D",
        "--draws",
        "0,5,9,13,21",
        "--seed",
        "1",
    ]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Hold order: L → B → X → C → R"), "{}", text);
    assert!(text.contains("All switches are Cherry"), "{}", text);
}

#[test]
fn test_cli_solve_json() {
    let output = mechswitch(&[
        "solve",
        "-S",
        "e5z9k0",
        "-d",
        "5,6,0,1,2",
        "--json",
        "--trace",
    ]);
    assert!(output.status.success());
    let text = stdout(&output);

    let report: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(report["serial"], "E5Z9K0");
    assert_eq!(report["serial_bits"], "111100111100111");
    assert_eq!(report["order_rule"], "TwoRed");
    assert_eq!(report["hold_order"], serde_json::json!([5, 2, 3, 4, 1]));
    assert_eq!(report["keys"].as_array().map(|k| k.len()), Some(5));
    assert_eq!(report["trace"].as_array().map(|t| t.len()), Some(10));

    let rank_line = Regex::new(r#""rank":\s*[1-5]"#).unwrap();
    assert_eq!(rank_line.find_iter(&text).count(), 5 + 10 * 5);
}

#[test]
fn test_cli_solve_seed_matches_module_round() {
    let output = mechswitch(&["solve", "--serial", "AB1C2D", "--seed", "5", "--json"]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();

    let module = ModuleState::new(
        ModuleId(1),
        BombFacts::new("AB1C2D"),
        NullSink,
        RoundConfig::default(),
        Some(5),
    )
    .unwrap();
    assert_eq!(report["hold_order"], serde_json::json!(module.hold_order()));
    for (i, key) in module.assignment().keys.iter().enumerate() {
        let shown = &report["keys"][i];
        assert_eq!(shown["catalog_index"], serde_json::json!(key.catalog_index));
        assert_eq!(shown["condition"], serde_json::to_value(key.condition).unwrap());
    }
}

#[test]
fn test_cli_solve_reads_facts_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bomb.json");
    let mut f = File::create(&path).unwrap();
    writeln!(f, r#"{{ "serial_number": "QX7R4M", "batteries": 2 }}"#).unwrap();

    let output = mechswitch(&[
        "solve",
        "--facts",
        path.to_str().unwrap(),
        "--draws",
        "38,33,29,12,3",
        "--json",
    ]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["order_rule"], "ManyRazer");
    assert!(report.get("trace").is_none());
    let rules = report["static_rules"].as_array().unwrap();
    assert!(rules.contains(&serde_json::json!(34)));
}

#[test]
fn test_cli_rejects_bad_input() {
    let output = mechswitch(&["solve", "--serial", "SHORT"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Serial number"));

    let output = mechswitch(&["solve", "--draws", "1,2,3"]);
    assert!(!output.status.success());

    let output = mechswitch(&["solve", "--draws", "1,2,3,4,99"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of range"));

    let output = mechswitch(&["solve", "--tap-threshold", "9"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_catalog() {
    let output = mechswitch(&["catalog", "--seed", "3"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("SWITCH CATALOG (39 of 39)"));
    assert!(text.contains("Razer Yellow"));

    let output = mechswitch(&["catalog", "--filter", "speed"]);
    let text = stdout(&output);
    assert!(text.contains("SWITCH CATALOG (5 of 39)"), "{}", text);
    assert!(!text.contains("Cherry Black"));
}

#[test]
fn test_cli_survey_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("survey.csv");
    let output = mechswitch(&[
        "survey",
        "--rounds",
        "25",
        "--seed",
        "7",
        "--csv",
        csv_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let content = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("round,seed,order_rule,starting_order,hold_order,moves,abandons,conditions")
    );
    let row = Regex::new(r"^\d+,\d+,[^,]+,[1-5]{5},[1-5]{5},\d+,\d+,[0-5]$").unwrap();
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 25);
    assert!(rows.iter().all(|r| row.is_match(r)), "{}", content);
}

#[test]
fn test_cli_survey_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    for path in [&a, &b] {
        let output = mechswitch(&[
            "survey",
            "-r",
            "10",
            "-s",
            "42",
            "--csv",
            path.to_str().unwrap(),
        ]);
        assert!(output.status.success());
    }
    assert_eq!(
        std::fs::read_to_string(&a).unwrap(),
        std::fs::read_to_string(&b).unwrap()
    );
}
