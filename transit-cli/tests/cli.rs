use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const NETWORK: &str = "\
# остановки
Stop Tolstopaltsevo: 55.611087, 37.20829, 3900m to Marushkino
Stop Marushkino: 55.595884, 37.209755, 9900m to Rasskazovka, 100m to Marushkino
Stop Rasskazovka: 55.632761, 37.333324, 9500m to Marushkino
Stop Biryulyovo Zapadnoye: 55.574371, 37.6517, 7500m to Rossoshanskaya ulitsa, 1800m to Biryusinka
Stop Biryusinka: 55.581065, 37.64839, 750m to Universam
Stop Universam: 55.587655, 37.645687, 5600m to Rossoshanskaya ulitsa
Stop Rossoshanskaya ulitsa: 55.595579, 37.605757
Stop Prazhskaya: 55.611678, 37.603831

# маршруты
Bus 256: Biryulyovo Zapadnoye > Biryusinka > Universam > Rossoshanskaya ulitsa > Biryulyovo Zapadnoye
Bus 750: Tolstopaltsevo - Marushkino - Marushkino - Rasskazovka
";

fn input_file(queries: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    write!(f, "{NETWORK}{queries}").unwrap();
    f
}

fn run(file: &NamedTempFile, extra: &[&str]) -> serde_json::Value {
    let out = Command::cargo_bin("transit")
        .unwrap()
        .arg("--input")
        .arg(file.path())
        .args(extra)
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn bus_and_stop_stats() {
    let f = input_file("Bus 256\nBus 750\nBus 751\nStop Prazhskaya\nStop Biryulyovo Zapadnoye\nStop Samara\n");
    let out = run(&f, &[]);

    assert_eq!(out[0]["request_id"], 1);
    assert_eq!(out[0]["stop_count"], 5);
    assert_eq!(out[0]["unique_stop_count"], 4);
    // 1800 + 750 + 5600; обратно из Rossoshanskaya ulitsa расстояние не объявлено
    assert_eq!(out[0]["route_length"], 8150);
    let curvature = out[0]["curvature"].as_f64().unwrap();
    assert!(curvature > 1.0 && curvature < 2.0, "curvature {curvature}");

    assert_eq!(out[1]["stop_count"], 7);
    assert_eq!(out[1]["unique_stop_count"], 3);

    assert_eq!(out[2]["error_message"], "not found");
    assert_eq!(out[3]["buses"], serde_json::json!([]));
    assert_eq!(out[4]["buses"], serde_json::json!(["256"]));
    assert_eq!(out[5]["error_message"], "not found");
}

#[test]
fn route_query_builds_router() {
    let f = input_file("Route Biryulyovo Zapadnoye > Universam\nRoute Biryulyovo Zapadnoye > Prazhskaya\n");
    let out = run(&f, &["--bus-wait-time", "2", "--bus-velocity", "30"]);

    let total = out[0]["total_time"].as_f64().unwrap();
    // 2 мин ожидания + 2550 м при 30 км/ч (500 м/мин)
    assert!((total - 7.1).abs() < 1e-9, "total {total}");
    assert_eq!(out[0]["items"][0]["type"], "Wait");
    assert_eq!(out[0]["items"][1]["bus"], "256");
    assert_eq!(out[0]["items"][1]["span_count"], 2);

    assert_eq!(out[1]["error_message"], "not found");
}

#[test]
fn map_query_renders_svg() {
    let f = input_file("Map\n");
    let out = run(&f, &["--pretty"]);
    let svg = out[0]["map"].as_str().unwrap();
    assert!(svg.contains("<polyline"));
    assert!(svg.contains("Rasskazovka"));
    // остановка без маршрутов на карту не попадает
    assert!(!svg.contains("Prazhskaya"));
}

#[test]
fn commands_from_stdin() {
    Command::cargo_bin("transit")
        .unwrap()
        .write_stdin("Stop A: 0, 0\nBus 1: A > A\nBus 1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"stop_count\":2"));
}

#[test]
fn malformed_line_fails_with_line_number() {
    let mut f = NamedTempFile::new().unwrap();
    write!(f, "Stop A: 0, 0\nStop B: north, 1\n").unwrap();

    Command::cargo_bin("transit")
        .unwrap()
        .arg("--input")
        .arg(f.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn unknown_stop_in_route_fails() {
    let mut f = NamedTempFile::new().unwrap();
    write!(f, "Stop A: 0, 0\nBus 1: A > Ghost > A\n").unwrap();

    Command::cargo_bin("transit")
        .unwrap()
        .arg("--input")
        .arg(f.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown stop: Ghost"));
}

#[test]
fn invalid_velocity_is_rejected() {
    Command::cargo_bin("transit")
        .unwrap()
        .args(["--bus-velocity", "0"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bus-velocity must be positive"));
}

#[test]
fn route_query_without_network_is_not_found() {
    let out = Command::cargo_bin("transit")
        .unwrap()
        .write_stdin("Route A > B\n")
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let out: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(out[0]["request_id"], 1);
    assert_eq!(out[0]["error_message"], "not found");
}

#[test]
fn hash_in_stop_name_is_part_of_the_name() {
    let f = input_file("Stop Pier #2: 55.60, 37.30\nBus 12: Pier #2 - Universam\nStop Pier #2\n");
    let out = run(&f, &[]);
    assert_eq!(out[0]["buses"], serde_json::json!(["12"]));
}
