use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PLACES_JSON: &str = r#"[
    {"id": 1, "name": "Birr Castle", "gaelic_name": "Caisleán Bhiorra",
     "place_type_id": 1, "latitude": 53.0, "longitude": -7.0},
    {"id": 2, "name": "Clonmacnoise", "place_type_id": 2,
     "latitude": 53.5, "longitude": -7.5, "location": "Co. Offaly"}
]"#;

const CATEGORIES_JSON: &str = r#"[{"id": 1, "name": "Castle"}, {"id": 2, "name": "Monastery"}]"#;

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("places.json"), PLACES_JSON).unwrap();
    fs::write(dir.path().join("categories.json"), CATEGORIES_JSON).unwrap();
    dir
}

/// Command with a clean environment and no feed flags
fn bare_placefinder(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("placefinder").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("PLACEFINDER_CONFIG")
        .env_remove("PLACEFINDER_PLACES_URL")
        .env_remove("PLACEFINDER_CATEGORIES_URL")
        .env_remove("PLACEFINDER_TIMEOUT_SECS");
    cmd
}

fn placefinder(dir: &Path) -> Command {
    let mut cmd = bare_placefinder(dir);
    cmd.args(["--places", "places.json", "--categories", "categories.json"]);
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_query_all_categories() {
    let dir = workspace();

    placefinder(dir.path())
        .args(["query", "--lat", "53.0", "--lng", "-7.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Birr Castle (Caisleán Bhiorra)"))
        .stdout(predicate::str::contains("less than 1 km"))
        .stdout(predicate::str::contains("1 place"))
        .stdout(predicate::str::contains("within 10 km"));
}

#[test]
fn test_query_json_with_category() {
    let dir = workspace();

    let json = json_stdout(placefinder(dir.path()).args([
        "--format", "json", "query", "--lat", "53.0", "--lng", "-7.0", "--category", "2",
    ]));

    assert_eq!(json["query"]["category"], 2);
    assert_eq!(json["query"]["fallback"], false);
    assert_eq!(json["nearest_place"]["id"], 2);
    assert_eq!(json["count_within_radius"], 0);
    assert_eq!(json["distance_display"], 64.8);
    let km = json["distance_km"].as_f64().unwrap();
    assert!((km - 64.789).abs() < 0.01);
}

#[test]
fn test_show_all_sentinel() {
    let dir = workspace();

    let json = json_stdout(placefinder(dir.path()).args([
        "--format", "json", "query", "--lat", "53.0", "--lng", "-7.0", "--category", "-1", "--radius", "100",
    ]));

    assert_eq!(json["query"]["category"], -1);
    assert_eq!(json["nearest_place"]["id"], 1);
    assert_eq!(json["count_within_radius"], 2);
}

#[test]
fn test_query_uses_fallback_point() {
    let dir = workspace();

    let json = json_stdout(placefinder(dir.path()).args(["--format", "json", "nearest"]));

    assert_eq!(json["query"]["fallback"], true);
    assert_eq!(json["query"]["latitude"], 53.1424);
    assert_eq!(json["nearest_place"]["name"], "Clonmacnoise");
    assert_eq!(json["distance_display"], 41.8);
}

#[test]
fn test_unknown_category_has_no_nearest() {
    let dir = workspace();

    let json = json_stdout(placefinder(dir.path()).args([
        "--format", "json", "nearest", "--lat", "53.0", "--lng", "-7.0", "--category", "99",
    ]));

    assert!(json["nearest_place"].is_null());
    assert!(json["distance_km"].is_null());
}

#[test]
fn test_count_boundary_and_clamp() {
    let dir = workspace();

    placefinder(dir.path())
        .args(["count", "--lat", "53.0", "--lng", "-7.0", "--radius", "65"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 places within 65 km"));

    let json = json_stdout(placefinder(dir.path()).args([
        "--format", "json", "count", "--lat", "53.0", "--lng", "-7.0", "--radius", "5000",
    ]));
    assert_eq!(json["query"]["radius_km"], 1000.0);
    assert_eq!(json["count_within_radius"], 2);
}

#[test]
fn test_radius_clamp_is_reported() {
    let dir = workspace();

    placefinder(dir.path())
        .args(["--format", "json", "count", "--lat", "53.0", "--lng", "-7.0", "--radius", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("outside 1..1000 km, using 1 km"))
        .stdout(predicate::str::contains("\"radius_km\": 1.0"));
}

#[test]
fn test_negative_radius_rejected() {
    let dir = workspace();

    placefinder(dir.path())
        .args(["count", "--lat", "53.0", "--lng", "-7.0", "--radius", "-5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid radius"));
}

#[test]
fn test_invalid_coordinate_rejected() {
    let dir = workspace();

    placefinder(dir.path())
        .args(["nearest", "--lat", "95.0", "--lng", "-7.0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid coordinate"));
}

#[test]
fn test_json_error_report() {
    let dir = workspace();

    let output = placefinder(dir.path())
        .args(["--format", "json", "nearest", "--lat", "95.0", "--lng", "-7.0"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["code_str"], "E6002");
    assert_eq!(report["category"], "Validation");
    assert!(report["message"].as_str().unwrap().contains("95"));
}

#[test]
fn test_json_error_report_for_config() {
    let dir = TempDir::new().unwrap();

    let output = placefinder(dir.path())
        .args(["--format", "json", "--config", "nope.toml", "format", "3"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["category"], "Configuration");
}

#[test]
fn test_show_place_details() {
    let dir = workspace();

    placefinder(dir.path())
        .args(["show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Clonmacnoise"))
        .stdout(predicate::str::contains("Co. Offaly"))
        .stdout(predicate::str::contains("2 (Monastery)"))
        .stdout(predicate::str::contains("53.5"))
        .stdout(predicate::str::contains("-7.5"));

    placefinder(dir.path())
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Caisleán Bhiorra"));
}

#[test]
fn test_show_place_json() {
    let dir = workspace();

    let json = json_stdout(placefinder(dir.path()).args(["--format", "json", "show", "2"]));

    assert_eq!(json["id"], 2);
    assert_eq!(json["name"], "Clonmacnoise");
    assert_eq!(json["location"], "Co. Offaly");
    assert_eq!(json["place_type_id"], 2);
    assert_eq!(json["category_name"], "Monastery");
    assert_eq!(json["category_color"], "orange");
    assert_eq!(json["latitude"], 53.5);
    assert_eq!(json["longitude"], -7.5);
}

#[test]
fn test_show_unknown_place() {
    let dir = workspace();

    placefinder(dir.path())
        .args(["show", "99"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No place with id 99"));
}

#[test]
fn test_feeds_from_environment() {
    let dir = workspace();

    let json = json_stdout(
        bare_placefinder(dir.path())
            .env("PLACEFINDER_PLACES_URL", "places.json")
            .env("PLACEFINDER_CATEGORIES_URL", "categories.json")
            .args(["--format", "json", "categories"]),
    );

    let rows = json.as_array().unwrap();
    assert_eq!(rows[0]["places"], 2);
    assert_eq!(rows[2]["name"], "Monastery");
}

#[test]
fn test_non_numeric_timeout_is_ignored() {
    let dir = workspace();

    bare_placefinder(dir.path())
        .env("PLACEFINDER_PLACES_URL", "places.json")
        .env("PLACEFINDER_CATEGORIES_URL", "categories.json")
        .env("PLACEFINDER_TIMEOUT_SECS", "soon")
        .args(["nearest", "--lat", "53.0", "--lng", "-7.0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("PLACEFINDER_TIMEOUT_SECS"))
        .stdout(predicate::str::contains("Birr Castle"));
}

#[test]
fn test_rank_limit() {
    let dir = workspace();

    let json = json_stdout(placefinder(dir.path()).args([
        "--format", "json", "rank", "--lat", "53.5", "--lng", "-7.5", "-n", "1",
    ]));

    let places = json["places"].as_array().unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0]["rank"], 1);
    assert_eq!(places[0]["place"]["id"], 2);
    assert_eq!(places[0]["distance_display"], "less than 1");
}

#[test]
fn test_categories_lists_all_first() {
    let dir = workspace();

    let json = json_stdout(placefinder(dir.path()).args(["--format", "json", "categories"]));

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["id"], -1);
    assert_eq!(rows[0]["name"], "All");
    assert_eq!(rows[0]["places"], 2);
    assert_eq!(rows[1]["color"], "tomato");
    assert_eq!(rows[2]["name"], "Monastery");
}

#[test]
fn test_missing_places_feed_degrades() {
    let dir = workspace();

    placefinder(dir.path())
        .args(["--places", "missing.json", "query", "--lat", "53.0", "--lng", "-7.0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("failed to load places"))
        .stderr(predicate::str::contains("No places match"))
        .stdout(predicate::str::contains("0 places"));
}

#[test]
fn test_distance_needs_no_catalog() {
    let dir = TempDir::new().unwrap();

    placefinder(dir.path())
        .args(["distance", "53.3498", "-6.2603", "53.2707", "-9.0568"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(186 km)"));
}

#[test]
fn test_format_bands() {
    let dir = TempDir::new().unwrap();

    placefinder(dir.path())
        .args(["format", "0.5"])
        .assert()
        .success()
        .stdout("less than 1\n");

    placefinder(dir.path())
        .args(["format", "12.34"])
        .assert()
        .success()
        .stdout("12.3\n");

    placefinder(dir.path())
        .args(["format", "1234.4"])
        .assert()
        .success()
        .stdout("1,234\n");

    placefinder(dir.path()).args(["format", "-1"]).assert().code(2);
}

#[test]
fn test_config_file_grouping_separator() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("placefinder.toml"),
        "[display]\ngrouping_separator = \".\"\n",
    )
    .unwrap();

    placefinder(dir.path())
        .args(["format", "20015"])
        .assert()
        .success()
        .stdout("20.015\n");
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();

    placefinder(dir.path())
        .args(["--config", "nope.toml", "format", "3"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration file not found"));
}
