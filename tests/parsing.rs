use std::fs;
use std::path::PathBuf;

use pitchcast::api_football::{parse_fixtures_json, parse_live_fixtures_json, parse_statistics_json};
use pitchcast::form::team_form;
use pitchcast::live_stats::{StatSnapshot, StatValue};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_team_fixtures() {
    let raw = read_fixture("team_fixtures.json");
    let rows = parse_fixtures_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].home_team_id, 33);
    assert_eq!(rows[0].away_team_id, 40);
    assert_eq!(rows[0].home_goals, Some(2));
    assert_eq!(rows[0].away_goals, Some(1));
    assert!(rows[3].is_unplayed());
    assert!(rows[4].is_unplayed());
}

#[test]
fn team_form_from_provider_fixtures() {
    let raw = read_fixture("team_fixtures.json");
    let rows = parse_fixtures_json(&raw).expect("fixture should parse");
    let form = team_form(&rows, 33);
    assert_eq!((form.wins, form.draws, form.losses), (1, 1, 1));
    assert_eq!(form.played, 3);
    // Unplayed fixtures still count towards the divisor.
    assert!((form.avg_goals_for - 0.6).abs() < 1e-12);
    assert!((form.avg_goals_against - 1.0).abs() < 1e-12);
}

#[test]
fn parses_statistics_blocks() {
    let raw = read_fixture("statistics.json");
    let blocks = parse_statistics_json(&raw).expect("fixture should parse");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].team_id, 33);
    assert_eq!(blocks[1].team_name, "Liverpool");
    assert_eq!(blocks[0].entries.len(), 6);
    assert_eq!(blocks[0].entries[4].value, StatValue::Missing);

    let united = StatSnapshot::from(&blocks[0]);
    assert_eq!(united.possession_pct, 42.0);
    assert_eq!(united.total_shots, 4.0);
    assert_eq!(united.attacks, 0.0);
    assert!((united.expected_goals - 0.6).abs() < 1e-12);
}

#[test]
fn parses_live_fixture_header() {
    let raw = read_fixture("live_fixture.json");
    let fixtures = parse_live_fixtures_json(&raw).expect("fixture should parse");
    assert_eq!(fixtures.len(), 1);
    let f = &fixtures[0];
    assert_eq!(f.fixture_id, 1_035_200);
    assert_eq!(f.elapsed, 67);
    assert_eq!(f.home.name, "Liverpool");
    assert_eq!((f.home_goals, f.away_goals), (Some(1), Some(0)));
    assert_eq!(f.label(), "Liverpool vs Manchester United (Premier League)");
}

#[test]
fn null_and_empty_bodies_are_empty() {
    assert!(parse_fixtures_json("null").expect("null should parse").is_empty());
    assert!(parse_statistics_json("").expect("empty should parse").is_empty());
    assert!(
        parse_statistics_json(r#"{"errors":[],"response":[]}"#)
            .expect("empty response should parse")
            .is_empty()
    );
}

#[test]
fn api_errors_are_reported() {
    let raw = r#"{"errors":{"requests":"You have reached the request limit for the day"}}"#;
    let err = parse_fixtures_json(raw).unwrap_err();
    assert!(err.to_string().contains("request limit"));
}

#[test]
fn invalid_json_is_an_error() {
    assert!(parse_live_fixtures_json("{not json").is_err());
}

#[test]
fn unreadable_goals_count_as_a_nil_nil_draw() {
    let raw = r#"{"errors":[],"response":[
        {"teams":{"home":{"id":1},"away":{"id":2}},"goals":{"home":"abc","away":"n/a"}},
        {"teams":{"home":{"id":1},"away":{"id":3}},"goals":{"home":2,"away":0}}
    ]}"#;
    let rows = parse_fixtures_json(raw).expect("fixtures should parse");
    assert_eq!((rows[0].home_goals, rows[0].away_goals), (Some(0), Some(0)));
    assert!(!rows[0].is_unplayed());

    let form = team_form(&rows, 1);
    assert_eq!((form.wins, form.draws, form.losses), (1, 1, 0));
    assert_eq!(form.played, 2);
    assert!((form.avg_goals_for - 1.0).abs() < 1e-12);
}
