use std::path::PathBuf;

use pitchcast::analysis::LiveOutcome;
use pitchcast::replay::ReplayCase;

fn replay_case() -> ReplayCase {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("replay_case.json");
    ReplayCase::from_file(&path).expect("replay case should load")
}

#[test]
fn bundled_case_replays_prematch() {
    let report = replay_case().prematch_report().expect("case has a prematch section");
    assert_eq!((report.home_team_id, report.away_team_id), (40, 33));
    let home = &report.home_form;
    assert_eq!((home.wins, home.draws, home.losses), (2, 1, 0));
    let away = &report.away_form;
    assert_eq!((away.wins, away.draws, away.losses), (1, 0, 1));
    assert_eq!(report.probabilities.matrix.max_goals(), 6);
    assert!(report.probabilities.summary.p_home_win > report.probabilities.summary.p_away_win);
}

#[test]
fn bundled_case_replays_live() {
    let outcome = replay_case().live_outcome().expect("case has a live section");
    let LiveOutcome::Ready(report) = outcome else {
        panic!("expected two statistics blocks");
    };
    assert_eq!(report.home.team_name, "Liverpool");
    assert_eq!(report.assessment.diffs.shots, 6.0);
    assert_eq!(report.assessment.diffs.dangerous_attacks, 8.0);
    assert!((report.assessment.diffs.expected_goals - 1.8).abs() < 1e-12);
    assert!((report.assessment.home_win_prob - 73.5).abs() < 1e-9);
}

#[test]
fn bundled_case_renders_both_sections() {
    let text = replay_case().to_text();
    assert!(text.contains("== Pre-match"));
    assert!(text.contains("== Live"));
    assert!(text.contains("Liverpool"));
}
