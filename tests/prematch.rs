use std::collections::HashMap;

use anyhow::{Result, anyhow};

use pitchcast::analysis::{LiveOutcome, analyze_live, analyze_prematch};
use pitchcast::form::{FixtureResult, TeamForm};
use pitchcast::live_stats::TeamStatistics;
use pitchcast::poisson::{
    DEFAULT_MAX_GOALS, OutcomeSummary, ScorelineMatrix, compute_match_probabilities,
};
use pitchcast::provider::{LiveFixture, MatchDataProvider};

#[derive(Default)]
struct FakeProvider {
    fixtures: HashMap<u32, Vec<FixtureResult>>,
    statistics: Vec<TeamStatistics>,
}

impl MatchDataProvider for FakeProvider {
    fn recent_fixtures(&self, team_id: u32, limit: u32) -> Result<Vec<FixtureResult>> {
        let rows = self
            .fixtures
            .get(&team_id)
            .ok_or_else(|| anyhow!("unknown team {team_id}"))?;
        Ok(rows.iter().take(limit as usize).copied().collect())
    }

    fn live_statistics(&self, _fixture_id: u64) -> Result<Vec<TeamStatistics>> {
        Ok(self.statistics.clone())
    }

    fn fixture(&self, _fixture_id: u64) -> Result<Option<LiveFixture>> {
        Ok(None)
    }

    fn live_fixtures(&self) -> Result<Vec<LiveFixture>> {
        Ok(Vec::new())
    }
}

fn result(home: u32, away: u32, hg: u32, ag: u32) -> FixtureResult {
    FixtureResult {
        home_team_id: home,
        away_team_id: away,
        home_goals: Some(hg),
        away_goals: Some(ag),
    }
}

#[test]
fn prematch_pipeline_from_provider() {
    let mut provider = FakeProvider::default();
    provider.fixtures.insert(
        1,
        vec![result(1, 5, 3, 0), result(6, 1, 1, 2), result(1, 7, 2, 2)],
    );
    provider
        .fixtures
        .insert(2, vec![result(2, 5, 0, 1), result(8, 2, 2, 0), result(2, 9, 1, 1)]);

    let report = analyze_prematch(&provider, 1, 2, 10, DEFAULT_MAX_GOALS).expect("analysis");
    assert_eq!(report.home_form.wins, 2);
    assert_eq!(report.away_form.losses, 2);

    let rates = report.probabilities.rates;
    // home: GF 7/3, away GA 4/3 -> (11/3)/2 * 1.1
    assert!((rates.lambda_home - (11.0 / 6.0) * 1.1).abs() < 1e-12);
    // away: GF 1/3, home GA 3/3 -> (4/3)/2
    assert!((rates.lambda_away - 4.0 / 6.0).abs() < 1e-12);

    let s = report.probabilities.summary;
    assert!(s.p_home_win > s.p_away_win);
    assert_eq!(s.p_over_2_5 + s.p_under_2_5, 1.0);
}

#[test]
fn prematch_respects_fixture_limit() {
    let mut provider = FakeProvider::default();
    provider
        .fixtures
        .insert(1, vec![result(1, 5, 4, 0), result(1, 6, 4, 0), result(1, 7, 4, 0)]);
    provider.fixtures.insert(2, vec![result(2, 5, 0, 0)]);

    let report = analyze_prematch(&provider, 1, 2, 1, DEFAULT_MAX_GOALS).expect("analysis");
    assert_eq!(report.home_form.played, 1);
}

#[test]
fn provider_failure_is_propagated() {
    let mut provider = FakeProvider::default();
    provider.fixtures.insert(1, Vec::new());
    let err = analyze_prematch(&provider, 1, 99, 10, DEFAULT_MAX_GOALS).unwrap_err();
    assert!(format!("{err:#}").contains("unknown team 99"));
}

#[test]
fn teams_without_history_fall_back_to_floor() {
    let mut provider = FakeProvider::default();
    provider.fixtures.insert(1, Vec::new());
    provider.fixtures.insert(2, Vec::new());
    let report = analyze_prematch(&provider, 1, 2, 10, DEFAULT_MAX_GOALS).expect("analysis");
    assert_eq!(report.home_form, TeamForm::default());
    assert!((report.probabilities.rates.lambda_away - 0.2).abs() < 1e-12);
    assert!(report.probabilities.summary.p_draw > 0.5);
}

#[test]
fn known_rates_favour_home() {
    let matrix = ScorelineMatrix::new(1.8, 1.2, DEFAULT_MAX_GOALS);
    let s = OutcomeSummary::from_matrix(&matrix);
    assert!(s.p_home_win > s.p_away_win);
    assert!(s.p_home_win > s.p_draw);
    assert!((s.p_home_win + s.p_draw + s.p_away_win - matrix.total_mass()).abs() < 1e-12);
    assert!(matrix.total_mass() < 1.0);
}

#[test]
fn equal_forms_only_differ_by_home_advantage() {
    let form = TeamForm {
        avg_goals_for: 1.2,
        avg_goals_against: 1.2,
        ..TeamForm::default()
    };
    let out = compute_match_probabilities(&form, &form, DEFAULT_MAX_GOALS);
    assert!((out.rates.lambda_home / out.rates.lambda_away - 1.1).abs() < 1e-12);
    assert!(out.summary.p_home_win > out.summary.p_away_win);
}

#[test]
fn live_with_one_block_is_unavailable() {
    let provider = FakeProvider {
        statistics: vec![TeamStatistics {
            team_id: 1,
            team_name: "Only".to_string(),
            entries: Vec::new(),
        }],
        ..FakeProvider::default()
    };
    let outcome = analyze_live(&provider, 42).expect("analysis");
    assert!(matches!(outcome, LiveOutcome::Unavailable { blocks: 1, fixture: None }));
}
