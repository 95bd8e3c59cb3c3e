use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::form::{FixtureResult, TeamForm, team_form};
use crate::live_stats::{
    LiveAssessment, StatPresence, StatSnapshot, TeamStatistics, compute_live_assessment,
};
use crate::poisson::{MatchProbabilities, compute_match_probabilities};
use crate::provider::{LiveFixture, MatchDataProvider};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrematchReport {
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub home_form: TeamForm,
    pub away_form: TeamForm,
    pub probabilities: MatchProbabilities,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveSide {
    pub team_id: u32,
    pub team_name: String,
    pub stats: StatSnapshot,
    pub reported: StatPresence,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveReport {
    pub fixture: Option<LiveFixture>,
    pub home: LiveSide,
    pub away: LiveSide,
    pub assessment: LiveAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LiveOutcome {
    Ready(LiveReport),
    Unavailable {
        fixture: Option<LiveFixture>,
        blocks: usize,
    },
}

pub fn analyze_prematch<P: MatchDataProvider + ?Sized>(
    provider: &P,
    home_team_id: u32,
    away_team_id: u32,
    last_n: u32,
    max_goals: u32,
) -> Result<PrematchReport> {
    let (home_fixtures, away_fixtures) = rayon::join(
        || provider.recent_fixtures(home_team_id, last_n),
        || provider.recent_fixtures(away_team_id, last_n),
    );
    let home_fixtures =
        home_fixtures.with_context(|| format!("fixtures for home team {home_team_id}"))?;
    let away_fixtures =
        away_fixtures.with_context(|| format!("fixtures for away team {away_team_id}"))?;
    debug!(
        home = home_fixtures.len(),
        away = away_fixtures.len(),
        "fetched recent fixtures"
    );

    Ok(prematch_from_fixtures(
        home_team_id,
        &home_fixtures,
        away_team_id,
        &away_fixtures,
        max_goals,
    ))
}

pub fn prematch_from_fixtures(
    home_team_id: u32,
    home_fixtures: &[FixtureResult],
    away_team_id: u32,
    away_fixtures: &[FixtureResult],
    max_goals: u32,
) -> PrematchReport {
    let home_form = team_form(home_fixtures, home_team_id);
    let away_form = team_form(away_fixtures, away_team_id);
    let probabilities = compute_match_probabilities(&home_form, &away_form, max_goals);
    PrematchReport {
        home_team_id,
        away_team_id,
        home_form,
        away_form,
        probabilities,
    }
}

pub fn analyze_live<P: MatchDataProvider + ?Sized>(
    provider: &P,
    fixture_id: u64,
) -> Result<LiveOutcome> {
    let fixture = provider
        .fixture(fixture_id)
        .with_context(|| format!("fixture {fixture_id}"))?;
    let blocks = provider
        .live_statistics(fixture_id)
        .with_context(|| format!("statistics for fixture {fixture_id}"))?;
    Ok(live_from_blocks(fixture, blocks))
}

/// Needs two statistics blocks; with fewer the match is reported unavailable
/// rather than scored one-sided.
pub fn live_from_blocks(fixture: Option<LiveFixture>, blocks: Vec<TeamStatistics>) -> LiveOutcome {
    if blocks.len() < 2 {
        return LiveOutcome::Unavailable {
            fixture,
            blocks: blocks.len(),
        };
    }
    let (home, away) = split_sides(fixture.as_ref(), blocks);
    let home = to_side(home);
    let away = to_side(away);
    let assessment = compute_live_assessment(&home.stats, &away.stats);
    LiveOutcome::Ready(LiveReport {
        fixture,
        home,
        away,
        assessment,
    })
}

/// Matches blocks to sides by team id when the fixture is known, otherwise
/// takes provider order (home first).
fn split_sides(
    fixture: Option<&LiveFixture>,
    mut blocks: Vec<TeamStatistics>,
) -> (TeamStatistics, TeamStatistics) {
    if let Some(f) = fixture {
        let home_idx = blocks.iter().position(|b| b.team_id == f.home.id);
        let away_idx = blocks.iter().position(|b| b.team_id == f.away.id);
        if let (Some(h), Some(a)) = (home_idx, away_idx) {
            if h != a {
                let home = blocks[h].clone();
                let away = blocks[a].clone();
                return (home, away);
            }
        }
        debug!(
            fixture = f.fixture_id,
            "statistics teams do not match fixture; using provider order"
        );
    }
    let away = blocks.swap_remove(1);
    let home = blocks.swap_remove(0);
    (home, away)
}

fn to_side(block: TeamStatistics) -> LiveSide {
    let stats = StatSnapshot::from(&block);
    let reported = StatPresence::from_entries(&block.entries);
    LiveSide {
        team_id: block.team_id,
        team_name: block.team_name,
        stats,
        reported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live_stats::{StatEntry, StatValue};
    use crate::provider::TeamRef;

    fn block(team_id: u32, shots: f64) -> TeamStatistics {
        TeamStatistics {
            team_id,
            team_name: format!("T{team_id}"),
            entries: vec![StatEntry {
                label: "Total Shots".to_string(),
                value: StatValue::Number(shots),
            }],
        }
    }

    fn fixture(home: u32, away: u32) -> LiveFixture {
        LiveFixture {
            fixture_id: 99,
            league_name: String::new(),
            home: TeamRef {
                id: home,
                name: "H".to_string(),
            },
            away: TeamRef {
                id: away,
                name: "A".to_string(),
            },
            home_goals: Some(0),
            away_goals: Some(0),
            elapsed: 30,
        }
    }

    #[test]
    fn single_block_is_unavailable() {
        let out = live_from_blocks(None, vec![block(1, 5.0)]);
        assert!(matches!(out, LiveOutcome::Unavailable { blocks: 1, .. }));
    }

    #[test]
    fn blocks_follow_provider_order_without_fixture() {
        let out = live_from_blocks(None, vec![block(1, 8.0), block(2, 2.0)]);
        let LiveOutcome::Ready(report) = out else {
            panic!("expected report");
        };
        assert_eq!(report.home.team_id, 1);
        assert_eq!(report.away.team_id, 2);
        assert_eq!(report.assessment.diffs.shots, 6.0);
    }

    #[test]
    fn blocks_are_matched_by_team_id() {
        let out = live_from_blocks(Some(fixture(2, 1)), vec![block(1, 8.0), block(2, 2.0)]);
        let LiveOutcome::Ready(report) = out else {
            panic!("expected report");
        };
        assert_eq!(report.home.team_id, 2);
        assert_eq!(report.assessment.diffs.shots, -6.0);
        assert!(report.assessment.home_win_prob < 50.0);
    }
}
