use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::form::FixtureResult;
use crate::live_stats::TeamStatistics;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: u32,
    pub name: String,
}

/// Header information for a single fixture: who is playing, the score so far
/// and the elapsed minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveFixture {
    pub fixture_id: u64,
    #[serde(default)]
    pub league_name: String,
    pub home: TeamRef,
    pub away: TeamRef,
    #[serde(default)]
    pub home_goals: Option<u32>,
    #[serde(default)]
    pub away_goals: Option<u32>,
    #[serde(default)]
    pub elapsed: u32,
}

impl LiveFixture {
    pub fn label(&self) -> String {
        if self.league_name.is_empty() {
            format!("{} vs {}", self.home.name, self.away.name)
        } else {
            format!("{} vs {} ({})", self.home.name, self.away.name, self.league_name)
        }
    }
}

/// Source of match data consumed by the analysis layer.
///
/// `Sync` so both teams' histories can be fetched in parallel.
pub trait MatchDataProvider: Sync {
    /// The team's last `limit` fixtures, most recent first.
    fn recent_fixtures(&self, team_id: u32, limit: u32) -> Result<Vec<FixtureResult>>;

    /// One statistics block per team. Two are expected but not guaranteed.
    fn live_statistics(&self, fixture_id: u64) -> Result<Vec<TeamStatistics>>;

    fn fixture(&self, fixture_id: u64) -> Result<Option<LiveFixture>>;

    fn live_fixtures(&self) -> Result<Vec<LiveFixture>>;
}
