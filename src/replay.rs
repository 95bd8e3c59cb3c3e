use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::analysis::{LiveOutcome, PrematchReport, live_from_blocks, prematch_from_fixtures};
use crate::form::FixtureResult;
use crate::live_stats::TeamStatistics;
use crate::poisson::{DEFAULT_MAX_GOALS, MAX_GOALS_LIMIT};
use crate::provider::LiveFixture;
use crate::render;

/// A captured pre-match and/or live case, replayed through the engine
/// without any provider calls.
#[derive(Debug, Deserialize)]
pub struct ReplayCase {
    #[serde(default)]
    pub prematch: Option<PrematchCase>,
    #[serde(default)]
    pub live: Option<LiveCase>,
}

#[derive(Debug, Deserialize)]
pub struct PrematchCase {
    pub home_team_id: u32,
    pub away_team_id: u32,
    #[serde(default)]
    pub home_fixtures: Vec<FixtureResult>,
    #[serde(default)]
    pub away_fixtures: Vec<FixtureResult>,
    #[serde(default)]
    pub max_goals: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LiveCase {
    #[serde(default)]
    pub fixture: Option<LiveFixture>,
    #[serde(default)]
    pub statistics: Vec<TeamStatistics>,
}

impl ReplayCase {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid replay case json")
    }

    pub fn prematch_report(&self) -> Option<PrematchReport> {
        let pre = self.prematch.as_ref()?;
        Some(prematch_from_fixtures(
            pre.home_team_id,
            &pre.home_fixtures,
            pre.away_team_id,
            &pre.away_fixtures,
            pre.max_goals(),
        ))
    }

    pub fn live_outcome(&self) -> Option<LiveOutcome> {
        let live = self.live.as_ref()?;
        Some(live_from_blocks(live.fixture.clone(), live.statistics.clone()))
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(report) = self.prematch_report() {
            out.push_str("== Pre-match\n");
            out.push_str(&render::prematch_text(&report));
        }
        if let Some(outcome) = self.live_outcome() {
            out.push_str("== Live\n");
            out.push_str(&render::live_text(&outcome));
        }
        out
    }
}

impl PrematchCase {
    pub fn max_goals(&self) -> u32 {
        self.max_goals.unwrap_or(DEFAULT_MAX_GOALS).min(MAX_GOALS_LIMIT)
    }
}
