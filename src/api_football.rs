use anyhow::{Context, Result, bail};
use reqwest::Url;
use serde_json::Value;
use tracing::warn;

use crate::config::Config;
use crate::form::FixtureResult;
use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;
use crate::live_stats::{StatEntry, StatValue, TeamStatistics};
use crate::provider::{LiveFixture, MatchDataProvider, TeamRef};

const API_KEY_HEADER: &str = "x-apisports-key";

/// Blocking client for the API-Football v3 REST API.
#[derive(Debug, Clone)]
pub struct ApiFootball {
    base_url: String,
    api_key: String,
    cache_ttl_secs: u64,
    timeout_secs: u64,
}

impl ApiFootball {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self {
            base_url: cfg.base_url.clone(),
            api_key: cfg.require_api_key()?.to_string(),
            cache_ttl_secs: cfg.cache_ttl_secs,
            timeout_secs: cfg.http_timeout_secs,
        })
    }

    fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String> {
        let client = http_client(self.timeout_secs)?;
        let url = Url::parse_with_params(&format!("{}/{endpoint}", self.base_url), params)
            .with_context(|| format!("invalid url for {endpoint}"))?;
        fetch_json_cached(
            client,
            url.as_str(),
            &[(API_KEY_HEADER, self.api_key.as_str())],
            self.cache_ttl_secs,
        )
        .with_context(|| format!("{endpoint} request failed"))
    }
}

impl MatchDataProvider for ApiFootball {
    fn recent_fixtures(&self, team_id: u32, limit: u32) -> Result<Vec<FixtureResult>> {
        let body = self.get(
            "fixtures",
            &[("team", team_id.to_string()), ("last", limit.to_string())],
        )?;
        parse_fixtures_json(&body)
    }

    fn live_statistics(&self, fixture_id: u64) -> Result<Vec<TeamStatistics>> {
        let body = self.get("fixtures/statistics", &[("fixture", fixture_id.to_string())])?;
        parse_statistics_json(&body)
    }

    fn fixture(&self, fixture_id: u64) -> Result<Option<LiveFixture>> {
        let body = self.get("fixtures", &[("id", fixture_id.to_string())])?;
        Ok(parse_live_fixtures_json(&body)?.into_iter().next())
    }

    fn live_fixtures(&self) -> Result<Vec<LiveFixture>> {
        let body = self.get("fixtures", &[("live", "all".to_string())])?;
        parse_live_fixtures_json(&body)
    }
}

/// Unwraps the `{ "errors": ..., "response": [...] }` envelope.
///
/// API-Football reports quota and auth failures with a 200 status and a
/// non-empty `errors` value, so those are turned into errors here.
fn parse_envelope(raw: &str) -> Result<Vec<Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let v: Value = serde_json::from_str(trimmed).context("invalid api-football json")?;

    let has_errors = match v.get("errors") {
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(Value::String(s)) => !s.trim().is_empty(),
        _ => false,
    };
    if has_errors {
        let errors = v.get("errors").map(|e| e.to_string()).unwrap_or_default();
        bail!("api-football returned errors: {errors}");
    }

    Ok(v.get("response")
        .and_then(|r| r.as_array())
        .cloned()
        .unwrap_or_default())
}

pub fn parse_fixtures_json(raw: &str) -> Result<Vec<FixtureResult>> {
    Ok(parse_envelope(raw)?.iter().map(parse_fixture_result).collect())
}

fn parse_fixture_result(item: &Value) -> FixtureResult {
    let teams = item.get("teams");
    let goals = item.get("goals");
    FixtureResult {
        home_team_id: team_id(teams.and_then(|t| t.get("home"))).unwrap_or(0),
        away_team_id: team_id(teams.and_then(|t| t.get("away"))).unwrap_or(0),
        home_goals: goals.and_then(|g| goal_count(g.get("home"))),
        away_goals: goals.and_then(|g| goal_count(g.get("away"))),
    }
}

pub fn parse_live_fixtures_json(raw: &str) -> Result<Vec<LiveFixture>> {
    let mut out = Vec::new();
    for item in parse_envelope(raw)? {
        match parse_live_fixture(&item) {
            Some(f) => out.push(f),
            None => warn!("skipping fixture record without id or teams"),
        }
    }
    Ok(out)
}

fn parse_live_fixture(item: &Value) -> Option<LiveFixture> {
    let fixture = item.get("fixture")?;
    let fixture_id = fixture.get("id")?.as_u64()?;
    let teams = item.get("teams")?;
    let goals = item.get("goals");
    let elapsed = fixture
        .get("status")
        .and_then(|s| s.get("elapsed"))
        .and_then(|x| x.as_u64())
        .unwrap_or(0) as u32;
    let league_name = item
        .get("league")
        .and_then(|l| l.get("name"))
        .and_then(|x| x.as_str())
        .unwrap_or_default()
        .to_string();

    Some(LiveFixture {
        fixture_id,
        league_name,
        home: team_ref(teams.get("home"))?,
        away: team_ref(teams.get("away"))?,
        home_goals: goals.and_then(|g| goal_count(g.get("home"))),
        away_goals: goals.and_then(|g| goal_count(g.get("away"))),
        elapsed,
    })
}

pub fn parse_statistics_json(raw: &str) -> Result<Vec<TeamStatistics>> {
    let mut out = Vec::new();
    for block in parse_envelope(raw)? {
        let Some(team) = team_ref(block.get("team")) else {
            warn!("skipping statistics block without team");
            continue;
        };
        let entries = block
            .get("statistics")
            .and_then(|s| s.as_array())
            .map(|stats| stats.iter().filter_map(parse_stat_entry).collect())
            .unwrap_or_default();
        out.push(TeamStatistics {
            team_id: team.id,
            team_name: team.name,
            entries,
        });
    }
    Ok(out)
}

fn parse_stat_entry(v: &Value) -> Option<StatEntry> {
    let label = v.get("type")?.as_str()?.trim().to_string();
    if label.is_empty() {
        return None;
    }
    Some(StatEntry {
        label,
        value: stat_value(v.get("value")),
    })
}

fn stat_value(value: Option<&Value>) -> StatValue {
    match value {
        Some(Value::Number(n)) => n.as_f64().map(StatValue::Number).unwrap_or(StatValue::Missing),
        Some(Value::String(s)) => StatValue::Text(s.clone()),
        Some(Value::Null) | None => StatValue::Missing,
        Some(other) => StatValue::Text(other.to_string()),
    }
}

fn team_id(v: Option<&Value>) -> Option<u32> {
    v?.get("id")?.as_u64().map(|id| id as u32)
}

fn team_ref(v: Option<&Value>) -> Option<TeamRef> {
    let v = v?;
    let id = v.get("id")?.as_u64()? as u32;
    let name = v
        .get("name")
        .and_then(|x| x.as_str())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| format!("Team {id}"));
    Some(TeamRef { id, name })
}

/// Goals arrive as integers, null for unplayed fixtures, and occasionally as
/// strings or floats from other feeds. Only a missing or null value means "no
/// score"; anything else that does not read as a count is 0.
fn goal_count(v: Option<&Value>) -> Option<u32> {
    let count = match v? {
        Value::Null => return None,
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u32>().ok().map(u64::from),
        _ => None,
    };
    Some(count.map(|g| g as u32).unwrap_or(0))
}
