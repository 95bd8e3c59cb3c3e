use serde::{Deserialize, Serialize};

use crate::commentary;

const POSSESSION_LABEL: &str = "ball possession";
const SHOTS_LABEL: &str = "total shots";
const CORNERS_LABEL: &str = "corner kicks";
const ATTACKS_LABEL: &str = "attacks";
const DANGEROUS_ATTACKS_LABEL: &str = "dangerous attacks";

const W_SHOTS: f64 = 2.0;
const W_POSSESSION: f64 = 0.4;
const W_CORNERS: f64 = 1.2;
const W_ATTACKS: f64 = 0.5;
const W_DANGEROUS_ATTACKS: f64 = 1.0;
const W_XG: f64 = 15.0;

/// A provider statistic value as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub label: String,
    pub value: StatValue,
}

/// One team's statistics block, entries kept in provider order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub team_id: u32,
    pub team_name: String,
    #[serde(default)]
    pub entries: Vec<StatEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatSnapshot {
    pub possession_pct: f64,
    pub total_shots: f64,
    pub corners: f64,
    pub attacks: f64,
    pub dangerous_attacks: f64,
    pub expected_goals: f64,
}

/// Home minus away for each tracked statistic.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatDiffs {
    pub possession: f64,
    pub shots: f64,
    pub corners: f64,
    pub attacks: f64,
    pub dangerous_attacks: f64,
    pub expected_goals: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveAssessment {
    pub home_win_prob: f64,
    pub away_win_prob: f64,
    pub score: f64,
    pub diffs: StatDiffs,
    pub commentary: Vec<String>,
}

impl StatValue {
    /// Best-effort float: trims, drops a trailing percent sign, and falls back
    /// to 0 for anything that does not parse to a finite, non-negative number.
    pub fn as_f64(&self) -> f64 {
        let v = match self {
            StatValue::Number(n) => *n,
            StatValue::Text(s) => parse_stat_text(s),
            StatValue::Missing => 0.0,
        };
        if v.is_finite() { v.max(0.0) } else { 0.0 }
    }

    /// False for values the provider sent as empty placeholders.
    pub fn is_reported(&self) -> bool {
        match self {
            StatValue::Number(_) => true,
            StatValue::Text(s) => !matches!(s.trim(), "" | "null" | "None"),
            StatValue::Missing => false,
        }
    }
}

fn parse_stat_text(raw: &str) -> f64 {
    let s = raw.trim();
    let s = if s.ends_with('%') {
        s.replace('%', "")
    } else {
        s.to_string()
    };
    s.trim().parse::<f64>().unwrap_or(0.0)
}

impl StatSnapshot {
    pub fn from_entries(entries: &[StatEntry]) -> Self {
        Self {
            possession_pct: labelled_value(entries, POSSESSION_LABEL),
            total_shots: labelled_value(entries, SHOTS_LABEL),
            corners: labelled_value(entries, CORNERS_LABEL),
            attacks: labelled_value(entries, ATTACKS_LABEL),
            dangerous_attacks: labelled_value(entries, DANGEROUS_ATTACKS_LABEL),
            expected_goals: extract_expected_goals(entries),
        }
    }
}

impl From<&TeamStatistics> for StatSnapshot {
    fn from(stats: &TeamStatistics) -> Self {
        Self::from_entries(&stats.entries)
    }
}

/// Which of the tracked counters the provider actually reported. A missing
/// counter scores as 0 but is displayed as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatPresence {
    pub possession_pct: bool,
    pub total_shots: bool,
    pub corners: bool,
    pub attacks: bool,
    pub dangerous_attacks: bool,
}

impl StatPresence {
    pub fn from_entries(entries: &[StatEntry]) -> Self {
        let reported = |want: &str| {
            find_labelled(entries, want).is_some_and(|e| e.value.is_reported())
        };
        Self {
            possession_pct: reported(POSSESSION_LABEL),
            total_shots: reported(SHOTS_LABEL),
            corners: reported(CORNERS_LABEL),
            attacks: reported(ATTACKS_LABEL),
            dangerous_attacks: reported(DANGEROUS_ATTACKS_LABEL),
        }
    }
}

fn find_labelled<'a>(entries: &'a [StatEntry], want: &str) -> Option<&'a StatEntry> {
    entries
        .iter()
        .find(|e| e.label.trim().eq_ignore_ascii_case(want))
}

fn labelled_value(entries: &[StatEntry], want: &str) -> f64 {
    find_labelled(entries, want)
        .map(|e| e.value.as_f64())
        .unwrap_or(0.0)
}

/// Providers label expected goals inconsistently ("expected_goals", "xG",
/// "Expected Goals (xG)"), so take the first label that looks like one.
pub fn extract_expected_goals(entries: &[StatEntry]) -> f64 {
    entries
        .iter()
        .find(|e| {
            let key = e.label.to_lowercase();
            key.contains("xg") || (key.contains("expected") && key.contains("goal"))
        })
        .map(|e| e.value.as_f64())
        .unwrap_or(0.0)
}

impl StatDiffs {
    pub fn between(home: &StatSnapshot, away: &StatSnapshot) -> Self {
        Self {
            possession: home.possession_pct - away.possession_pct,
            shots: home.total_shots - away.total_shots,
            corners: home.corners - away.corners,
            attacks: home.attacks - away.attacks,
            dangerous_attacks: home.dangerous_attacks - away.dangerous_attacks,
            expected_goals: home.expected_goals - away.expected_goals,
        }
    }

    pub fn as_array(&self) -> [f64; 6] {
        [
            self.possession,
            self.shots,
            self.corners,
            self.attacks,
            self.dangerous_attacks,
            self.expected_goals,
        ]
    }

    /// Hand-tuned pressure score; positive favours home.
    pub fn weighted_score(&self) -> f64 {
        self.shots * W_SHOTS
            + self.possession * W_POSSESSION
            + self.corners * W_CORNERS
            + self.attacks * W_ATTACKS
            + self.dangerous_attacks * W_DANGEROUS_ATTACKS
            + self.expected_goals * W_XG
    }
}

/// Maps a pressure score onto a home/away split of 100.
pub fn win_probabilities(score: f64) -> (f64, f64) {
    let home = if score.is_finite() {
        (50.0 + score / 2.0).clamp(0.0, 100.0)
    } else {
        50.0
    };
    (home, 100.0 - home)
}

pub fn compute_live_assessment(home: &StatSnapshot, away: &StatSnapshot) -> LiveAssessment {
    let diffs = StatDiffs::between(home, away);
    let score = diffs.weighted_score();
    let (home_win_prob, away_win_prob) = win_probabilities(score);
    LiveAssessment {
        home_win_prob,
        away_win_prob,
        score,
        diffs,
        commentary: commentary::generate(&diffs),
    }
}
