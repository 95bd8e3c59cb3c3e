//! Rule-based match commentary over live statistic differentials.

use crate::live_stats::StatDiffs;

pub const BALANCED_MATCH: &str = "The match is calm and low-tempo; play is broadly balanced.";

struct Rule {
    fires: fn(&StatDiffs) -> bool,
    message: &'static str,
}

// Order matters: sentences are emitted in table order. Each pair is exclusive
// because the thresholds are symmetric around zero.
const RULES: &[Rule] = &[
    Rule {
        fires: |d| d.dangerous_attacks > 5.0,
        message: "The home side is on top in dangerous attacks; a goal is getting more likely.",
    },
    Rule {
        fires: |d| d.dangerous_attacks < -5.0,
        message: "The away side is more productive in dangerous attacks.",
    },
    Rule {
        fires: |d| d.attacks > 10.0,
        message: "The home side is dominating in attack.",
    },
    Rule {
        fires: |d| d.attacks < -10.0,
        message: "The away side is building attacking pressure.",
    },
    Rule {
        fires: |d| d.expected_goals > 0.3,
        message: "The home side's xG is high; a goal can be expected.",
    },
    Rule {
        fires: |d| d.expected_goals < -0.3,
        message: "The away side's xG is high; a goal may come.",
    },
    Rule {
        fires: |d| d.shots > 3.0,
        message: "The home side is taking more shots.",
    },
    Rule {
        fires: |d| d.shots < -3.0,
        message: "The away side is taking more shots.",
    },
    Rule {
        fires: |d| d.possession > 10.0,
        message: "The home side is controlling the game.",
    },
    Rule {
        fires: |d| d.possession < -10.0,
        message: "The away side is seeing more of the ball.",
    },
    Rule {
        fires: |d| d.corners > 2.0,
        message: "The home side's corner count is climbing; they are applying pressure.",
    },
];

/// Returns every sentence whose rule fires, in rule order, or the single
/// balanced-match sentence when nothing fires or every differential is
/// below one in magnitude.
pub fn generate(diffs: &StatDiffs) -> Vec<String> {
    let fired: Vec<String> = RULES
        .iter()
        .filter(|rule| (rule.fires)(diffs))
        .map(|rule| rule.message.to_string())
        .collect();

    let quiet = diffs.as_array().iter().all(|d| d.abs() < 1.0);
    if fired.is_empty() || quiet {
        return vec![BALANCED_MATCH.to_string()];
    }
    fired
}
