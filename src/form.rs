use serde::{Deserialize, Serialize};

/// Floor applied to both expected-goal rates so a team with no history never
/// produces a zero-rate Poisson distribution.
pub const MIN_GOAL_RATE: f64 = 0.2;
pub const HOME_ADVANTAGE: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureResult {
    pub home_team_id: u32,
    pub away_team_id: u32,
    #[serde(default)]
    pub home_goals: Option<u32>,
    #[serde(default)]
    pub away_goals: Option<u32>,
}

impl FixtureResult {
    /// A fixture with neither score reported has not been played yet.
    pub fn is_unplayed(&self) -> bool {
        self.home_goals.is_none() && self.away_goals.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamForm {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub played: u32,
    pub avg_goals_for: f64,
    pub avg_goals_against: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalRates {
    pub lambda_home: f64,
    pub lambda_away: f64,
}

/// Summarises a team's recent results from its own perspective.
///
/// Unplayed fixtures are skipped, but the averages are still taken over every
/// fixture passed in, so a half-played list pulls the averages down.
pub fn team_form(fixtures: &[FixtureResult], team_id: u32) -> TeamForm {
    let mut form = TeamForm::default();
    let mut goals_for = 0u64;
    let mut goals_against = 0u64;

    for f in fixtures {
        if f.is_unplayed() {
            continue;
        }
        let is_home = f.home_team_id == team_id;
        let (gf, ga) = if is_home {
            (f.home_goals, f.away_goals)
        } else {
            (f.away_goals, f.home_goals)
        };
        let gf = gf.unwrap_or(0);
        let ga = ga.unwrap_or(0);

        goals_for += gf as u64;
        goals_against += ga as u64;
        form.played += 1;
        if gf > ga {
            form.wins += 1;
        } else if gf == ga {
            form.draws += 1;
        } else {
            form.losses += 1;
        }
    }

    let n = fixtures.len().max(1) as f64;
    form.avg_goals_for = goals_for as f64 / n;
    form.avg_goals_against = goals_against as f64 / n;
    form
}

/// Blends each side's attack with the opponent's defence; the home rate gets
/// the home-advantage multiplier after the floor is applied.
pub fn goal_rates(home: &TeamForm, away: &TeamForm) -> GoalRates {
    let lambda_home =
        ((home.avg_goals_for + away.avg_goals_against) / 2.0).max(MIN_GOAL_RATE) * HOME_ADVANTAGE;
    let lambda_away = ((away.avg_goals_for + home.avg_goals_against) / 2.0).max(MIN_GOAL_RATE);
    GoalRates {
        lambda_home,
        lambda_away,
    }
}
