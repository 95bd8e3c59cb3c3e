use serde::Serialize;

use crate::form::{GoalRates, TeamForm, goal_rates};

pub const DEFAULT_MAX_GOALS: u32 = 6;
/// Largest goal cap accepted from configuration or replay files.
pub const MAX_GOALS_LIMIT: u32 = 15;

/// Joint scoreline probabilities for two independent Poisson goal counts.
///
/// Goals above `max_goals` are dropped rather than folded into the last row
/// and column, so the grid sums to slightly less than one. The shortfall grows
/// with the rates and shrinks as `max_goals` grows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorelineMatrix {
    max_goals: u32,
    cells: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeSummary {
    pub p_home_win: f64,
    pub p_draw: f64,
    pub p_away_win: f64,
    pub p_over_2_5: f64,
    pub p_under_2_5: f64,
    pub p_btts: f64,
    pub p_no_btts: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchProbabilities {
    pub rates: GoalRates,
    pub matrix: ScorelineMatrix,
    pub summary: OutcomeSummary,
}

pub fn compute_match_probabilities(
    home: &TeamForm,
    away: &TeamForm,
    max_goals: u32,
) -> MatchProbabilities {
    let rates = goal_rates(home, away);
    let matrix = ScorelineMatrix::new(rates.lambda_home, rates.lambda_away, max_goals);
    let summary = OutcomeSummary::from_matrix(&matrix);
    MatchProbabilities {
        rates,
        matrix,
        summary,
    }
}

impl ScorelineMatrix {
    /// Allocates `(max_goals + 1)²` cells, so callers taking the cap from
    /// outside input should bound it by [`MAX_GOALS_LIMIT`] first.
    pub fn new(lambda_home: f64, lambda_away: f64, max_goals: u32) -> Self {
        let pmf_h = poisson_pmf(lambda_home, max_goals);
        let pmf_a = poisson_pmf(lambda_away, max_goals);

        let mut cells = Vec::with_capacity(pmf_h.len() * pmf_a.len());
        for p_i in &pmf_h {
            for p_j in &pmf_a {
                cells.push(p_i * p_j);
            }
        }
        Self { max_goals, cells }
    }

    pub fn max_goals(&self) -> u32 {
        self.max_goals
    }

    fn side(&self) -> usize {
        self.max_goals as usize + 1
    }

    /// P(home scores `home` and away scores `away`); zero outside the grid.
    pub fn get(&self, home: u32, away: u32) -> f64 {
        if home > self.max_goals || away > self.max_goals {
            return 0.0;
        }
        self.cells[home as usize * self.side() + away as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        let side = self.side();
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, p)| ((idx / side) as u32, (idx % side) as u32, *p))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks(self.side())
    }

    pub fn total_mass(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Modal scoreline. Ties resolve to the lowest home, then away, count.
    pub fn most_likely(&self) -> (u32, u32, f64) {
        let mut best = (0, 0, f64::MIN);
        for (i, j, p) in self.iter() {
            if p > best.2 {
                best = (i, j, p);
            }
        }
        best
    }
}

impl OutcomeSummary {
    pub fn from_matrix(matrix: &ScorelineMatrix) -> Self {
        let mut p_home_win = 0.0;
        let mut p_draw = 0.0;
        let mut p_away_win = 0.0;
        let mut p_over_2_5 = 0.0;
        let mut p_btts = 0.0;

        for (i, j, p) in matrix.iter() {
            if i > j {
                p_home_win += p;
            } else if i == j {
                p_draw += p;
            } else {
                p_away_win += p;
            }
            if i + j >= 3 {
                p_over_2_5 += p;
            }
            if i >= 1 && j >= 1 {
                p_btts += p;
            }
        }

        Self {
            p_home_win,
            p_draw,
            p_away_win,
            p_over_2_5,
            p_under_2_5: 1.0 - p_over_2_5,
            p_btts,
            p_no_btts: 1.0 - p_btts,
        }
    }
}

/// P(X = k) for k in `0..=max_k`, built by the recurrence p(k) = p(k-1)·λ/k.
pub fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let lambda = if lambda.is_finite() { lambda.max(0.0) } else { 0.0 };
    let mut out = Vec::with_capacity(max_k as usize + 1);
    let mut p = (-lambda).exp();
    out.push(p);
    for k in 1..=max_k {
        p = p * lambda / k as f64;
        out.push(p);
    }
    out
}
