use std::fmt::Write;

use crate::analysis::{LiveOutcome, LiveReport, PrematchReport};
use crate::form::TeamForm;

pub fn prematch_text(report: &PrematchReport) -> String {
    let p = &report.probabilities;
    let s = &p.summary;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Form (home {}):  {}",
        report.home_team_id,
        form_line(&report.home_form)
    );
    let _ = writeln!(
        out,
        "Form (away {}):  {}",
        report.away_team_id,
        form_line(&report.away_form)
    );
    let _ = writeln!(
        out,
        "Expected goals: home {:.2}  away {:.2}",
        p.rates.lambda_home, p.rates.lambda_away
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Home win (1):  {:>5.1}%", s.p_home_win * 100.0);
    let _ = writeln!(out, "Draw (X):      {:>5.1}%", s.p_draw * 100.0);
    let _ = writeln!(out, "Away win (2):  {:>5.1}%", s.p_away_win * 100.0);
    let _ = writeln!(out, "Over 2.5:      {:>5.1}%", s.p_over_2_5 * 100.0);
    let _ = writeln!(out, "Under 2.5:     {:>5.1}%", s.p_under_2_5 * 100.0);
    let _ = writeln!(out, "BTTS yes:      {:>5.1}%", s.p_btts * 100.0);
    let _ = writeln!(out, "BTTS no:       {:>5.1}%", s.p_no_btts * 100.0);

    let (h, a, prob) = p.matrix.most_likely();
    let _ = writeln!(out, "Most likely score: {h}-{a} ({:.1}%)", prob * 100.0);
    out
}

fn form_line(form: &TeamForm) -> String {
    format!(
        "W{} D{} L{}  GF {:.2}  GA {:.2}",
        form.wins, form.draws, form.losses, form.avg_goals_for, form.avg_goals_against
    )
}

pub fn live_text(outcome: &LiveOutcome) -> String {
    match outcome {
        LiveOutcome::Ready(report) => live_report_text(report),
        LiveOutcome::Unavailable { fixture, blocks } => {
            let mut out = String::new();
            if let Some(f) = fixture {
                let _ = writeln!(out, "{}", f.label());
            }
            let _ = writeln!(
                out,
                "Live statistics unavailable ({blocks} of 2 team blocks received)."
            );
            out
        }
    }
}

fn live_report_text(report: &LiveReport) -> String {
    let mut out = String::new();
    if let Some(f) = &report.fixture {
        let _ = writeln!(
            out,
            "Minute {}: {} {} - {} {}",
            f.elapsed,
            f.home.name,
            score_cell(f.home_goals),
            score_cell(f.away_goals),
            f.away.name
        );
    }

    let (h, a) = (&report.home.stats, &report.away.stats);
    let (hr, ar) = (&report.home.reported, &report.away.reported);
    let _ = writeln!(
        out,
        "{:<20} {:>10} {:>10}",
        "", report.home.team_name, report.away.team_name
    );
    let rows = [
        (
            "Possession %",
            stat_cell(h.possession_pct, hr.possession_pct),
            stat_cell(a.possession_pct, ar.possession_pct),
        ),
        (
            "Total shots",
            stat_cell(h.total_shots, hr.total_shots),
            stat_cell(a.total_shots, ar.total_shots),
        ),
        (
            "Corners",
            stat_cell(h.corners, hr.corners),
            stat_cell(a.corners, ar.corners),
        ),
        (
            "Attacks",
            stat_cell(h.attacks, hr.attacks),
            stat_cell(a.attacks, ar.attacks),
        ),
        (
            "Dangerous attacks",
            stat_cell(h.dangerous_attacks, hr.dangerous_attacks),
            stat_cell(a.dangerous_attacks, ar.dangerous_attacks),
        ),
    ];
    for (label, hv, av) in rows {
        let _ = writeln!(out, "{label:<20} {hv:>10} {av:>10}");
    }
    let _ = writeln!(
        out,
        "{:<20} {:>10} {:>10}",
        "xG",
        xg_cell(h.expected_goals),
        xg_cell(a.expected_goals)
    );

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Edge: {} {:.1}%  {} {:.1}%",
        report.home.team_name,
        report.assessment.home_win_prob,
        report.away.team_name,
        report.assessment.away_win_prob
    );
    let _ = writeln!(out, "Commentary: {}", report.assessment.commentary.join(" "));
    out
}

fn score_cell(goals: Option<u32>) -> String {
    goals.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string())
}

fn stat_cell(value: f64, reported: bool) -> String {
    if reported {
        value.to_string()
    } else {
        "n/a".to_string()
    }
}

// Zero xG almost always means the provider did not report it.
fn xg_cell(xg: f64) -> String {
    if xg > 0.0 {
        format!("{xg:.2}")
    } else {
        "n/a".to_string()
    }
}
