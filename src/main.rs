use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use tracing::info;

use pitchcast::analysis::{LiveOutcome, analyze_live, analyze_prematch};
use pitchcast::api_football::ApiFootball;
use pitchcast::config::Config;
use pitchcast::logging::init_tracing;
use pitchcast::provider::MatchDataProvider;
use pitchcast::render;

const USAGE: &str = "\
usage:
  pitchcast prematch <home_team_id> <away_team_id> [--last N] [--json]
  pitchcast live [<fixture_id>] [--json]";

#[derive(Debug, PartialEq)]
enum Command {
    Prematch {
        home: u32,
        away: u32,
        last: Option<u32>,
        json: bool,
    },
    LiveList,
    Live {
        fixture_id: u64,
        json: bool,
    },
}

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cmd = match parse_args(&args) {
        Ok(cmd) => cmd,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    if let Err(err) = run(cmd, &Config::from_env()) {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cmd: Command, cfg: &Config) -> Result<()> {
    let provider = ApiFootball::from_config(cfg)?;
    match cmd {
        Command::Prematch {
            home,
            away,
            last,
            json,
        } => {
            let last_n = last.unwrap_or(cfg.form_last_n);
            info!(home, away, last_n, "pre-match analysis");
            let report = analyze_prematch(&provider, home, away, last_n, cfg.max_goals)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::prematch_text(&report));
            }
        }
        Command::LiveList => {
            let fixtures = provider.live_fixtures()?;
            if fixtures.is_empty() {
                println!("No live matches right now.");
            }
            for f in fixtures {
                println!("{:>10}  {}'  {}", f.fixture_id, f.elapsed, f.label());
            }
        }
        Command::Live { fixture_id, json } => {
            info!(fixture_id, "live analysis");
            let outcome = analyze_live(&provider, fixture_id)?;
            if let LiveOutcome::Unavailable { blocks, .. } = &outcome {
                info!(blocks, "live statistics incomplete");
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render::live_text(&outcome));
            }
        }
    }
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Command> {
    let json = args.iter().any(|a| a == "--json");
    let mut last = None;
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--json" {
            continue;
        }
        if let Some(v) = arg.strip_prefix("--last=") {
            last = Some(parse_last(v)?);
            continue;
        }
        if arg == "--last" {
            let v = iter.next().context("--last needs a value")?;
            last = Some(parse_last(v)?);
            continue;
        }
        if arg.starts_with("--") {
            bail!("unknown flag {arg}");
        }
        positional.push(arg.as_str());
    }

    match positional.as_slice() {
        ["prematch", home, away] => Ok(Command::Prematch {
            home: home.parse().with_context(|| format!("invalid team id {home}"))?,
            away: away.parse().with_context(|| format!("invalid team id {away}"))?,
            last,
            json,
        }),
        ["live"] => Ok(Command::LiveList),
        ["live", id] => Ok(Command::Live {
            fixture_id: id.parse().with_context(|| format!("invalid fixture id {id}"))?,
            json,
        }),
        [] => bail!("missing command"),
        _ => bail!("unrecognised arguments"),
    }
}

fn parse_last(v: &str) -> Result<u32> {
    let n: u32 = v.trim().parse().with_context(|| format!("invalid --last {v}"))?;
    if n == 0 {
        bail!("--last must be at least 1");
    }
    Ok(n)
}
