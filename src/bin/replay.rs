use std::path::PathBuf;

use anyhow::Result;

use pitchcast::logging::init_tracing;
use pitchcast::replay::ReplayCase;

fn main() -> Result<()> {
    init_tracing();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/replay_case.json"));

    let case = ReplayCase::from_file(&path)?;
    print!("{}", case.to_text());
    Ok(())
}
