use circulation::max_flow::{allocate_with, AllocationError, AllocationRules};
use serde::Deserialize;
use thiserror::Error;

/// Problem instance read from a JSON file
///
/// ```json
/// { "preferences": [[0], [0, 1]], "eligible": [1], "rules": { "bucket_size": 5 } }
/// ```
#[derive(Debug, Deserialize)]
struct Instance {
    preferences: Vec<Vec<usize>>,
    #[serde(default)]
    eligible: Vec<usize>,
    #[serde(default)]
    rules: AllocationRules,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: circulation <instance.json>")]
    Usage,
    #[error("cannot read instance: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse instance: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

fn run() -> Result<(), CliError> {
    let path = std::env::args().nth(1).ok_or(CliError::Usage)?;
    let text = std::fs::read_to_string(&path)?;
    let instance: Instance = serde_json::from_str(&text)?;
    log::info!(
        "{}: {} entities, {} eligible",
        path,
        instance.preferences.len(),
        instance.eligible.len()
    );

    let allocation = allocate_with(&instance.preferences, &instance.eligible, &instance.rules)?;
    println!("{}", serde_json::to_string(&allocation)?);
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
