//! Replay an editing script against a floor layout.

use floorplan_app::{Args, Replay, ReplayError, load_config, load_layout, load_script};
use floorplan_core::{FileStorage, FloorEditor};
use std::process::ExitCode;

fn run(args: Args) -> Result<(), ReplayError> {
    let config = load_config(args.config.as_deref())?;
    let layout = load_layout(&args.layout)?;
    let steps = load_script(&args.script)?;
    log::info!("replaying {} steps on {}", steps.len(), layout.venue_id);

    let storage = match &args.out {
        Some(dir) => Some(FileStorage::new(dir.as_path())?),
        None => None,
    };

    let mut replay = Replay::new(FloorEditor::new(layout, config));
    if let Some(storage) = &storage {
        replay = replay.with_storage(storage);
    }

    let result = replay.run(&steps);
    for summary in replay.saves() {
        println!("saved: {summary}");
    }
    let summary = result?;
    println!("final: {summary}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("replay failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
