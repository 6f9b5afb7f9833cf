//! Floorplan replay shell.
//!
//! Loads a layout and an editing script, drives a [`floorplan_core::FloorEditor`]
//! through the script, and saves the result.

pub mod replay;
pub mod script;

pub use replay::{Replay, ReplayError, Summary};
pub use script::{ElementRef, Step, parse_script};

use floorplan_core::{EditorConfig, FloorCanvas};
use std::path::{Path, PathBuf};

/// Command line usage.
pub const USAGE: &str = "floorplan-replay <layout.json> <script.json> [--config <cfg.json>] [--out <dir>]";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub layout: PathBuf,
    pub script: PathBuf,
    pub config: Option<PathBuf>,
    /// Directory for saved layouts.
    pub out: Option<PathBuf>,
}

impl Args {
    /// Parse arguments (without the program name).
    pub fn parse<I>(args: I) -> Result<Self, ReplayError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut positional = Vec::new();
        let mut config = None;
        let mut out = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => config = Some(flag_value(&mut args, "--config")?),
                "--out" => out = Some(flag_value(&mut args, "--out")?),
                flag if flag.starts_with("--") => {
                    return Err(ReplayError::Usage(format!("unknown flag {flag}\n{USAGE}")));
                }
                _ => positional.push(PathBuf::from(&arg)),
            }
        }

        let mut positional = positional.into_iter();
        match (positional.next(), positional.next(), positional.next()) {
            (Some(layout), Some(script), None) => Ok(Self {
                layout,
                script,
                config,
                out,
            }),
            _ => Err(ReplayError::Usage(USAGE.to_string())),
        }
    }
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<PathBuf, ReplayError> {
    args.next()
        .map(PathBuf::from)
        .ok_or_else(|| ReplayError::Usage(format!("{flag} needs a value\n{USAGE}")))
}

fn read(path: &Path) -> Result<String, ReplayError> {
    std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read a layout file.
pub fn load_layout(path: &Path) -> Result<FloorCanvas, ReplayError> {
    FloorCanvas::from_json(&read(path)?).map_err(|source| ReplayError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Read a script file.
pub fn load_script(path: &Path) -> Result<Vec<Step>, ReplayError> {
    parse_script(&read(path)?).map_err(|source| ReplayError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Read the config file if one was given, else use the defaults.
pub fn load_config(path: Option<&Path>) -> Result<EditorConfig, ReplayError> {
    match path {
        Some(path) => Ok(EditorConfig::from_file(path)?),
        None => Ok(EditorConfig::default()),
    }
}
