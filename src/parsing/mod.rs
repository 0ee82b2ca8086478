pub mod config;

pub use config::{Config, Domain, SweepSettings, TOMLConfig, TOMLSweepSettings};

use std::fs;
use std::path::Path;

use anyhow::Context;

pub fn get_settings<P: AsRef<Path>>(filepath: P) -> anyhow::Result<TOMLConfig> {
    let filepath = filepath.as_ref();
    info!("loading config file at {}", filepath.to_string_lossy());
    let input = fs::read_to_string(filepath)
        .with_context(|| format!("failed to read config file {}", filepath.display()))?;

    let settings: TOMLConfig = toml::from_str(&input)
        .with_context(|| format!("failed to parse config file {}", filepath.display()))?;
    Ok(settings)
}

/// Loads and resolves a config file, or the defaults when no file is given.
pub fn get_config<P: AsRef<Path>>(filepath: Option<P>) -> anyhow::Result<Config> {
    match filepath {
        Some(path) => Ok(Config::from(get_settings(path)?)),
        None => Ok(Config::default()),
    }
}
