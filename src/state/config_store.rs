//! ConfigStore - Lab Configuration Persistence
//!
//! `LabConfig` lives as TOML at `<config dir>/listlab.toml`. An empty or
//! missing file yields defaults.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::domain::LabConfig;
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;

const CONFIG_FILE: &str = "listlab.toml";

/// Path of the config file, created empty if missing
pub fn get_config_path() -> Result<PathBuf> {
    let path = get_or_create_config_dir()?.join(CONFIG_FILE);
    if !path.exists() {
        fs::write(&path, "")?;
    }
    Ok(path)
}

/// Load config from the default location
pub fn load_config() -> Result<LabConfig> {
    load_config_from(&get_config_path()?)
}

/// Load and validate config from `path`
pub fn load_config_from(path: &Path) -> Result<LabConfig> {
    info!(path = ?path, "Loading config file");
    let value = match fs::read_to_string(path) {
        Ok(value) => value,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(LabConfig::default()),
        Err(e) => return Err(e.into()),
    };

    if value.trim().is_empty() {
        return Ok(LabConfig::default());
    }

    let config: LabConfig = toml::from_str(&value).map_err(|e| {
        error!(error = %e, path = ?path, "Failed to parse config file");
        e
    })?;
    config.validate()?;
    Ok(config)
}

/// Write `config` to the default location if the file there is still blank
pub fn seed_config(config: &LabConfig) -> Result<bool> {
    seed_config_to(&get_config_path()?, config)
}

/// Write `config` to `path` when it is missing or blank; returns whether it wrote
pub fn seed_config_to(path: &Path, config: &LabConfig) -> Result<bool> {
    let blank = match fs::read_to_string(path) {
        Ok(value) => value.trim().is_empty(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
        Err(e) => return Err(e.into()),
    };
    if blank {
        save_config_to(path, config)?;
    }
    Ok(blank)
}

pub fn save_config_to(path: &Path, config: &LabConfig) -> Result<()> {
    config.validate()?;
    let value = toml::to_string(config)?;
    fs::write(path, value)?;
    info!(path = ?path, "Config saved");
    Ok(())
}
