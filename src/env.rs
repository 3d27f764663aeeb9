use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::links::{DEFAULT_BASE_URL, DEFAULT_ROOM_PREFIX, LinkGenerator};

pub fn load_environment() -> Result<(), dotenvy::Error> {
    let is_production =
        dotenvy::var("FITNESS_PROFILE").unwrap_or("development".to_string()) == "production";

    let env_files = if is_production {
        vec!["config/common.env", "config/prod.env", ".secrets.env"]
    } else {
        vec!["config/common.env", "config/dev.env", ".secrets.env"]
    };

    for env_file in env_files {
        load_env_file(env_file)?;
    }

    Ok(())
}

fn load_env_file(path: &str) -> Result<(), dotenvy::Error> {
    if !Path::new(path).exists() {
        warn!("Environment file {} not found, skipping", path);
        return Ok(());
    }

    dotenvy::from_filename_override(path)?;
    info!("Loaded environment from: {}", path);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub meet_base_url: String,
    pub room_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            meet_base_url: DEFAULT_BASE_URL.to_string(),
            room_prefix: DEFAULT_ROOM_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Read settings from the process environment, falling back to defaults
    /// for anything unset or empty.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |key: &str| dotenvy::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            data_dir: var("FITNESS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            meet_base_url: var("FITNESS_MEET_BASE_URL").unwrap_or(defaults.meet_base_url),
            room_prefix: var("FITNESS_ROOM_PREFIX").unwrap_or(defaults.room_prefix),
        }
    }

    pub fn link_generator(&self) -> LinkGenerator {
        LinkGenerator::new(&self.meet_base_url, &self.room_prefix)
    }
}
