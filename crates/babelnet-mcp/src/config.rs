//! Credential and endpoint configuration.
//!
//! Settings are resolved once at startup and passed into backend
//! construction; nothing reads them ambiently afterwards. The API key comes
//! from, in order: the CLI flag (handled in `main`), the `BABELNET_API_KEY`
//! environment variable, or a `babelnet_conf.yml` file found via
//! `$BABELNET_CONF`, the working directory, or `~/.babelnet/`.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

const CONFIG_FILE_NAME: &str = "babelnet_conf.yml";

/// On-disk configuration file shape.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(rename = "RESTFUL_KEY")]
    pub restful_key: Option<String>,
    #[serde(rename = "RESTFUL_URL")]
    pub restful_url: Option<String>,
}

/// Resolved settings for backend construction.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Settings {
    /// Load settings from the config file (if any) and the environment.
    pub fn load() -> Self {
        let mut settings = Self::default();

        if let Some(path) = find_config_file() {
            match load_config_file(&path) {
                Ok(file) => {
                    if file.restful_key.is_some() {
                        info!("configuration loaded from {}", path.display());
                    } else {
                        warn!("no RESTFUL_KEY in {}", path.display());
                    }
                    settings.api_key = file.restful_key;
                    settings.base_url = file.restful_url;
                }
                Err(e) => warn!("failed to read {}: {}", path.display(), e),
            }
        }

        if settings.api_key.is_none() {
            settings.api_key = std::env::var("BABELNET_API_KEY").ok();
        }

        settings
    }
}

fn load_config_file(path: &PathBuf) -> anyhow::Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Search for the configuration file in the documented locations.
fn find_config_file() -> Option<PathBuf> {
    if let Some(env_path) = std::env::var_os("BABELNET_CONF") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Some(path);
        }
    }

    let cwd = PathBuf::from(CONFIG_FILE_NAME);
    if cwd.exists() {
        return Some(cwd);
    }

    let home = dirs::home_dir()?.join(".babelnet").join(CONFIG_FILE_NAME);
    if home.exists() {
        return Some(home);
    }

    None
}
