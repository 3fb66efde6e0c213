use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::rules::DEFAULT_STONITH_AGENT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// crm_mon binary used to dump cluster status
    pub crm_mon: PathBuf,
    /// pcs binary used to read cluster properties
    pub pcs: PathBuf,
    /// Resource agent counted as a fencing device
    pub stonith_agent: String,
    /// Default log level (overridden by RUST_LOG and --debug)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crm_mon: PathBuf::from("/sbin/crm_mon"),
            pcs: PathBuf::from("/sbin/pcs"),
            stonith_agent: DEFAULT_STONITH_AGENT.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("could not determine config directory")?;
        Ok(config_dir.join("pcmk-health").join("config.yaml"))
    }
}

/// Load config from `path` (or the default location), then `PCMK_HEALTH_*`.
///
/// A missing file is not an error; defaults apply.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::path()?,
    };
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<Config> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Yaml::file(path))
        .merge(Env::prefixed("PCMK_HEALTH_"))
        .extract::<Config>()
        .with_context(|| format!("loading config from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "crm_mon: /usr/sbin/crm_mon\nstonith_agent: stonith:fence_xvm\n",
        )
        .unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.crm_mon, PathBuf::from("/usr/sbin/crm_mon"));
        assert_eq!(config.stonith_agent, "stonith:fence_xvm");
        assert_eq!(config.pcs, PathBuf::from("/sbin/pcs"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "crm_mon: [unterminated\n").unwrap();
        assert!(load_from(&path).is_err());
    }
}
