//! Configuration for racr
//!
//! YAML config with a fallback chain: explicit path, then
//! `~/.config/racr/racr.yml`, then `./racr.yml`, then defaults.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub race: RaceSection,
    pub runner: RunnerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceSection {
    /// Worker count; defaults to available CPU parallelism when unset
    pub workers: Option<usize>,
    /// Drain bound after the race ends, in milliseconds
    pub grace_ms: u64,
    /// Optional per-worker attempt budget
    pub max_attempts: Option<u64>,
}

impl Default for RaceSection {
    fn default() -> Self {
        Self {
            workers: None,
            grace_ms: 5000,
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerSection {
    /// Command line to race; the target is appended as its last argument
    pub command: Option<String>,
    /// Optional per-attempt timeout in milliseconds
    pub timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            race: RaceSection::default(),
            runner: RunnerSection::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir
                .join(project_name)
                .join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!(
                            "Failed to load config from {}: {}",
                            primary_config.display(),
                            e
                        );
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!(
                        "Failed to load config from {}: {}",
                        fallback_config.display(),
                        e
                    );
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level.as_deref(), Some("info"));
        assert!(config.race.workers.is_none());
        assert_eq!(config.race.grace_ms, 5000);
        assert!(config.race.max_attempts.is_none());
        assert!(config.runner.command.is_none());
        assert!(config.runner.timeout_ms.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
log_level: debug
race:
  workers: 4
  grace_ms: 1000
  max_attempts: 500
runner:
  command: "npx tsx level_finder.test.ts"
  timeout_ms: 60000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.race.workers, Some(4));
        assert_eq!(config.race.grace_ms, 1000);
        assert_eq!(config.race.max_attempts, Some(500));
        assert_eq!(
            config.runner.command.as_deref(),
            Some("npx tsx level_finder.test.ts")
        );
        assert_eq!(config.runner.timeout_ms, Some(60000));
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let yaml = r#"
race:
  workers: 2
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.race.workers, Some(2));
        assert_eq!(config.race.grace_ms, 5000);
        assert!(config.runner.command.is_none());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("racr.yml");
        std::fs::write(&path, "race:\n  workers: 3\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.race.workers, Some(3));
    }

    #[test]
    fn test_load_explicit_missing_path_errors() {
        let path = PathBuf::from("/nonexistent/racr.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_explicit_invalid_yaml_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("racr.yml");
        std::fs::write(&path, "race: [not, a, mapping\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let restored: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(restored.race.grace_ms, config.race.grace_ms);
        assert_eq!(restored.log_level, config.log_level);
    }
}
