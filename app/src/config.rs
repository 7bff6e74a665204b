use directories::ProjectDirs;
use log::{error, info, warn};
use numproc::DEFAULT_SERVICE_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "numproc.toml";

/// Which processor wraps the evaluator.
#[derive(clap::ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Plain,
    Count,
    Timing,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub service_url: String,
    pub timeout_secs: Option<u64>,
    pub mode: Mode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: None,
            mode: Mode::Plain,
        }
    }
}

impl AppConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn get_config_path() -> Option<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "numproc", "numproc") {
        let config_dir = proj_dirs.config_dir();
        if !config_dir.exists() {
            if let Err(e) = fs::create_dir_all(config_dir) {
                error!("Failed to create config directory: {}", e);
                return None;
            }
        }
        return Some(config_dir.join(CONFIG_FILE_NAME));
    }
    None
}

/// Writes `config` to `path`, or to the default location when `path` is `None`.
pub fn save_config(config: &AppConfig, path: Option<&Path>) {
    let Some(path) = path.map(Path::to_path_buf).or_else(get_config_path) else {
        return;
    };
    match toml::to_string_pretty(config) {
        Ok(toml_str) => {
            if let Err(e) = fs::write(&path, toml_str) {
                error!("Failed to write config file: {}", e);
            } else {
                info!("Config saved to {}", path.display());
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Reads the config from `path`, or from the default location when `path`
/// is `None`. Falls back to defaults when the file is missing or broken.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    if let Some(path) = path.map(Path::to_path_buf).or_else(get_config_path) {
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(toml_str) => match parse_config(&toml_str) {
                    Ok(config) => return config,
                    Err(e) => {
                        warn!("Failed to parse config file, using defaults: {}", e);
                    }
                },
                Err(e) => {
                    warn!("Failed to read config file, using defaults: {}", e);
                }
            }
        }
    }
    AppConfig::default()
}

fn parse_config(toml_str: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.service_url, "http://api.mathjs.org/v4/");
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config("mode = \"timing\"\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.mode, Mode::Timing);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(parse_config("mode = \"verbose\"").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("numproc-missing-config-test.toml");
        let _ = fs::remove_file(&path);
        assert_eq!(load_config(Some(path.as_path())), AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("numproc-config-{}.toml", std::process::id()));
        let config = AppConfig {
            service_url: "http://localhost:8080/".to_string(),
            timeout_secs: Some(3),
            mode: Mode::Count,
        };
        save_config(&config, Some(path.as_path()));
        assert_eq!(load_config(Some(path.as_path())), config);
        let _ = fs::remove_file(&path);
    }
}
