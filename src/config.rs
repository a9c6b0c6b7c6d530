use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path, path::PathBuf};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_NOTES_FILE: &str = "data/notes.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_notes_file")]
    pub notes_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            notes_file: default_notes_file(),
        }
    }
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_notes_file() -> PathBuf {
    PathBuf::from(DEFAULT_NOTES_FILE)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse PORT '{value}': {source}")]
    Port {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

fn load_from_file(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;

    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

fn load_from_vars(
    port: Option<String>,
    notes_file: Option<String>,
) -> Result<Config, ConfigError> {
    let port = match port {
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|source| ConfigError::Port { value, source })?,
        None => DEFAULT_PORT,
    };

    let notes_file = notes_file.map_or_else(default_notes_file, PathBuf::from);

    Ok(Config { port, notes_file })
}

/// Loads the server config.
///
/// A YAML file at `$NOTES_CONFIG` (or `config.yaml`) wins when present.
/// Otherwise `PORT` and `NOTES_FILE` are read from the environment, with
/// defaults for whichever is unset.
pub fn load_config() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path = env::var("NOTES_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try config file
    if Path::new(&config_path).exists() {
        tracing::info!("Loading configuration from '{}'", config_path);
        return load_from_file(&config_path);
    }

    // Fallback to environment variables
    tracing::info!(
        "Config file '{}' not found, loading configuration from environment variables",
        config_path
    );
    load_from_vars(env::var("PORT").ok(), env::var("NOTES_FILE").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unset_vars_use_defaults() {
        let cfg = load_from_vars(None, None).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.notes_file, PathBuf::from("data/notes.json"));
    }

    #[test]
    fn vars_override_defaults() {
        let cfg = load_from_vars(Some("8080".into()), Some("/srv/notes.json".into())).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.notes_file, PathBuf::from("/srv/notes.json"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = load_from_vars(Some("eighty".into()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Port { .. }));
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn yaml_file_fills_missing_fields_with_defaults() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("config.yaml");
        fs::write(&path, "port: 9000\n").unwrap();

        let cfg = load_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.notes_file, PathBuf::from("data/notes.json"));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("config.yaml");
        fs::write(&path, "port: [not, a, number]\n").unwrap();

        let err = load_from_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
