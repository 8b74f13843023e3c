//! Run Configuration Module
//! Input/output paths for one pipeline run, loaded from a JSON file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Raw input dataset locations.
#[derive(Debug, Clone, Deserialize)]
pub struct InputData {
    pub productivity_file: PathBuf,
    pub mental_health_file: PathBuf,
}

/// Where cleaned datasets and artifacts are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputData {
    pub productivity_file: PathBuf,
    pub mental_health_file: PathBuf,
    pub figures_dir: PathBuf,
    pub report_file: PathBuf,
}

/// Pipeline configuration, mirrors the JSON config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub input_data: InputData,
    pub output_data: OutputData,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_parses_all_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "input_data": {{
                    "productivity_file": "in/prod.csv",
                    "mental_health_file": "in/mh.csv"
                }},
                "output_data": {{
                    "productivity_file": "out/prod.csv",
                    "mental_health_file": "out/mh.csv",
                    "figures_dir": "out/figures",
                    "report_file": "out/deck.pptx"
                }}
            }}"#
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.input_data.productivity_file, PathBuf::from("in/prod.csv"));
        assert_eq!(config.output_data.figures_dir, PathBuf::from("out/figures"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_bad_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
