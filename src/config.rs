//! Engine configuration.
//!
//! Loaded from a JSON file named on the command line, or left at defaults.
//! Individual fields can be changed at runtime with `setoption`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::search::TraceSettings;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Runtime settings for the query engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log a condensed path map after every expansion round.
    pub trace_path_map: bool,
    /// Rows per character of the condensed path map.
    pub trace_zoom_rows: usize,
    /// Columns per character of the condensed path map.
    pub trace_zoom_cols: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            trace_path_map: false,
            trace_zoom_rows: 1,
            trace_zoom_cols: 1,
        }
    }
}

impl EngineConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Applies `setoption name <name> value <value>`. A missing value
    /// turns a boolean option on.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.unwrap_or_default().to_string(),
        };
        match name.to_ascii_lowercase().as_str() {
            "tracepathmap" => {
                self.trace_path_map = match value {
                    None => true,
                    Some(v) => v.parse().map_err(|_| invalid())?,
                };
            }
            "tracezoomrows" => self.trace_zoom_rows = parse_zoom(value).ok_or_else(invalid)?,
            "tracezoomcols" => self.trace_zoom_cols = parse_zoom(value).ok_or_else(invalid)?,
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    pub fn trace_settings(&self) -> TraceSettings {
        TraceSettings {
            enabled: self.trace_path_map,
            zoom_rows: self.trace_zoom_rows,
            zoom_cols: self.trace_zoom_cols,
        }
    }
}

fn parse_zoom(value: Option<&str>) -> Option<usize> {
    value?.parse().ok().filter(|&z| z > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = EngineConfig::from_json(r#"{"trace_zoom_rows": 3}"#).unwrap();
        assert_eq!(config.trace_zoom_rows, 3);
        assert_eq!(config.trace_zoom_cols, 1);
        assert!(!config.trace_path_map);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(EngineConfig::from_json("{"), Err(ConfigError::Json(_))));
        assert!(matches!(
            EngineConfig::from_json(r#"{"trace_zoom_rows": "many"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = EngineConfig::load("/nonexistent/wavefront.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn set_option_updates_fields() {
        let mut config = EngineConfig::default();
        config.set_option("TracePathMap", None).unwrap();
        config.set_option("TraceZoomCols", Some("4")).unwrap();
        assert!(config.trace_path_map);
        assert_eq!(config.trace_settings().zoom_cols, 4);

        config.set_option("TracePathMap", Some("false")).unwrap();
        assert!(!config.trace_path_map);
    }

    #[test]
    fn set_option_rejects_bad_input() {
        let mut config = EngineConfig::default();
        assert!(matches!(
            config.set_option("Hash", Some("16")),
            Err(ConfigError::UnknownOption(_))
        ));
        assert!(matches!(
            config.set_option("TraceZoomRows", Some("0")),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set_option("TracePathMap", Some("maybe")),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
