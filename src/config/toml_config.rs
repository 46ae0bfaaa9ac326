use crate::utils::error::{SpliceError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional `ka-splice.toml` contents. Every field may be left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub markers: MarkersConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    pub source: Option<PathBuf>,
    pub fallback_source: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkersConfig {
    pub start: Option<String>,
    pub end: Option<String>,
    pub timestamp_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    pub allow_missing_start_marker: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| SpliceError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SpliceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${JS_BUILD_DIR})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SpliceError::ConfigError {
            message: format!("environment pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Layers `overrides` on top of `self`; values set in `overrides` win.
    pub fn overlay(self, overrides: TomlConfig) -> TomlConfig {
        TomlConfig {
            paths: PathsConfig {
                source: overrides.paths.source.or(self.paths.source),
                fallback_source: overrides.paths.fallback_source.or(self.paths.fallback_source),
                target: overrides.paths.target.or(self.paths.target),
                output: overrides.paths.output.or(self.paths.output),
            },
            markers: MarkersConfig {
                start: overrides.markers.start.or(self.markers.start),
                end: overrides.markers.end.or(self.markers.end),
                timestamp_prefix: overrides
                    .markers
                    .timestamp_prefix
                    .or(self.markers.timestamp_prefix),
            },
            behavior: BehaviorConfig {
                allow_missing_start_marker: overrides
                    .behavior
                    .allow_missing_start_marker
                    .or(self.behavior.allow_missing_start_marker),
            },
        }
    }
}
