use crate::config::toml_config::TomlConfig;
use crate::core::source::resolve_path;
use crate::domain::model::{MarkerPolicy, Markers};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct, validate_marker_line, validate_non_empty_string, validate_path, Validate,
};
use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE: &str = "./js_build/build_formatted.js";
pub const DEFAULT_FALLBACK_SOURCE: &str = "./js_build/build.js";
pub const DEFAULT_TARGET: &str = "ka-build.html";
pub const DEFAULT_START_MARKER: &str = "<script type>(()=>{";
pub const DEFAULT_END_MARKER: &str = "})();</script>";
pub const DEFAULT_TIMESTAMP_PREFIX: &str = "Build Date/Time:";

/// Fully resolved settings for one run. Paths are anchored at the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceSettings {
    pub source: PathBuf,
    pub fallback_source: PathBuf,
    pub target: PathBuf,
    pub output: PathBuf,
    pub markers: Markers,
    pub policy: MarkerPolicy,
    pub dry_run: bool,
}

impl SpliceSettings {
    /// Fills unset values with the defaults and anchors paths at `base_dir`.
    pub fn resolve(base_dir: &Path, config: &TomlConfig) -> Self {
        let path = |value: &Option<PathBuf>, default: &str| {
            resolve_path(
                base_dir,
                value.as_deref().unwrap_or_else(|| Path::new(default)),
            )
        };

        let target = path(&config.paths.target, DEFAULT_TARGET);
        let output = config
            .paths
            .output
            .as_deref()
            .map(|p| resolve_path(base_dir, p))
            .unwrap_or_else(|| target.clone());

        let markers = &config.markers;
        let policy = if config.behavior.allow_missing_start_marker.unwrap_or(false) {
            MarkerPolicy::AllowMissingStart
        } else {
            MarkerPolicy::Strict
        };

        Self {
            source: path(&config.paths.source, DEFAULT_SOURCE),
            fallback_source: path(&config.paths.fallback_source, DEFAULT_FALLBACK_SOURCE),
            target,
            output,
            markers: Markers::new(
                markers.start.as_deref().unwrap_or(DEFAULT_START_MARKER),
                markers.end.as_deref().unwrap_or(DEFAULT_END_MARKER),
                markers
                    .timestamp_prefix
                    .as_deref()
                    .unwrap_or(DEFAULT_TIMESTAMP_PREFIX),
            ),
            policy,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Validate for SpliceSettings {
    fn validate(&self) -> Result<()> {
        validate_path("paths.source", &self.source)?;
        validate_path("paths.fallback_source", &self.fallback_source)?;
        validate_path("paths.target", &self.target)?;
        validate_path("paths.output", &self.output)?;

        validate_marker_line("markers.start", &self.markers.start)?;
        validate_marker_line("markers.end", &self.markers.end)?;
        validate_distinct("markers.end", &self.markers.start, &self.markers.end)?;
        validate_non_empty_string("markers.timestamp_prefix", &self.markers.timestamp_prefix)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SpliceError;

    #[test]
    fn test_defaults_match_khan_academy_build() {
        let settings = SpliceSettings::resolve(Path::new("/game"), &TomlConfig::default());

        assert_eq!(
            settings.source,
            PathBuf::from("/game/js_build/build_formatted.js")
        );
        assert_eq!(settings.fallback_source, PathBuf::from("/game/js_build/build.js"));
        assert_eq!(settings.target, PathBuf::from("/game/ka-build.html"));
        assert_eq!(settings.output, settings.target);
        assert_eq!(settings.markers.start, "<script type>(()=>{\n");
        assert_eq!(settings.markers.end, "})();</script>\n");
        assert_eq!(settings.markers.timestamp_prefix, "Build Date/Time:");
        assert_eq!(settings.policy, MarkerPolicy::Strict);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_resolve_from_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[paths]
target = "/abs/page.html"
output = "out/page.html"

[markers]
start = "BEGIN\n"

[behavior]
allow_missing_start_marker = true
"#,
        )
        .unwrap();

        let settings = SpliceSettings::resolve(Path::new("/game"), &config).with_dry_run(true);

        assert_eq!(settings.target, PathBuf::from("/abs/page.html"));
        assert_eq!(settings.output, PathBuf::from("/game/out/page.html"));
        assert_eq!(settings.markers.start, "BEGIN\n");
        assert_eq!(settings.policy, MarkerPolicy::AllowMissingStart);
        assert!(settings.dry_run);
    }

    #[test]
    fn test_validate_rejects_identical_markers() {
        let mut config = TomlConfig::default();
        config.markers.start = Some("X".to_string());
        config.markers.end = Some("X".to_string());

        let settings = SpliceSettings::resolve(Path::new("/game"), &config);

        assert!(matches!(
            settings.validate(),
            Err(SpliceError::InvalidConfigValueError { ref field, .. }) if field == "markers.end"
        ));
    }

    #[test]
    fn test_validate_rejects_blank_prefix() {
        let mut config = TomlConfig::default();
        config.markers.timestamp_prefix = Some("  ".to_string());

        let settings = SpliceSettings::resolve(Path::new("/game"), &config);

        assert!(settings.validate().is_err());
    }
}
