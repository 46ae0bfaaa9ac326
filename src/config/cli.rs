use crate::config::settings::SpliceSettings;
use crate::config::toml_config::{BehaviorConfig, MarkersConfig, PathsConfig, TomlConfig};
use crate::utils::error::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "ka-splice")]
#[command(about = "Splice a freshly compiled script into a previously generated HTML build")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory relative paths are resolved against (defaults to the config file's directory, then the current directory)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Compiled script to insert
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Script used when --source does not exist
    #[arg(long)]
    pub fallback_source: Option<PathBuf>,

    /// Previously generated document to splice into
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Where to write the result (defaults to --target)
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    pub start_marker: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub end_marker: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub timestamp_prefix: Option<String>,

    /// Append after the whole document instead of failing when the start marker is missing
    #[arg(long)]
    pub allow_missing_start_marker: bool,

    /// Compute the splice without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the build report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Values given on the command line, shaped as a config layer.
    pub fn overrides(&self) -> TomlConfig {
        TomlConfig {
            paths: PathsConfig {
                source: self.source.clone(),
                fallback_source: self.fallback_source.clone(),
                target: self.target.clone(),
                output: self.output.clone(),
            },
            markers: MarkersConfig {
                start: self.start_marker.clone(),
                end: self.end_marker.clone(),
                timestamp_prefix: self.timestamp_prefix.clone(),
            },
            behavior: BehaviorConfig {
                allow_missing_start_marker: self.allow_missing_start_marker.then_some(true),
            },
        }
    }

    pub fn file_config(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => TomlConfig::from_file(path),
            None => Ok(TomlConfig::default()),
        }
    }

    /// Absolute base directory for relative paths.
    pub fn base_dir(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir()?;
        let base = self.base_dir.as_deref().or_else(|| {
            self.config
                .as_deref()
                .and_then(Path::parent)
                .filter(|dir| !dir.as_os_str().is_empty())
        });

        Ok(match base {
            Some(dir) => cwd.join(dir),
            None => cwd,
        })
    }

    /// Merges defaults, the config file and command line flags, in that order.
    pub fn settings(&self) -> Result<SpliceSettings> {
        let merged = self.file_config()?.overlay(self.overrides());
        let base_dir = self.base_dir()?;
        tracing::debug!("resolving paths against {}", base_dir.display());

        Ok(SpliceSettings::resolve(&base_dir, &merged).with_dry_run(self.dry_run))
    }
}
