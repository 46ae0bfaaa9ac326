use crate::config::settings::SpliceSettings;
use crate::core::source::load_payload;
use crate::core::splicer::{format_timestamp, splice};
use crate::domain::model::BuildReport;
use crate::domain::ports::{Clock, Storage};
use crate::utils::error::{SpliceError, Result};

/// Runs one splice: load the new code, load the previous build, replace, write.
pub struct BuildEngine<S: Storage, C: Clock> {
    storage: S,
    clock: C,
}

impl<S: Storage, C: Clock> BuildEngine<S, C> {
    pub fn new(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn run(&self, settings: &SpliceSettings) -> Result<BuildReport> {
        tracing::info!("loading new code...");
        let (source, payload) =
            load_payload(&self.storage, &settings.source, &settings.fallback_source)?;

        tracing::info!("loading previous build...");
        let document = self
            .storage
            .read_lines(&settings.target)
            .map_err(|source| SpliceError::MissingTarget {
                path: settings.target.clone(),
                source,
            })?;

        tracing::info!("removing old code...");
        let built_at = self.clock.now();
        let stamp = format_timestamp(built_at);
        let spliced = splice(
            &document,
            &payload,
            &settings.markers,
            settings.policy,
            &stamp,
        )?;
        tracing::debug!(
            discarded = spliced.stats.discarded_lines,
            inserted = payload.len(),
            "old code replaced"
        );

        if settings.dry_run {
            tracing::info!(
                "dry run, leaving {} untouched",
                settings.output.display()
            );
        } else {
            tracing::info!("writing new code...");
            self.storage.write_atomic(&settings.output, &spliced.text)?;
        }

        tracing::info!("build complete!");

        let stats = spliced.stats;
        Ok(BuildReport {
            source,
            target: settings.target.clone(),
            output: settings.output.clone(),
            built_at,
            payload_lines: payload.len(),
            preamble_lines: stats.preamble_lines,
            discarded_lines: stats.discarded_lines,
            remainder_lines: stats.remainder_lines,
            timestamps_rewritten: stats.timestamps_rewritten,
            start_marker_found: stats.start_marker_found,
            end_marker_found: stats.end_marker_found,
            written: !settings.dry_run,
        })
    }
}
