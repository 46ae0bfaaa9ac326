use crate::domain::model::{LineSequence, SourceResolution};
use crate::domain::ports::Storage;
use crate::utils::error::{SpliceError, Result};
use std::path::{Component, Path, PathBuf};

/// Anchors a relative `path` at `base` and drops `.` components.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    joined
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Splits text into lines that keep their terminators.
pub fn split_lines(text: &str) -> LineSequence {
    text.split_inclusive('\n').map(String::from).collect()
}

pub fn resolve_source(
    primary: &Path,
    fallback: &Path,
    is_file: impl Fn(&Path) -> bool,
) -> SourceResolution {
    if is_file(primary) {
        SourceResolution::Primary {
            path: primary.to_path_buf(),
        }
    } else if is_file(fallback) {
        SourceResolution::Fallback {
            path: fallback.to_path_buf(),
        }
    } else {
        SourceResolution::NotFound {
            primary: primary.to_path_buf(),
            fallback: fallback.to_path_buf(),
        }
    }
}

/// Reads the payload from `primary`, or from `fallback` when the primary is missing.
pub fn load_payload<S: Storage>(
    storage: &S,
    primary: &Path,
    fallback: &Path,
) -> Result<(SourceResolution, LineSequence)> {
    let resolution = resolve_source(primary, fallback, |path| storage.is_file(path));

    let path = match &resolution {
        SourceResolution::Primary { path } => path,
        SourceResolution::Fallback { path } => {
            tracing::warn!(
                "main js path {} does not exist, reverting to backup {}",
                primary.display(),
                path.display()
            );
            path
        }
        SourceResolution::NotFound { primary, fallback } => {
            return Err(SpliceError::MissingInput {
                primary: primary.clone(),
                fallback: fallback.clone(),
            });
        }
    };

    let lines = storage
        .read_lines(path)
        .map_err(|source| SpliceError::PayloadUnreadable {
            path: path.clone(),
            source,
        })?;
    tracing::debug!(path = %path.display(), lines = lines.len(), "payload loaded");

    Ok((resolution, lines))
}
