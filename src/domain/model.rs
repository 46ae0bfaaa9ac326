use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;

/// Lines of a text artifact, each keeping its original terminator.
pub type LineSequence = Vec<String>;

/// Exact full-line values that delimit the spliced region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
    pub timestamp_prefix: String,
}

impl Markers {
    /// Builds markers from bare text, appending the `\n` terminator lines are compared with.
    pub fn new(start: &str, end: &str, timestamp_prefix: &str) -> Self {
        Self {
            start: as_line(start),
            end: as_line(end),
            timestamp_prefix: timestamp_prefix.to_string(),
        }
    }
}

fn as_line(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}

/// What to do when the start marker never shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerPolicy {
    #[default]
    Strict,
    /// Keep the whole document as preamble and append the payload after it.
    AllowMissingStart,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceResolution {
    Primary { path: PathBuf },
    Fallback { path: PathBuf },
    NotFound { primary: PathBuf, fallback: PathBuf },
}

impl SourceResolution {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Primary { path } | Self::Fallback { path } => Some(path),
            Self::NotFound { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Summary of one splice run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub source: SourceResolution,
    pub target: PathBuf,
    pub output: PathBuf,
    pub built_at: NaiveDateTime,
    pub payload_lines: usize,
    pub preamble_lines: usize,
    pub discarded_lines: usize,
    pub remainder_lines: usize,
    pub timestamps_rewritten: usize,
    pub start_marker_found: bool,
    pub end_marker_found: bool,
    pub written: bool,
}
