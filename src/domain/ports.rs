use crate::domain::model::LineSequence;
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use std::path::Path;

pub trait Storage {
    fn is_file(&self, path: &Path) -> bool;
    fn read_lines(&self, path: &Path) -> std::io::Result<LineSequence>;
    /// Replaces `path` with `contents`; the previous file survives a failed write.
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()>;
}

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}
