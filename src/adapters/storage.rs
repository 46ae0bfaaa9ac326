use crate::core::source::split_lines;
use crate::domain::model::LineSequence;
use crate::domain::ports::Storage;
use crate::utils::error::{SpliceError, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

/// `<path>.tmp` next to the destination, so the final rename stays on one filesystem.
fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
    let mut name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"))?
        .to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}

fn write_then_rename(temp_path: &Path, path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(temp_path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    drop(file);

    fs::rename(temp_path, path)
}

impl Storage for LocalStorage {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_lines(&self, path: &Path) -> io::Result<LineSequence> {
        let text = fs::read_to_string(path)?;
        Ok(split_lines(&text))
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let failed = |source: io::Error| SpliceError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };
        let temp_path = temp_path_for(path).map_err(failed)?;

        write_then_rename(&temp_path, path, contents).map_err(|e| {
            if temp_path.exists() {
                if let Err(cleanup) = fs::remove_file(&temp_path) {
                    tracing::warn!("could not remove {}: {}", temp_path.display(), cleanup);
                }
            }
            failed(e)
        })
    }
}
