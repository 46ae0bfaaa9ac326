use crate::core::source::split_lines;
use crate::domain::model::LineSequence;
use crate::domain::ports::Storage;
use crate::utils::error::{SpliceError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// In-memory storage for exercising the engine without touching disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RefCell<HashMap<PathBuf, String>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.files.borrow_mut().insert(path.into(), contents.to_string());
        self
    }

    /// Makes every write fail with a permission error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl Storage for MemoryStorage {
    fn is_file(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read_lines(&self, path: &Path) -> io::Result<LineSequence> {
        self.files
            .borrow()
            .get(path)
            .map(|text| split_lines(text))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        if self.fail_writes {
            return Err(SpliceError::WriteFailed {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only storage"),
            });
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
