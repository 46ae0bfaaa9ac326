use crate::utils::error::{SpliceError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let text = path.to_string_lossy();

    if text.is_empty() {
        return Err(SpliceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: text.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if text.contains('\0') {
        return Err(SpliceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: text.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A marker is compared as a whole line, so it must hold something besides its terminator.
pub fn validate_marker_line(field_name: &str, line: &str) -> Result<()> {
    if line.trim_end_matches(['\r', '\n']).is_empty() {
        return Err(SpliceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: line.to_string(),
            reason: "Marker cannot be empty".to_string(),
        });
    }

    if line.strip_suffix('\n').unwrap_or(line).contains('\n') {
        return Err(SpliceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: line.to_string(),
            reason: "Marker must be a single line".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SpliceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_distinct(field_name: &str, left: &str, right: &str) -> Result<()> {
    if left == right {
        return Err(SpliceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: left.to_string(),
            reason: "Start and end markers must differ".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("paths.target", Path::new("ka-build.html")).is_ok());
        assert!(validate_path("paths.target", Path::new("")).is_err());
        assert!(validate_path("paths.target", Path::new("bad\0path")).is_err());
    }

    #[test]
    fn test_validate_marker_line() {
        assert!(validate_marker_line("markers.start", "START\n").is_ok());
        assert!(validate_marker_line("markers.start", "\n").is_err());
        assert!(validate_marker_line("markers.start", "\r\n").is_err());
        assert!(validate_marker_line("markers.start", "A\nB\n").is_err());
    }

    #[test]
    fn test_validate_distinct() {
        assert!(validate_distinct("markers", "START\n", "END\n").is_ok());
        assert!(validate_distinct("markers", "SAME\n", "SAME\n").is_err());
    }
}
