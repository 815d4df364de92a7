use crate::error::{FindVersionError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Name of the override file expected at the tree root
pub const OVERRIDE_FILE_NAME: &str = "VERSION";

const TRIMMED: &[char] = &[' ', '\t', '\r', '\n'];

/// Reads the override version from `<root>/VERSION`.
///
/// # Returns
/// * `Ok(Some(version))` - File exists with non-blank content, trimmed
/// * `Ok(None)` - File is missing, blank, or not a regular file
/// * `Err` - Regular file exists but cannot be read
pub fn read_override(root: &Path) -> Result<Option<String>> {
    let path = root.join(OVERRIDE_FILE_NAME);

    match fs::metadata(&path) {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => {
            tracing::debug!(path = %path.display(), "override is not a regular file");
            return Ok(None);
        }
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(FindVersionError::OverrideRead { path, source }),
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(FindVersionError::OverrideRead { path, source }),
    };

    let version = content.trim_matches(TRIMMED);
    if version.is_empty() {
        tracing::debug!(path = %path.display(), "override file is blank");
        return Ok(None);
    }
    Ok(Some(version.to_string()))
}
