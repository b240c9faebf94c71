use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub fn read_file_content(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}

/// Writes the full contents through a temp file in the target's directory,
/// then renames it over the target. A concurrent reader observes either the
/// old contents or the new ones, never a partial write. An existing target
/// keeps its permission bits; the temp file is created with restrictive ones
/// and would otherwise carry them over in the rename.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {:?}", dir))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write temp file for {:?}", path))?;
    tmp.flush()
        .with_context(|| format!("Failed to flush temp file for {:?}", path))?;

    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .with_context(|| format!("Failed to carry over permissions of {:?}", path))?;
    }

    tmp.persist(path)
        .with_context(|| format!("Failed to replace file: {:?}", path))?;

    Ok(())
}
