use crate::error::{Result, StoreError};
use crate::file;
use crate::paths;
use std::fs;
use std::path::{Path, PathBuf};

/// Copies `source` to `target`. `target` must not resolve to `source`.
pub fn backup_file(source: &Path, target: &Path) -> Result<u64> {
    paths::ensure_parent_dir(target)?;
    let target_path = canonicalize_path(target)?;
    let source_path = canonicalize_path(source)?;
    if source_path == target_path || is_same_file_identity(&target_path, &source_path)? {
        return Err(StoreError::InvalidBackupPath(target.to_path_buf()));
    }
    let size = fs::copy(&source_path, &target_path)?;
    file::restrict_file_permissions(&target_path)?;
    Ok(size)
}

fn canonicalize_path(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(fs::canonicalize(path)?);
    }
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let parent = fs::canonicalize(parent)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::InvalidBackupPath(path.to_path_buf()))?;
    Ok(parent.join(file_name))
}

#[cfg(unix)]
fn is_same_file_identity(target: &Path, source: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;
    if !target.exists() || !source.exists() {
        return Ok(false);
    }
    let target_meta = fs::metadata(target)?;
    let source_meta = fs::metadata(source)?;
    Ok(target_meta.dev() == source_meta.dev() && target_meta.ino() == source_meta.ino())
}

#[cfg(not(unix))]
fn is_same_file_identity(_target: &Path, _source: &Path) -> Result<bool> {
    Ok(false)
}
