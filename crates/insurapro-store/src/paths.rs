use crate::error::{Result, StoreError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "customers.csv";
pub const DATA_FILE_ENV: &str = "INSURAPRO_DATA_FILE";
const BACKUP_DIR: &str = "backups";

/// Picks the data file: explicit flag, then `INSURAPRO_DATA_FILE`, then the
/// configured path, then `customers.csv` in the working directory.
pub fn resolve_data_path(custom: Option<PathBuf>, configured: Option<PathBuf>) -> Result<PathBuf> {
    let from_env = env::var_os(DATA_FILE_ENV).map(PathBuf::from);
    let path = custom
        .or(from_env)
        .or(configured)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
    if path.as_os_str().is_empty() {
        return Err(StoreError::InvalidDataPath(path));
    }
    Ok(path)
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// `<dir>/<data file stem>-<stamp>.csv`, with `dir` defaulting to a
/// `backups` directory next to the data file.
pub fn backup_path(data_path: &Path, backup_dir: Option<&Path>, stamp: &str) -> PathBuf {
    let dir = match backup_dir {
        Some(dir) => dir.to_path_buf(),
        None => data_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .join(BACKUP_DIR),
    };
    let stem = data_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("customers");
    dir.join(format!("{stem}-{stamp}.csv"))
}
