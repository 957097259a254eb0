use crate::error::Result;
use crate::paths;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Whole contents of the data file, or `None` when it does not exist yet.
pub fn read_document(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Truncates and rewrites the data file.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    paths::ensure_parent_dir(path)?;
    fs::write(path, contents)?;
    restrict_file_permissions(path)?;
    Ok(())
}

#[cfg(unix)]
pub(crate) fn restrict_file_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if path.exists() {
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn restrict_file_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
