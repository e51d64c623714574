use crate::error::{Result, StoreError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "carlead";
const DB_FILENAME: &str = "carlead.sqlite3";

pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("XDG_DATA_HOME") {
        let path = PathBuf::from(dir);
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidDataPath(path));
        }
        return Ok(path.join(APP_DIR));
    }

    let home = dirs::home_dir().ok_or(StoreError::MissingHomeDir)?;
    Ok(home.join(".local").join("share").join(APP_DIR))
}

pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    restrict_dir_permissions(&dir)?;
    Ok(dir)
}

pub fn db_path() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join(DB_FILENAME))
}

pub fn db_path_in(dir: &Path) -> PathBuf {
    dir.join(DB_FILENAME)
}

/// `--db-path` when given (its directory is created), else the default
/// location under the data dir.
pub fn resolve_db_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(StoreError::InvalidDataPath(path));
            }
            ensure_parent_dir(&path)?;
            Ok(path)
        }
        None => db_path(),
    }
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn restrict_dir_permissions(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let perms = fs::Permissions::from_mode(0o700);
    fs::set_permissions(dir, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_dir_permissions(_dir: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{db_path_in, resolve_db_path};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn resolve_db_path_creates_parent_of_custom_path() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nested").join("leads.sqlite3");
        let resolved = resolve_db_path(Some(path.clone())).expect("resolve");
        assert_eq!(resolved, path);
        assert!(temp.path().join("nested").is_dir());
    }

    #[test]
    fn resolve_db_path_rejects_empty_path() {
        assert!(resolve_db_path(Some(PathBuf::new())).is_err());
    }

    #[test]
    fn db_path_in_uses_default_filename() {
        let dir = PathBuf::from("/tmp/carlead");
        assert_eq!(db_path_in(&dir), dir.join("carlead.sqlite3"));
    }
}
