use crate::error::{SyncError, SyncResult};
use glob::MatchOptions;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Names of every entry directly inside `dir`, sorted.
pub fn list_entries(dir: &Path) -> SyncResult<Vec<String>> {
    let read_dir = fs::read_dir(dir).map_err(|source| SyncError::ListDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| SyncError::ListDir {
            path: dir.to_path_buf(),
            source,
        })?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}

/// Names of the directories directly inside `dir`, sorted.
pub fn list_subdirectories(dir: &Path) -> SyncResult<Vec<String>> {
    Ok(list_entries(dir)?
        .into_iter()
        .filter(|name| dir.join(name).is_dir())
        .collect())
}

/// Paths in `dir` matching a single-level pattern such as `*.md`.
///
/// Hidden files are only matched by patterns that start with a dot.
pub fn glob_in(dir: &Path, pattern: &str) -> SyncResult<Vec<Result<PathBuf, glob::GlobError>>> {
    let full = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        pattern
    );
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    Ok(glob::glob_with(&full, options)?.collect())
}

pub fn read_to_string(path: &Path) -> SyncResult<String> {
    fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_err(path: &Path) -> impl FnOnce(io::Error) -> SyncError {
    let path = path.to_path_buf();
    move |source| SyncError::Write { path, source }
}

/// Replace `path` with `contents` by writing a sibling temp file and renaming it over.
///
/// A symlinked `path` is written through to its target, and an existing
/// file keeps its permissions.
pub fn write_atomic(path: &Path, contents: &str) -> SyncResult<()> {
    let target = match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).map_err(write_err(path))?
        }
        _ => path.to_path_buf(),
    };
    let path = target.as_path();
    let permissions = fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut temp_path = path.to_path_buf();
    match path.file_name() {
        Some(name) => temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy())),
        None => temp_path.push(".tmp"),
    }

    {
        let mut file = File::create(&temp_path).map_err(write_err(&temp_path))?;
        file.write_all(contents.as_bytes())
            .map_err(write_err(&temp_path))?;
        file.sync_all().map_err(write_err(&temp_path))?;
    }

    if let Some(permissions) = permissions {
        fs::set_permissions(&temp_path, permissions).map_err(write_err(&temp_path))?;
    }

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        SyncError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}
