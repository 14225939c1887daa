use std::fs::{self, File};
use std::io;

use camino::Utf8Path;
use tempfile::Builder;

use crate::error::SampleError;

pub fn ensure_dir(path: &Utf8Path) -> Result<(), SampleError> {
    fs::create_dir_all(path.as_std_path()).map_err(|err| SampleError::io(path, err))
}

/// Removes everything inside `path`, leaving the directory itself in place.
pub fn clean_dir(path: &Utf8Path) -> Result<(), SampleError> {
    let entries = fs::read_dir(path.as_std_path()).map_err(|err| SampleError::io(path, err))?;
    for entry in entries {
        let entry = entry.map_err(|err| SampleError::io(path, err))?;
        let entry_path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|err| SampleError::io(path, err))?;
        let removed = if file_type.is_dir() {
            fs::remove_dir_all(&entry_path)
        } else {
            fs::remove_file(&entry_path)
        };
        removed.map_err(|err| SampleError::io(path, err))?;
    }
    Ok(())
}

/// Writes `dest` through a temporary file in the same directory, renamed
/// over `dest` only once `write` has succeeded. A replaced file keeps its
/// permissions; a new one gets the usual umask-filtered mode.
pub fn write_atomic<F>(dest: &Utf8Path, write: F) -> Result<(), SampleError>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let parent = match dest.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let existing = fs::metadata(dest.as_std_path())
        .ok()
        .filter(|meta| meta.is_file())
        .map(|meta| meta.permissions());

    let mut builder = Builder::new();
    builder.prefix(".sample").suffix(".tmp");
    if existing.is_none() {
        if let Some(permissions) = new_file_permissions() {
            builder.permissions(permissions);
        }
    }
    let mut temp = builder
        .tempfile_in(parent.as_std_path())
        .map_err(|err| SampleError::io(dest, err))?;
    if let Some(permissions) = existing {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|err| SampleError::io(dest, err))?;
    }
    write(temp.as_file_mut()).map_err(|err| SampleError::io(dest, err))?;
    temp.persist(dest.as_std_path())
        .map_err(|err| SampleError::io(dest, err.error))?;
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
