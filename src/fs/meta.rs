//! Thin reflection helpers over the OS entry metadata
//!
//! These mirror the entry's permission bits rather than evaluating effective
//! access for the current user; the check-then-act window they leave open is
//! acknowledged by the concurrency model.

use std::fs;
use std::path::Path;

pub(crate) fn exists(path: &Path) -> bool {
    path.exists()
}

pub(crate) fn is_directory(path: &Path) -> bool {
    path.is_dir()
}

pub(crate) fn is_file(path: &Path) -> bool {
    path.is_file()
}

pub(crate) fn is_link(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

#[cfg(unix)]
pub(crate) fn is_readable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o444 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub(crate) fn is_readable(path: &Path) -> bool {
    path.exists()
}

#[cfg(unix)]
pub(crate) fn is_writable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o222 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub(crate) fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}
