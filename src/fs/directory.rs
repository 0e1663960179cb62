use std::fs;

use super::entity::Entity;
use super::file::File;
use super::meta;
use super::path::CanonicalPath;
use super::pattern;
use crate::error::{Error, Result};

/// Handle to a directory, addressed by its canonical path
///
/// Value-like: cheaply cloned, not cached across calls. Two handles compare
/// equal when their canonical paths match, never by identity. An optional
/// jail boundary names an ancestor outside of which creation and upward
/// navigation are denied; the boundary propagates to every child handle.
#[derive(Debug, Clone)]
pub struct Directory {
    path: CanonicalPath,
    boundary: Option<CanonicalPath>,
}

impl PartialEq for Directory {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Directory {}

impl Directory {
    /// Create a handle for the given path, without a jail boundary
    ///
    /// The path is normalized but not required to exist; existence is
    /// checked per operation.
    pub fn new(path: &str) -> Self {
        Directory {
            path: CanonicalPath::parse(path),
            boundary: None,
        }
    }

    /// Create a handle jailed under `boundary`
    ///
    /// The boundary must be an existing directory.
    pub fn with_boundary(path: &str, boundary: &str) -> Result<Self> {
        let boundary = CanonicalPath::parse(boundary);

        if !meta::is_directory(&boundary.to_path_buf()) {
            return Err(Error::InvalidArgument(format!(
                "open base directory is not reachable: {boundary}"
            )));
        }

        Ok(Directory {
            path: CanonicalPath::parse(path),
            boundary: Some(boundary),
        })
    }

    pub(crate) fn from_path(path: CanonicalPath) -> Self {
        Directory {
            path,
            boundary: None,
        }
    }

    /// Child handle under the same boundary
    fn spawn(&self, path: CanonicalPath) -> Directory {
        Directory {
            path,
            boundary: self.boundary.clone(),
        }
    }

    /// Canonical absolute path of this directory
    pub fn path(&self) -> &CanonicalPath {
        &self.path
    }

    /// Jail boundary, if one is configured
    pub fn boundary(&self) -> Option<&CanonicalPath> {
        self.boundary.as_ref()
    }

    fn check_boundary(&self, target: &CanonicalPath) -> Result<()> {
        if let Some(boundary) = &self.boundary {
            if !target.starts_with(boundary) {
                return Err(Error::AccessDenied(format!(
                    "{target} is outside the open base directory {boundary}"
                )));
            }
        }

        Ok(())
    }

    /// Wrap a matched path as an entity; the is-directory test decides
    fn wrap(&self, path: CanonicalPath) -> Entity {
        if meta::is_directory(&path.to_path_buf()) {
            Entity::Directory(self.spawn(path))
        } else {
            let name = path.file_name().unwrap_or_default().to_string();
            let parent = path.parent();
            let directory = if parent == self.path {
                self.clone()
            } else {
                self.spawn(parent)
            };

            Entity::File(File::new(directory, &name))
        }
    }

    /// Execute the callback on every match of the query, in OS listing order
    ///
    /// The order is unspecified. The first callback error aborts the walk
    /// and propagates.
    pub fn each<F>(&self, query: &str, mut callback: F) -> Result<()>
    where
        F: FnMut(Entity) -> Result<()>,
    {
        for path in pattern::match_under(&self.path, query)? {
            callback(self.wrap(path))?;
        }

        Ok(())
    }

    /// First match of the query, or `None`
    ///
    /// A missing match is success-with-absent, never an error.
    pub fn find(&self, query: &str) -> Result<Option<Entity>> {
        let mut matches = pattern::match_under(&self.path, query)?;

        if matches.is_empty() {
            return Ok(None);
        }

        Ok(Some(self.wrap(matches.remove(0))))
    }

    /// Check if the query resolves to a directory; false when nothing matches
    pub fn is_directory(&self, query: &str) -> bool {
        pattern::match_under(&self.path, query)
            .ok()
            .and_then(|matches| matches.into_iter().next())
            .map(|path| meta::is_directory(&path.to_path_buf()))
            .unwrap_or(false)
    }

    /// Check if the query resolves to a file; false when nothing matches
    pub fn is_file(&self, query: &str) -> bool {
        pattern::match_under(&self.path, query)
            .ok()
            .and_then(|matches| matches.into_iter().next())
            .map(|path| meta::is_file(&path.to_path_buf()))
            .unwrap_or(false)
    }

    /// Ensure the query exists as a directory under this one
    ///
    /// Idempotent: an existing directory is handed back as-is, a missing one
    /// is created level by level. Each creation point requires the current
    /// level to be writable and the target to fall inside the jail boundary.
    /// An existing entry of a different kind fails with `WrongKind`.
    pub fn directory(&self, query: &str) -> Result<Directory> {
        let relative = CanonicalPath::parse(query);

        if relative.is_root() {
            return Ok(self.clone());
        }

        let target = self.path.join(&relative.segments().join("/"));
        self.check_boundary(&target)?;

        let target_os = target.to_path_buf();

        if meta::exists(&target_os) {
            if !meta::is_directory(&target_os) {
                return Err(Error::WrongKind(target.to_string()));
            }

            return Ok(self.spawn(target));
        }

        let mut current = self.path.clone();

        for segment in relative.segments() {
            let next = current.child(segment);
            let next_os = next.to_path_buf();

            if meta::exists(&next_os) {
                if !meta::is_directory(&next_os) {
                    return Err(Error::WrongKind(next.to_string()));
                }
            } else {
                if !meta::is_writable(&current.to_path_buf()) {
                    return Err(Error::NotWritable(current.to_string()));
                }

                fs::create_dir(&next_os)
                    .map_err(|e| Error::operation_failed(next.to_string(), e))?;
            }

            current = next;
        }

        Ok(self.spawn(current))
    }

    /// Ensure the query exists as a file under this directory
    ///
    /// An existing file must be writable; a missing one requires its parent
    /// directory to be writable. A query with intermediate separators first
    /// ensures the directory part, then the leaf inside it.
    pub fn file(&self, query: &str) -> Result<File> {
        let relative = CanonicalPath::parse(query);

        let Some(name) = relative.file_name().map(str::to_string) else {
            return Err(Error::InvalidArgument(format!(
                "query does not name a file: {query}"
            )));
        };

        let target = self.path.join(&relative.segments().join("/"));
        self.check_boundary(&target)?;

        let target_os = target.to_path_buf();

        if meta::exists(&target_os) && !meta::is_writable(&target_os) {
            return Err(Error::NotWritable(target.to_string()));
        }

        if meta::is_file(&target_os) {
            let parent = target.parent();
            let directory = if parent == self.path {
                self.clone()
            } else {
                self.spawn(parent)
            };

            return Ok(File::new(directory, &name));
        }

        if meta::exists(&target_os) {
            return Err(Error::WrongKind(target.to_string()));
        }

        if relative.segments().len() > 1 {
            let intermediate = relative.parent().segments().join("/");
            return self.directory(&intermediate)?.file(&name);
        }

        if !self.is_writable() {
            return Err(Error::NotWritable(self.path.to_string()));
        }

        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&target_os)
            .map_err(|e| Error::operation_failed(target.to_string(), e))?;

        Ok(File::new(self.clone(), &name))
    }

    /// Parent directory handle, denied when it would leave the jail
    pub fn parent(&self) -> Result<Directory> {
        let parent = self.path.parent();
        self.check_boundary(&parent)?;

        Ok(self.spawn(parent))
    }

    /// Whether the entry's permission bits allow reading
    pub fn is_readable(&self) -> bool {
        meta::is_readable(&self.path.to_path_buf())
    }

    /// Whether the entry's permission bits allow writing
    pub fn is_writable(&self) -> bool {
        meta::is_writable(&self.path.to_path_buf())
    }

    /// Whether the entry is a symbolic link
    pub fn is_link(&self) -> bool {
        meta::is_link(&self.path.to_path_buf())
    }

    /// Whether the entry exists
    pub fn exists(&self) -> bool {
        meta::exists(&self.path.to_path_buf())
    }

    /// Delete this directory and everything below it
    ///
    /// Children are removed before the directory entry itself; a failed
    /// child removal aborts the sweep and leaves the parent in place.
    pub fn delete(&self) -> Result<()> {
        if !self.exists() {
            return Err(Error::NotFound(self.path.to_string()));
        }

        if !self.is_writable() {
            return Err(Error::AccessDenied(self.path.to_string()));
        }

        self.each("*", |entity| entity.delete())?;

        fs::remove_dir(self.path.to_path_buf())
            .map_err(|e| Error::operation_failed(self.path.to_string(), e))
    }
}
