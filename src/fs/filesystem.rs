use super::directory::Directory;
use super::entity::Entity;
use super::file::File;
use super::meta;
use super::path::CanonicalPath;
use crate::error::{Error, Result};

/// Root of the virtual filesystem
///
/// Owns a single directory handle for an explicitly configured working
/// directory and forwards every entity operation to it. There is no
/// implicit working-directory discovery.
#[derive(Debug, Clone)]
pub struct FileSystem {
    root: Directory,
}

impl FileSystem {
    /// Open a filesystem rooted at the given directory
    pub fn new(root: &str) -> Result<Self> {
        Ok(FileSystem {
            root: Directory::from_path(Self::checked_root(root)?),
        })
    }

    /// Open a filesystem whose root is also its jail boundary
    ///
    /// Every directory handle derived from this root refuses to create or
    /// navigate to entries above the root.
    pub fn jailed(root: &str) -> Result<Self> {
        let path = Self::checked_root(root)?;

        Ok(FileSystem {
            root: Directory::with_boundary(&path.to_string(), &path.to_string())?,
        })
    }

    fn checked_root(root: &str) -> Result<CanonicalPath> {
        let path = CanonicalPath::parse(root);
        let path_os = path.to_path_buf();

        if !meta::exists(&path_os) {
            return Err(Error::NotFound(path.to_string()));
        }

        if !meta::is_directory(&path_os) {
            return Err(Error::WrongKind(path.to_string()));
        }

        Ok(path)
    }

    /// The root directory handle
    pub fn root(&self) -> &Directory {
        &self.root
    }

    /// Canonical path of the working directory
    pub fn path(&self) -> &CanonicalPath {
        self.root.path()
    }

    /// Execute the callback on every match of the query
    pub fn each<F>(&self, query: &str, callback: F) -> Result<()>
    where
        F: FnMut(Entity) -> Result<()>,
    {
        self.root.each(query, callback)
    }

    /// First match of the query, or `None`
    pub fn find(&self, query: &str) -> Result<Option<Entity>> {
        self.root.find(query)
    }

    /// Check if the query resolves to a directory
    pub fn is_directory(&self, query: &str) -> bool {
        self.root.is_directory(query)
    }

    /// Check if the query resolves to a file
    pub fn is_file(&self, query: &str) -> bool {
        self.root.is_file(query)
    }

    /// Ensure the query exists as a directory
    pub fn directory(&self, query: &str) -> Result<Directory> {
        self.root.directory(query)
    }

    /// Ensure the query exists as a file
    pub fn file(&self, query: &str) -> Result<File> {
        self.root.file(query)
    }
}
