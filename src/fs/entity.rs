use super::directory::Directory;
use super::file::File;
use super::path::CanonicalPath;

/// Polymorphic handle for a filesystem query result
///
/// Queries resolve to whatever the matching OS entry turns out to be; the
/// is-directory test at wrap time decides the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    File(File),
    Directory(Directory),
}

impl Entity {
    /// Check if this entity is a file handle
    pub fn is_file(&self) -> bool {
        matches!(self, Entity::File(_))
    }

    /// Check if this entity is a directory handle
    pub fn is_directory(&self) -> bool {
        matches!(self, Entity::Directory(_))
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Entity::File(file) => Some(file),
            Entity::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            Entity::Directory(directory) => Some(directory),
            Entity::File(_) => None,
        }
    }

    pub fn into_file(self) -> Option<File> {
        match self {
            Entity::File(file) => Some(file),
            Entity::Directory(_) => None,
        }
    }

    pub fn into_directory(self) -> Option<Directory> {
        match self {
            Entity::Directory(directory) => Some(directory),
            Entity::File(_) => None,
        }
    }

    /// Canonical path of the underlying entry
    pub fn path(&self) -> CanonicalPath {
        match self {
            Entity::File(file) => file.path(),
            Entity::Directory(directory) => directory.path().clone(),
        }
    }

    /// Delete the underlying entry, whichever kind it is
    pub fn delete(&self) -> crate::error::Result<()> {
        match self {
            Entity::File(file) => file.delete(),
            Entity::Directory(directory) => directory.delete(),
        }
    }
}
