use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::directory::Directory;
use super::meta;
use super::path::CanonicalPath;
use crate::error::{Error, Result};

/// Handle to a file, owned by its containing directory
///
/// A file never stores its own absolute path; it is derived from the owning
/// directory handle plus a bare, separator-free filename, so a `move_to`
/// cannot leave a stale path behind. Basename and extension are re-derived
/// whenever the filename changes.
#[derive(Debug, Clone)]
pub struct File {
    directory: Directory,
    filename: String,
    basename: String,
    extension: Option<String>,
}

impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.directory == other.directory && self.filename == other.filename
    }
}

impl Eq for File {}

/// Stem and extension of a filename, dot-free extension
fn derive_parts(filename: &str) -> (String, Option<String>) {
    let path = Path::new(filename);

    let basename = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    let extension = path.extension().map(|s| s.to_string_lossy().into_owned());

    (basename, extension)
}

/// Reject names that would smuggle in a path separator
fn validate_name(name: &str) -> Result<()> {
    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidArgument(format!(
            "name contains a path separator: {name}"
        )));
    }

    Ok(())
}

impl File {
    pub(crate) fn new(directory: Directory, filename: &str) -> Self {
        let (basename, extension) = derive_parts(filename);

        File {
            directory,
            filename: filename.to_string(),
            basename,
            extension,
        }
    }

    /// Owning directory handle
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Filename including the extension
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Filename without the extension
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Extension without the dot, if the filename has one
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Full canonical path of the file
    pub fn path(&self) -> CanonicalPath {
        self.directory.path().child(&self.filename)
    }

    /// Read the full contents
    pub fn get(&self) -> Result<String> {
        let path = self.path();

        if !self.is_readable() {
            return Err(Error::AccessDenied(path.to_string()));
        }

        fs::read_to_string(path.to_path_buf())
            .map_err(|e| Error::operation_failed(path.to_string(), e))
    }

    /// Overwrite the full contents
    ///
    /// An existing file must itself be writable; a missing one requires the
    /// containing directory to be writable.
    pub fn put(&self, contents: impl AsRef<[u8]>) -> Result<()> {
        let path = self.path();
        let path_os = path.to_path_buf();

        if meta::exists(&path_os) {
            if !meta::is_writable(&path_os) {
                return Err(Error::NotWritable(path.to_string()));
            }
        } else if !self.directory.is_writable() {
            return Err(Error::NotWritable(self.directory.path().to_string()));
        }

        fs::write(&path_os, contents.as_ref())
            .map_err(|e| Error::operation_failed(path.to_string(), e))
    }

    /// Read and deserialize the contents as JSON
    pub fn get_json<T: DeserializeOwned>(&self) -> Result<T> {
        let raw = self.get()?;

        serde_json::from_str(&raw).map_err(|e| Error::Json {
            path: self.path().to_string(),
            source: e,
        })
    }

    /// Serialize the value as pretty-printed JSON and overwrite the file
    pub fn put_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let raw = serde_json::to_string_pretty(value).map_err(|e| Error::Json {
            path: self.path().to_string(),
            source: e,
        })?;

        self.put(raw)
    }

    /// Copy the file into `target`, optionally under a new name
    ///
    /// Each violated precondition fails with its own kind: missing source or
    /// target directory, unwritable target, separator in the new name.
    pub fn copy(&self, target: &Directory, new_name: Option<&str>) -> Result<File> {
        let source = self.path();

        if !self.exists() {
            return Err(Error::NotFound(source.to_string()));
        }

        if !target.exists() {
            return Err(Error::NotFound(target.path().to_string()));
        }

        if !target.is_writable() {
            return Err(Error::NotWritable(target.path().to_string()));
        }

        let name = match new_name {
            Some(name) => {
                validate_name(name)?;
                name
            }
            None => &self.filename,
        };

        let destination = target.path().child(name);

        fs::copy(source.to_path_buf(), destination.to_path_buf())
            .map_err(|e| Error::operation_failed(destination.to_string(), e))?;

        Ok(File::new(target.clone(), name))
    }

    /// Rename the file in place
    ///
    /// When the file does not exist on disk yet this only relabels the
    /// handle; otherwise the OS entry is renamed as well.
    pub fn rename(&mut self, new_name: &str) -> Result<()> {
        validate_name(new_name)?;

        if self.exists() {
            let from = self.path();
            let to = self.directory.path().child(new_name);

            fs::rename(from.to_path_buf(), to.to_path_buf())
                .map_err(|e| Error::operation_failed(to.to_string(), e))?;
        }

        self.filename = new_name.to_string();
        (self.basename, self.extension) = derive_parts(new_name);

        Ok(())
    }

    /// Move the file into `target`, optionally under a new name
    ///
    /// Rebinds the handle's directory and filename on success.
    pub fn move_to(&mut self, target: &Directory, new_name: Option<&str>) -> Result<()> {
        let source = self.path();

        if !self.exists() {
            return Err(Error::NotFound(source.to_string()));
        }

        if !target.exists() {
            return Err(Error::NotFound(target.path().to_string()));
        }

        let name = match new_name {
            Some(name) => {
                validate_name(name)?;
                name.to_string()
            }
            None => self.filename.clone(),
        };

        let destination = target.path().child(&name);

        fs::rename(source.to_path_buf(), destination.to_path_buf())
            .map_err(|e| Error::operation_failed(destination.to_string(), e))?;

        self.directory = target.clone();
        self.filename = name;
        (self.basename, self.extension) = derive_parts(&self.filename);

        Ok(())
    }

    /// Whether the entry's permission bits allow reading
    pub fn is_readable(&self) -> bool {
        meta::is_readable(&self.path().to_path_buf())
    }

    /// Whether the entry's permission bits allow writing
    pub fn is_writable(&self) -> bool {
        meta::is_writable(&self.path().to_path_buf())
    }

    /// Whether the entry is a symbolic link
    pub fn is_link(&self) -> bool {
        meta::is_link(&self.path().to_path_buf())
    }

    /// Whether the entry exists
    pub fn exists(&self) -> bool {
        meta::exists(&self.path().to_path_buf())
    }

    /// Delete the file
    pub fn delete(&self) -> Result<()> {
        let path = self.path();

        if !self.exists() {
            return Err(Error::NotFound(path.to_string()));
        }

        if !self.is_writable() {
            return Err(Error::AccessDenied(path.to_string()));
        }

        fs::remove_file(path.to_path_buf())
            .map_err(|e| Error::operation_failed(path.to_string(), e))
    }
}
