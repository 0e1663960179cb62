use super::descriptor::Descriptor;
use super::entity::LocatorEntity;
use super::locator::{LocateOptions, Locator};
use crate::error::{Error, Result};
use crate::fs::{Entity, FileSystem};

/// Built-in descriptor for the `file` scheme
///
/// A non-empty `primary` names a directory placeholder on the locator and
/// `secondary` is found inside it; an empty `primary` resolves `secondary`
/// against this descriptor's own filesystem root. Only file matches
/// qualify; anything else is a not-found.
pub struct FileDescriptor {
    filesystem: FileSystem,
}

impl FileDescriptor {
    pub fn new(filesystem: FileSystem) -> Self {
        FileDescriptor { filesystem }
    }
}

impl Descriptor for FileDescriptor {
    fn scheme(&self) -> &str {
        "file"
    }

    fn entity_type(&self) -> &str {
        "file"
    }

    fn make(
        &self,
        locator: &Locator,
        primary: &str,
        secondary: &str,
        options: &LocateOptions,
    ) -> Result<LocatorEntity> {
        let primary = primary.trim_matches(['/', '\\']);
        let secondary = secondary.trim_matches(['/', '\\']);

        let found = if primary.is_empty() {
            self.filesystem.find(secondary)?
        } else {
            locator.resolve_placeholder(primary)?.find(secondary)?
        };

        match found {
            Some(Entity::File(file)) => {
                Ok(LocatorEntity::new(self.entity_type(), Some(Entity::File(file))))
            }
            _ => Err(Error::NotFound(options.url.clone())),
        }
    }
}
