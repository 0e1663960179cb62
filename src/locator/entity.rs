use crate::fs::Entity;

/// Result of a successful locator dispatch
///
/// Pairs a descriptor-chosen type tag with the produced filesystem handle.
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct LocatorEntity {
    entity_type: String,
    handle: Option<Entity>,
}

impl LocatorEntity {
    pub fn new(entity_type: impl Into<String>, handle: Option<Entity>) -> Self {
        LocatorEntity {
            entity_type: entity_type.into(),
            handle,
        }
    }

    /// Type discriminator chosen by the producing descriptor
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// The produced handle, if any
    pub fn handle(&self) -> Option<&Entity> {
        self.handle.as_ref()
    }

    pub fn into_handle(self) -> Option<Entity> {
        self.handle
    }
}
