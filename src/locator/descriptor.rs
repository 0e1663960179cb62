use std::collections::HashMap;
use std::sync::Arc;

use super::entity::LocatorEntity;
use super::locator::{LocateOptions, Locator};
use crate::error::{Error, Result};

/// Factory for locator entities of one scheme
pub trait Descriptor: Send + Sync {
    /// Case-insensitive scheme this descriptor answers for
    fn scheme(&self) -> &str;

    /// Type tag of the entities this descriptor produces
    fn entity_type(&self) -> &str;

    /// Resolve `(primary, secondary, options)` into a locator entity
    ///
    /// The locator is passed in for placeholder and directory lookups.
    fn make(
        &self,
        locator: &Locator,
        primary: &str,
        secondary: &str,
        options: &LocateOptions,
    ) -> Result<LocatorEntity>;
}

/// Scheme-keyed descriptor registry, keys case-folded
///
/// The collection itself is permissive: `set` overwrites. Duplicate
/// rejection lives one layer up, in `Locator::register`.
#[derive(Default)]
pub struct DescriptorCollection {
    items: HashMap<String, Arc<dyn Descriptor>>,
}

impl DescriptorCollection {
    pub fn new() -> Self {
        DescriptorCollection {
            items: HashMap::new(),
        }
    }

    /// Store a descriptor for a scheme, replacing any existing entry
    pub fn set(&mut self, scheme: &str, descriptor: Arc<dyn Descriptor>) {
        self.items.insert(scheme.to_lowercase(), descriptor);
    }

    /// Look up the descriptor for a scheme
    pub fn get(&self, scheme: &str) -> Result<&Arc<dyn Descriptor>> {
        self.items
            .get(&scheme.to_lowercase())
            .ok_or_else(|| Error::UnknownScheme(scheme.to_string()))
    }

    /// Check whether a scheme is registered
    pub fn contains(&self, scheme: &str) -> bool {
        self.items.contains_key(&scheme.to_lowercase())
    }
}
