use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::descriptor::{Descriptor, DescriptorCollection};
use super::entity::LocatorEntity;
use super::url::ResourceUrl;
use crate::error::{Error, Result};
use crate::fs::Directory;

/// Options handed to a descriptor alongside the split URL
#[derive(Debug, Clone)]
pub struct LocateOptions {
    /// Raw key/value pairs from the URL query string
    pub query: Vec<(String, String)>,
    /// Scheme the URL carried, as written
    pub scheme: String,
    /// The original URL string
    pub url: String,
}

/// Resolves scheme-qualified resource URLs through registered descriptors
///
/// Owns the descriptor collection, fixed at construction and populated only
/// through `register`, plus a rebindable table of named directory
/// placeholders descriptors can resolve `primary` values against.
#[derive(Default)]
pub struct Locator {
    descriptors: DescriptorCollection,
    placeholders: HashMap<String, Directory>,
}

impl Locator {
    pub fn new() -> Self {
        Locator {
            descriptors: DescriptorCollection::new(),
            placeholders: HashMap::new(),
        }
    }

    /// Register a batch of descriptors, all-or-nothing
    ///
    /// The whole batch is validated for scheme collisions, both against the
    /// collection and within the batch itself, before any descriptor is
    /// committed.
    pub fn register<I>(&mut self, descriptors: I) -> Result<()>
    where
        I: IntoIterator<Item = Arc<dyn Descriptor>>,
    {
        let batch: Vec<Arc<dyn Descriptor>> = descriptors.into_iter().collect();
        let mut batch_schemes = HashSet::new();

        for descriptor in &batch {
            let key = descriptor.scheme().to_lowercase();

            if self.descriptors.contains(&key) || !batch_schemes.insert(key) {
                return Err(Error::DuplicateScheme(descriptor.scheme().to_string()));
            }
        }

        for descriptor in batch {
            let scheme = descriptor.scheme().to_string();
            self.descriptors.set(&scheme, descriptor);
        }

        Ok(())
    }

    /// Locate a resource by its scheme-qualified URL
    pub fn locate(&self, url: &str) -> Result<LocatorEntity> {
        let parsed = ResourceUrl::parse(url)?;
        let descriptor = self.descriptors.get(parsed.scheme())?.clone();

        let options = LocateOptions {
            query: parsed.query_pairs(),
            scheme: parsed.scheme().to_string(),
            url: url.to_string(),
        };

        descriptor.make(self, parsed.primary(), parsed.secondary(), &options)
    }

    /// Bind a directory to a placeholder name, upserting
    pub fn bind_placeholder(&mut self, name: &str, directory: Directory) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "placeholder name must not be empty".to_string(),
            ));
        }

        self.placeholders.insert(name.to_lowercase(), directory);

        Ok(())
    }

    /// Resolve a placeholder name to its bound directory
    pub fn resolve_placeholder(&self, name: &str) -> Result<&Directory> {
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "placeholder name must not be empty".to_string(),
            ));
        }

        self.placeholders
            .get(&name.to_lowercase())
            .ok_or_else(|| Error::UnknownPlaceholder(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl Descriptor for Fixed {
        fn scheme(&self) -> &str {
            self.0
        }

        fn entity_type(&self) -> &str {
            "fixed"
        }

        fn make(
            &self,
            _locator: &Locator,
            _primary: &str,
            _secondary: &str,
            _options: &LocateOptions,
        ) -> Result<LocatorEntity> {
            Ok(LocatorEntity::new("fixed", None))
        }
    }

    #[test]
    fn test_register_rejects_known_scheme() {
        let mut locator = Locator::new();
        locator.register([Arc::new(Fixed("data")) as _]).unwrap();

        let err = locator
            .register([Arc::new(Fixed("DATA")) as _])
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateScheme(_)));
    }

    #[test]
    fn test_register_is_all_or_nothing() {
        let mut locator = Locator::new();

        let err = locator
            .register([
                Arc::new(Fixed("one")) as Arc<dyn Descriptor>,
                Arc::new(Fixed("two")),
                Arc::new(Fixed("ONE")),
            ])
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateScheme(_)));
        // Nothing from the failed batch may have been committed
        assert!(matches!(
            locator.locate("one://x/y"),
            Err(Error::UnknownScheme(_))
        ));
        assert!(matches!(
            locator.locate("two://x/y"),
            Err(Error::UnknownScheme(_))
        ));
    }

    #[test]
    fn test_locate_dispatches_case_insensitively() {
        let mut locator = Locator::new();
        locator.register([Arc::new(Fixed("data")) as _]).unwrap();

        let entity = locator.locate("DATA://x/y").unwrap();
        assert_eq!(entity.entity_type(), "fixed");
    }

    #[test]
    fn test_placeholder_round_trip() {
        let mut locator = Locator::new();
        locator
            .bind_placeholder("Config", Directory::new("/etc/app"))
            .unwrap();

        let resolved = locator.resolve_placeholder("CONFIG").unwrap();
        assert_eq!(resolved.path().to_string(), "/etc/app");

        // Rebinding replaces the previous directory
        locator
            .bind_placeholder("config", Directory::new("/opt/app"))
            .unwrap();
        assert_eq!(
            locator.resolve_placeholder("config").unwrap().path().to_string(),
            "/opt/app"
        );
    }

    #[test]
    fn test_empty_placeholder_name_fails() {
        let mut locator = Locator::new();

        assert!(matches!(
            locator.bind_placeholder("", Directory::new("/tmp")),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            locator.resolve_placeholder(""),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unknown_placeholder_fails() {
        let locator = Locator::new();

        assert!(matches!(
            locator.resolve_placeholder("nope"),
            Err(Error::UnknownPlaceholder(name)) if name == "nope"
        ));
    }
}
