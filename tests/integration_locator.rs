use std::fs;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use queryfs::{
    Descriptor, Directory, Error, FileDescriptor, FileSystem, LocateOptions, Locator,
    LocatorEntity,
};
use tempfile::TempDir;

/// Working directory with a readme and a config subdirectory
fn fixture() -> Result<(TempDir, FileSystem)> {
    let dir = tempfile::tempdir()?;

    fs::write(dir.path().join("readme.txt"), "read me\n")?;
    fs::create_dir(dir.path().join("config"))?;
    fs::write(dir.path().join("config").join("app.json"), "{\"ok\":true}")?;

    let filesystem = FileSystem::new(dir.path().to_str().unwrap())?;

    Ok((dir, filesystem))
}

fn locator_with_file_scheme(filesystem: FileSystem) -> Result<Locator> {
    let mut locator = Locator::new();
    locator.register([Arc::new(FileDescriptor::new(filesystem)) as _])?;

    Ok(locator)
}

#[test]
fn locate_resolves_a_file_against_the_root() -> Result<()> {
    let (_dir, filesystem) = fixture()?;
    let expected = filesystem.path().child("readme.txt");
    let locator = locator_with_file_scheme(filesystem)?;

    let entity = locator.locate("file:///readme.txt")?;

    assert_eq!(entity.entity_type(), "file");
    let handle = entity.handle().expect("file entity carries a handle");
    assert!(handle.is_file());
    assert_eq!(handle.path(), expected);

    Ok(())
}

#[test]
fn locate_is_case_insensitive_end_to_end() -> Result<()> {
    let (_dir, filesystem) = fixture()?;
    let expected = filesystem.path().child("readme.txt");
    let locator = locator_with_file_scheme(filesystem)?;

    let entity = locator.locate("FILE:///README.TXT")?;
    assert_eq!(entity.into_handle().unwrap().path(), expected);

    Ok(())
}

#[test]
fn locate_missing_resource_is_not_found() -> Result<()> {
    let (_dir, filesystem) = fixture()?;
    let locator = locator_with_file_scheme(filesystem)?;

    let err = locator.locate("file:///missing.txt").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[test]
fn locate_directory_match_is_not_a_file() -> Result<()> {
    let (_dir, filesystem) = fixture()?;
    let locator = locator_with_file_scheme(filesystem)?;

    // `config` exists but is a directory, which the file scheme rejects
    let err = locator.locate("file:///config").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[test]
fn locate_unknown_scheme_fails() -> Result<()> {
    let (_dir, filesystem) = fixture()?;
    let locator = locator_with_file_scheme(filesystem)?;

    let err = locator.locate("unknown://x/y").unwrap_err();
    assert!(matches!(err, Error::UnknownScheme(scheme) if scheme == "unknown"));

    Ok(())
}

#[test]
fn locate_malformed_url_fails() -> Result<()> {
    let (_dir, filesystem) = fixture()?;
    let locator = locator_with_file_scheme(filesystem)?;

    for url in ["no-scheme-here", "file://host-without-path"] {
        let err = locator.locate(url).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "url {url}");
    }

    Ok(())
}

#[test]
fn duplicate_scheme_registration_fails() -> Result<()> {
    let (_dir, filesystem) = fixture()?;
    let mut locator = locator_with_file_scheme(filesystem.clone())?;

    let err = locator
        .register([Arc::new(FileDescriptor::new(filesystem)) as _])
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateScheme(_)));

    Ok(())
}

#[test]
fn placeholder_primary_scopes_the_lookup() -> Result<()> {
    let (_dir, filesystem) = fixture()?;
    let config = filesystem.directory("config")?;
    let mut locator = locator_with_file_scheme(filesystem)?;

    locator.bind_placeholder("config", config.clone())?;

    let entity = locator.locate("file://config/app.json")?;
    assert_eq!(
        entity.into_handle().unwrap().path(),
        config.path().child("app.json")
    );

    // Placeholder names are case-folded
    let entity = locator.locate("file://CONFIG/App.JSON")?;
    assert_eq!(
        entity.into_handle().unwrap().path(),
        config.path().child("app.json")
    );

    Ok(())
}

#[test]
fn unbound_placeholder_fails() -> Result<()> {
    let (_dir, filesystem) = fixture()?;
    let locator = locator_with_file_scheme(filesystem)?;

    let err = locator.locate("file://nowhere/readme.txt").unwrap_err();
    assert!(matches!(err, Error::UnknownPlaceholder(name) if name == "nowhere"));

    Ok(())
}

#[test]
fn rebinding_a_placeholder_redirects_lookups() -> Result<()> {
    let (_dir, filesystem) = fixture()?;
    let root = filesystem.root().clone();
    let config = filesystem.directory("config")?;
    let mut locator = locator_with_file_scheme(filesystem)?;

    locator.bind_placeholder("base", root.clone())?;
    let first = locator.locate("file://base/readme.txt")?;
    assert_eq!(
        first.into_handle().unwrap().path(),
        root.path().child("readme.txt")
    );

    locator.bind_placeholder("base", config.clone())?;
    let second = locator.locate("file://base/app.json")?;
    assert_eq!(
        second.into_handle().unwrap().path(),
        config.path().child("app.json")
    );

    Ok(())
}

/// Descriptor that records what the locator hands it
struct Recording {
    seen: Arc<Mutex<Option<(String, String, LocateOptions)>>>,
}

impl Descriptor for Recording {
    fn scheme(&self) -> &str {
        "rec"
    }

    fn entity_type(&self) -> &str {
        "recording"
    }

    fn make(
        &self,
        _locator: &Locator,
        primary: &str,
        secondary: &str,
        options: &LocateOptions,
    ) -> queryfs::Result<LocatorEntity> {
        *self.seen.lock().unwrap() = Some((
            primary.to_string(),
            secondary.to_string(),
            options.clone(),
        ));

        Ok(LocatorEntity::new(self.entity_type(), None))
    }
}

#[test]
fn descriptors_receive_split_url_and_options() -> Result<()> {
    let seen = Arc::new(Mutex::new(None));
    let mut locator = Locator::new();
    locator.register([Arc::new(Recording { seen: seen.clone() }) as _])?;

    let entity = locator.locate("rec://primary-part/some/path?k=v&flag")?;
    assert_eq!(entity.entity_type(), "recording");
    assert!(entity.handle().is_none());

    let (primary, secondary, options) = seen.lock().unwrap().take().expect("make was called");
    assert_eq!(primary, "primary-part");
    assert_eq!(secondary, "/some/path");
    assert_eq!(options.scheme, "rec");
    assert_eq!(options.url, "rec://primary-part/some/path?k=v&flag");
    assert_eq!(
        options.query,
        vec![
            ("k".to_string(), "v".to_string()),
            ("flag".to_string(), String::new()),
        ]
    );

    Ok(())
}

#[test]
fn bound_directory_placeholder_is_queryable() -> Result<()> {
    let (_dir, filesystem) = fixture()?;
    let mut locator = Locator::new();

    locator.bind_placeholder("work", Directory::new(&filesystem.path().to_string()))?;

    let resolved = locator.resolve_placeholder("WORK")?;
    assert!(resolved.is_directory("config"));

    Ok(())
}
