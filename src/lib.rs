//! queryfs - Query-addressed virtual filesystem
//!
//! Callers address files and directories through normalized,
//! case-insensitive query strings instead of raw OS paths and get back
//! polymorphic entity handles:
//!
//! - [`CanonicalPath`]: normalized absolute paths (`.`/`..`/mixed
//!   separators collapsed)
//! - [`Directory`] / [`File`]: value-like entity handles over the OS
//!   filesystem, with an optional jail boundary
//! - [`FileSystem`]: the configured working-directory root
//! - [`Locator`]: resolves `scheme://primary/secondary` resource URLs
//!   through a pluggable [`Descriptor`] registry
//!
//! All operations are synchronous and blocking; nothing is cached between
//! calls, every query re-touches storage.

pub mod error;
pub mod fs;
pub mod locator;

pub use error::{Error, Result};
pub use fs::{CanonicalPath, Directory, Entity, File, FileSystem};
pub use locator::{
    Descriptor, DescriptorCollection, FileDescriptor, LocateOptions, Locator, LocatorEntity,
    ResourceUrl,
};
