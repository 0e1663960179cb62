pub mod descriptor;
pub mod entity;
pub mod file_descriptor;
pub mod locator;
pub mod url;

pub use descriptor::{Descriptor, DescriptorCollection};
pub use entity::LocatorEntity;
pub use file_descriptor::FileDescriptor;
pub use locator::{LocateOptions, Locator};
pub use url::ResourceUrl;
