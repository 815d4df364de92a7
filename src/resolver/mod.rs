//! Version resolution: override file, branch, closest tag and commit suffix

pub mod override_file;
pub mod version_resolver;

pub use override_file::{read_override, OVERRIDE_FILE_NAME};
pub use version_resolver::{Resolution, VersionResolver, VersionSource};
