//! Content factory for locating catalogs in a data directory.

use std::path::{Path, PathBuf};

use crate::loaders::{LoadResult, WorldCatalog, WorldLoader};

/// Content factory that loads world content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// └── world.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const WORLD_FILE: &'static str = "world.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the world catalog from `world.ron`.
    pub fn load_world(&self) -> LoadResult<WorldCatalog> {
        WorldLoader::load(&self.data_dir.join(Self::WORLD_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_world_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = ContentFactory::new(dir.path())
            .load_world()
            .expect_err("no world.ron");
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn bundled_world_loads() {
        let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data");
        let catalog = ContentFactory::new(data_dir)
            .load_world()
            .expect("bundled world.ron loads");

        let nightjar = catalog.actor("nightjar").expect("nightjar");
        assert!(nightjar.has_goblin_frame());
        assert_eq!(catalog.items_of("nightjar").count(), 3);
        assert_eq!(catalog.items_of("hornet").count(), 1);
    }
}
