use lifecycle_analyzer::cache::{Cache, CacheError};
use lifecycle_common::fs::{default_on_not_found, write_file_fsynced};
use lifecycle_data::cache_metadata::CacheMetadata;
use std::path::{Path, PathBuf};

/// A directory-backed cache that stores its metadata record as a single TOML file, mirroring a
/// volume cache mounted into the build container.
pub struct FileSystemCache {
    metadata_path: PathBuf,
}

impl FileSystemCache {
    #[must_use]
    pub fn new(cache_dir: impl AsRef<Path>) -> Self {
        Self {
            metadata_path: cache_dir.as_ref().join("metadata.toml"),
        }
    }

    /// Persists `metadata` to disk.
    ///
    /// The analyzer never calls this; it only reads cache metadata. This exists for callers
    /// (the build and export phases) that populate the cache between builds.
    pub fn store_metadata(&self, metadata: &CacheMetadata) -> Result<(), CacheError> {
        if let Some(parent) = self.metadata_path.parent() {
            std::fs::create_dir_all(parent).map_err(CacheError::Io)?;
        }

        let serialized =
            toml::to_string(metadata).map_err(|error| CacheError::Other(error.to_string()))?;

        write_file_fsynced(&self.metadata_path, serialized).map_err(CacheError::Io)
    }
}

impl Cache for FileSystemCache {
    fn retrieve_metadata(&self) -> Result<CacheMetadata, CacheError> {
        let contents = default_on_not_found(std::fs::read_to_string(&self.metadata_path))
            .map_err(CacheError::Io)?;

        if contents.is_empty() {
            return Ok(CacheMetadata::default());
        }

        toml::from_str(&contents).map_err(|error| CacheError::Other(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cache_dir_retrieves_zero_valued_metadata() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cache = FileSystemCache::new(tmpdir.path());
        assert_eq!(cache.retrieve_metadata().unwrap(), CacheMetadata::default());
    }

    #[test]
    fn stored_metadata_round_trips() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cache = FileSystemCache::new(tmpdir.path());

        let mut metadata = CacheMetadata::default();
        metadata.buildpacks.insert(
            "heroku/jvm".parse().unwrap(),
            lifecycle_data::layer::BuildpackLayersMetadata::default(),
        );

        cache.store_metadata(&metadata).unwrap();
        assert_eq!(cache.retrieve_metadata().unwrap(), metadata);
    }
}
