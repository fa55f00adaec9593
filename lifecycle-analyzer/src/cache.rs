use lifecycle_data::cache_metadata::CacheMetadata;

/// A capability trait over the build cache store.
///
/// Implementations are expected to wrap a specific cache backend (a local directory, a cache
/// image) but expose none of that here; the analyzer only ever needs the current metadata
/// record.
pub trait Cache {
    /// Retrieves the cache's current metadata record.
    ///
    /// MUST return a zero-valued [`CacheMetadata`], not an error, for a fresh or empty cache.
    fn retrieve_metadata(&self) -> Result<CacheMetadata, CacheError>;
}

#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    #[error("I/O error while retrieving cache metadata: {0}")]
    Io(#[from] std::io::Error),

    #[error("error retrieving cache metadata: {0}")]
    Other(String),
}

/// Reads the cache's metadata record, or the zero value when there is no cache at all.
///
/// A retrieval error from a present cache is propagated rather than silently degraded, unlike
/// the image metadata reader: an existing cache that fails to respond is a hard error, while an
/// absent cache is expected on first builds.
pub fn read_cache(cache: Option<&dyn Cache>) -> Result<CacheMetadata, CacheError> {
    match cache {
        None => Ok(CacheMetadata::default()),
        Some(cache) => cache.retrieve_metadata(),
    }
}
