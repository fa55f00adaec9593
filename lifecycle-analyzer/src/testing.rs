//! Fakes for the [`Image`] and [`Cache`] traits, for use in this crate's own tests and by
//! downstream phases that need to exercise code against an analyzer-shaped previous image or
//! cache without a real registry or cache store.

use crate::cache::{Cache, CacheError};
use crate::image::{Image, ImageError, ImageIdentifier, ImageInspection};
use lifecycle_data::cache_metadata::CacheMetadata;
use std::collections::BTreeMap;

/// A fake previous image whose existence, identifier and labels are fixed ahead of time.
#[derive(Clone, Debug, Default)]
pub struct FakeImage {
    inspection: Option<ImageInspection>,
}

impl FakeImage {
    /// A fake for "no previous image".
    #[must_use]
    pub fn not_found() -> Self {
        Self { inspection: None }
    }

    /// A fake for a previous image with the given identifier and no labels.
    #[must_use]
    pub fn with_identifier(identifier: impl Into<String>) -> Self {
        Self {
            inspection: Some(ImageInspection {
                identifier: ImageIdentifier(identifier.into()),
                labels: BTreeMap::new(),
            }),
        }
    }

    /// Sets the raw value of a label on this fake image, overwriting any previous value.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Some(inspection) = &mut self.inspection {
            inspection.labels.insert(key.into(), value.into());
        }
        self
    }
}

impl Image for FakeImage {
    fn inspect(&self) -> Result<Option<ImageInspection>, ImageError> {
        Ok(self.inspection.clone())
    }
}

/// A fake cache whose metadata record is fixed ahead of time.
#[derive(Clone, Debug, Default)]
pub struct FakeCache {
    metadata: CacheMetadata,
}

impl FakeCache {
    #[must_use]
    pub fn new(metadata: CacheMetadata) -> Self {
        Self { metadata }
    }

    /// A fake for a fresh, empty cache.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl Cache for FakeCache {
    fn retrieve_metadata(&self) -> Result<CacheMetadata, CacheError> {
        Ok(self.metadata.clone())
    }
}
