use lifecycle_analyzer::cache::{Cache, CacheError};
use lifecycle_analyzer::image::{Image, METADATA_LABEL};
use lifecycle_data::cache_metadata::CacheMetadata;

/// A cache backed by a second image reference, read through the same [`Image`] capability used
/// for the primary previous-image lookup.
///
/// This only adapts `Image` to `Cache`; it carries no image-reading logic of its own, which is
/// the point — the analyzer treats both cache backends identically.
pub struct ImageCache<'a> {
    image: &'a dyn Image,
}

impl<'a> ImageCache<'a> {
    #[must_use]
    pub fn new(image: &'a dyn Image) -> Self {
        Self { image }
    }
}

impl Cache for ImageCache<'_> {
    fn retrieve_metadata(&self) -> Result<CacheMetadata, CacheError> {
        let Some(inspection) = self
            .image
            .inspect()
            .map_err(|error| CacheError::Other(error.to_string()))?
        else {
            return Ok(CacheMetadata::default());
        };

        match inspection.labels.get(METADATA_LABEL) {
            None => Ok(CacheMetadata::default()),
            Some(label) if label.is_empty() => Ok(CacheMetadata::default()),
            Some(label) => {
                serde_json::from_str(label).map_err(|error| CacheError::Other(error.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifecycle_analyzer::testing::FakeImage;

    #[test]
    fn missing_backing_image_yields_zero_valued_metadata() {
        let cache = ImageCache::new(&FakeImage::not_found());
        assert_eq!(cache.retrieve_metadata().unwrap(), CacheMetadata::default());
    }

    #[test]
    fn backing_image_label_is_decoded_as_cache_metadata() {
        let label = r#"{"buildpacks":{"heroku/jvm":{"id":"heroku/jvm","version":"1.0.0","layers":{"jdk":{"sha":"sha256:jdk","cache":true}}}}}"#;
        let image =
            FakeImage::with_identifier("registry.example/cache@sha256:deadbeef").with_label(METADATA_LABEL, label);
        let cache = ImageCache::new(&image);

        let metadata = cache.retrieve_metadata().unwrap();
        let jvm = metadata.buildpacks.get(&"heroku/jvm".parse().unwrap()).unwrap();
        assert!(jvm.layers.get("jdk").unwrap().cache);
    }
}
