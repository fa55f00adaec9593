use lifecycle_analyzer::image::{Image, ImageError, ImageIdentifier, ImageInspection};
use oci_spec::image::{ImageConfiguration, ImageIndex, ImageManifest};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Reads a previously built app image from a local [OCI image
/// layout](https://github.com/opencontainers/image-spec/blob/main/image-layout.md) directory.
///
/// This is a local-directory adapter, not a daemon or remote-registry client: those remain true
/// external collaborators that a caller can supply by implementing [`Image`] itself.
pub struct OciLayoutImage {
    root: PathBuf,
}

impl OciLayoutImage {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn index_path(&self) -> PathBuf {
        self.root.join("index.json")
    }

    fn blob_path(&self, digest: &str) -> Result<PathBuf, ImageError> {
        let (algorithm, hash) = digest
            .split_once(':')
            .ok_or_else(|| ImageError::Other(format!("malformed digest: {digest}")))?;

        Ok(self.root.join("blobs").join(algorithm).join(hash))
    }
}

impl Image for OciLayoutImage {
    fn inspect(&self) -> Result<Option<ImageInspection>, ImageError> {
        if !self.index_path().exists() {
            return Ok(None);
        }

        let index = ImageIndex::from_file(self.index_path())
            .map_err(|error| ImageError::Other(error.to_string()))?;

        let manifest_descriptor = index
            .manifests()
            .first()
            .ok_or_else(|| ImageError::Other("OCI layout index has no manifests".to_string()))?;

        let manifest = ImageManifest::from_file(self.blob_path(manifest_descriptor.digest())?)
            .map_err(|error| ImageError::Other(error.to_string()))?;

        let config = ImageConfiguration::from_file(self.blob_path(manifest.config().digest())?)
            .map_err(|error| ImageError::Other(error.to_string()))?;

        let labels = config
            .config()
            .as_ref()
            .and_then(|c| c.labels().clone())
            .unwrap_or_default();

        Ok(Some(ImageInspection {
            identifier: ImageIdentifier(manifest_descriptor.digest().to_string()),
            labels: labels.into_iter().collect::<BTreeMap<_, _>>(),
        }))
    }
}
