use lifecycle_data::layers_metadata::LayersMetadata;
use std::collections::BTreeMap;
use std::fmt;

/// The label holding the previous image's layer metadata, written by the export phase of a
/// prior build.
pub const METADATA_LABEL: &str = "io.buildpacks.lifecycle.metadata";

/// Identifies a previously built app image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageIdentifier(pub String);

impl fmt::Display for ImageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an [`Image`] handle has to report about a previously built app image, when it exists.
#[derive(Clone, Debug)]
pub struct ImageInspection {
    pub identifier: ImageIdentifier,
    pub labels: BTreeMap<String, String>,
}

/// A capability trait over a previously built app image.
///
/// Implementations are expected to wrap a specific image source (a local OCI layout directory,
/// a remote registry, a daemon) but expose none of that here; the analyzer only ever needs to
/// know whether the image exists and, if so, what it's labeled with.
pub trait Image {
    /// Returns the image's identifier and labels, or `Ok(None)` if the image does not exist.
    ///
    /// "Does not exist" is not an error: a fresh build with no previous image is the common case.
    fn inspect(&self) -> Result<Option<ImageInspection>, ImageError>;
}

#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    #[error("I/O error while inspecting image: {0}")]
    Io(#[from] std::io::Error),

    #[error("error inspecting image: {0}")]
    Other(String),
}

/// Reads the previous image's layer metadata label.
///
/// Returns the decoded [`LayersMetadata`] (zero-valued when the image is missing, carries no
/// label, or carries a label that doesn't parse as JSON), whether the image was present, and the
/// image's identifier when it was.
pub fn read_layers(
    image: &dyn Image,
) -> Result<(LayersMetadata, bool, Option<ImageIdentifier>), ImageError> {
    let Some(inspection) = image.inspect()? else {
        return Ok((LayersMetadata::default(), false, None));
    };

    let metadata = match inspection.labels.get(METADATA_LABEL) {
        None => {
            tracing::warn!("no metadata label on previous image");
            LayersMetadata::default()
        }
        Some(label) if label.is_empty() => {
            tracing::warn!("no metadata label on previous image");
            LayersMetadata::default()
        }
        Some(label) => match serde_json::from_str(label) {
            Ok(metadata) => metadata,
            Err(error) => {
                tracing::warn!(%error, "could not parse metadata label on previous image");
                LayersMetadata::default()
            }
        },
    };

    Ok((metadata, true, Some(inspection.identifier)))
}
