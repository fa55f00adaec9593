use crate::layer::{BuildpackLayersMetadata, LayerMetadata};
use crate::layers_metadata::LayersMetadata;
use serde::{Deserialize, Serialize};

/// Identifies the previous app image the analyzer read metadata from.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ImageIdentifier {
    pub reference: String,
}

/// The analyzer's output: a summary of what it found in the previous app image, written to
/// `analyzed.toml` for the subsequent restore and build phases.
///
/// `image` is `None` whenever the previous image could not be found; `metadata` is the
/// zero-valued [`LayersMetadata::default`] whenever the image existed but carried no usable
/// label, never a partially-populated value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AnalyzedMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageIdentifier>,

    #[serde(default)]
    pub metadata: LayersMetadata,
}
