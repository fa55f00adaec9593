use crate::buildpack_id::BuildpackId;
use crate::layer::BuildpackLayersMetadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The cache store's metadata record, keyed by buildpack ID.
///
/// Shares [`BuildpackLayersMetadata`] with [`crate::layers_metadata::LayersMetadata`] since both
/// sources describe the same per-layer `{sha, data, build, launch, cache}` shape; a zero-valued
/// `CacheMetadata` represents "no cache" or "fresh, empty cache".
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct CacheMetadata {
    #[serde(default)]
    pub buildpacks: BTreeMap<BuildpackId, BuildpackLayersMetadata>,
}
