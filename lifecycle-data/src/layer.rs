use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata for a single named layer belonging to one buildpack.
///
/// `data` is an opaque, buildpack-defined TOML table; the analyzer never inspects its contents,
/// only carries it from whichever source ([`crate::layers_metadata::LayersMetadata`] or
/// [`crate::cache_metadata::CacheMetadata`]) wins selection through to the on-disk layer file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LayerMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sha: String,

    #[serde(default)]
    pub build: bool,

    #[serde(default)]
    pub launch: bool,

    #[serde(default)]
    pub cache: bool,

    // Must stay last: TOML requires scalar fields to precede any sub-table at the same nesting
    // level, and `toml::to_string` errors (`ValueAfterTable`) otherwise.
    #[serde(default, skip_serializing_if = "toml::value::Table::is_empty")]
    pub data: toml::value::Table,
}

/// A single buildpack's entry in [`crate::layers_metadata::LayersMetadata::buildpacks`] or
/// [`crate::cache_metadata::CacheMetadata::buildpacks`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct BuildpackLayersMetadata {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub layers: BTreeMap<String, LayerMetadata>,
}
