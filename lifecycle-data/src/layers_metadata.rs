use crate::buildpack_id::BuildpackId;
use crate::layer::BuildpackLayersMetadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A reference to a single-file layer tracked only by its content SHA (the `app`, `config` and
/// `launcher` slots of [`LayersMetadata`]).
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ShaReference {
    pub sha: String,
}

/// Run image metadata carried in the label verbatim; the analyzer never interprets it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunImageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_layer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// The run-image/stack association carried in the label verbatim.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_image: Option<StackRunImage>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct StackRunImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mirrors: Vec<String>,
}

/// The decoded contents of the `io.buildpacks.lifecycle.metadata` image label.
///
/// A zero-valued `LayersMetadata` (the [`Default`] impl) represents "no prior metadata", which
/// is the result produced whenever the label is missing, empty, or fails to parse.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayersMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<ShaReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ShaReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launcher: Option<ShaReference>,

    #[serde(default)]
    pub buildpacks: BTreeMap<BuildpackId, BuildpackLayersMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_image: Option<RunImageMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackMetadata>,
}
