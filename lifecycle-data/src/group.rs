use crate::buildpack_id::BuildpackId;
use serde::{Deserialize, Serialize};

/// A single entry in the active group of buildpacks, as written by the detect phase.
///
/// `version` and `optional` are carried for provenance only; the analyzer's selection logic
/// never consults them, it only needs the `id` to look up per-buildpack metadata.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct GroupBuildpack {
    pub id: BuildpackId,
    pub version: String,

    #[serde(default)]
    pub optional: bool,
}

/// The detect phase's output: buildpacks selected to participate in this build, in order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Group {
    #[serde(default)]
    pub group: Vec<GroupBuildpack>,
}
