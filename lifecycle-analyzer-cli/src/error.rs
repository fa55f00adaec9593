use lifecycle_analyzer::AnalyzeError;
use lifecycle_common::toml_file::TomlFileError;

/// Errors that can abort a run of the analyzer CLI before it produces `analyzed.toml`.
///
/// Every variant here corresponds to a "hard" error per the analyzer's error taxonomy: soft
/// conditions (missing image, empty cache, unparseable label) are handled inside
/// [`lifecycle_analyzer::Analyzer`] itself and never reach this type.
#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("failed to read buildpack group from {path}: {source}")]
    ReadGroup {
        path: String,
        #[source]
        source: TomlFileError,
    },

    #[error("buildpack group in {path} is empty")]
    EmptyGroup { path: String },

    #[error("--cache-dir and --cache-image are mutually exclusive")]
    ConflictingCacheFlags,

    #[error("analysis failed: {0}")]
    Analyze(#[from] AnalyzeError),

    #[error("failed to write analyzed metadata to {path}: {source}")]
    WriteAnalyzed {
        path: String,
        #[source]
        source: TomlFileError,
    },
}
