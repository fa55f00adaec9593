use clap::Parser;
use std::path::PathBuf;

/// Reconstructs buildpack layer metadata from a previously built app image and build cache.
///
/// Reads the active buildpack group and the previous image's layer metadata label, merges it
/// with the build cache's metadata record, and writes the per-buildpack layer files the restore
/// and build phases rely on plus an `analyzed.toml` summary.
#[derive(Parser, Debug)]
#[command(name = "analyzer", version, about, bin_name = "analyzer")]
pub struct Args {
    /// Path to a local OCI image layout directory for the previously built app image.
    ///
    /// A directory that does not exist, or does not contain an `index.json`, is treated as "no
    /// previous image" rather than an error.
    pub previous_image: PathBuf,

    /// Directory of a filesystem-backed build cache.
    ///
    /// Mutually exclusive with `--cache-image`; when neither is set, the analyzer runs without a
    /// cache.
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Path to a local OCI image layout directory backing an image-based build cache.
    ///
    /// Mutually exclusive with `--cache-dir`.
    #[arg(long)]
    pub cache_image: Option<PathBuf>,

    /// Path to the detect phase's `group.toml`.
    #[arg(long, default_value = "group.toml")]
    pub group_path: PathBuf,

    /// Path to write the analyzer's `analyzed.toml` summary to.
    #[arg(long, default_value = "analyzed.toml")]
    pub analyzed_path: PathBuf,

    /// Directory that per-buildpack layer metadata is written under.
    #[arg(long)]
    pub layers_dir: PathBuf,

    /// Path to the application source directory. Recorded for provenance only; the analyzer
    /// never reads it.
    #[arg(long)]
    pub app_dir: Option<PathBuf>,

    /// UID that newly created layer files are chowned to, when running as root.
    #[arg(long)]
    pub uid: u32,

    /// GID that newly created layer files are chowned to, when running as root.
    #[arg(long)]
    pub gid: u32,

    /// Skip writing any layer files; only compute and write `analyzed.toml`.
    #[arg(long)]
    pub skip_layers: bool,

    /// Minimum level of log records emitted to stderr.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
