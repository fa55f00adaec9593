//! The buildpack lifecycle analyzer's CLI front-end: flag parsing, logging setup, and the thin
//! wiring that connects a local OCI-layout image and an optional build cache to
//! [`lifecycle_analyzer::Analyzer`].
#![warn(clippy::pedantic)]
#![warn(unused_crate_dependencies)]
#![warn(clippy::panic_in_result_fn)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
mod error;
mod logging;

use cli::Args;
use error::Error;
use lifecycle_analyzer::writer::{running_as_root, Owner};
use lifecycle_analyzer::{Analyzer, Cache};
use lifecycle_common::toml_file::{read_toml_file, write_toml_file};
use lifecycle_data::group::Group;
use lifecycle_image::{FileSystemCache, ImageCache, OciLayoutImage};

/// Runs the analyzer phase end to end and writes `analyzed.toml`.
///
/// Sets up logging, then delegates to the fallible inner implementation; any hard error is
/// logged and turned into a non-zero process exit rather than returned, matching how the rest of
/// this binary's sibling CLI tools in this repository report failures to the caller.
pub fn run(args: &Args) {
    logging::init(&args.log_level);

    if let Err(error) = run_inner(args) {
        logging::fail_with_error(error.to_string());
    }
}

fn run_inner(args: &Args) -> Result<(), Error> {
    let group = read_toml_file::<Group>(&args.group_path).map_err(|source| Error::ReadGroup {
        path: args.group_path.display().to_string(),
        source,
    })?;

    if group.group.is_empty() {
        return Err(Error::EmptyGroup {
            path: args.group_path.display().to_string(),
        });
    }

    if args.cache_dir.is_some() && args.cache_image.is_some() {
        return Err(Error::ConflictingCacheFlags);
    }

    let image = OciLayoutImage::new(&args.previous_image);

    let cache_image_handle = args.cache_image.as_ref().map(OciLayoutImage::new);
    let cache: Option<Box<dyn Cache>> = if let Some(cache_dir) = &args.cache_dir {
        Some(Box::new(FileSystemCache::new(cache_dir)))
    } else if let Some(cache_image_handle) = &cache_image_handle {
        Some(Box::new(ImageCache::new(cache_image_handle)))
    } else {
        None
    };

    let owner = running_as_root().then_some(Owner {
        uid: args.uid,
        gid: args.gid,
    });

    let analyzer = Analyzer {
        group: &group.group,
        layers_dir: args.layers_dir.clone(),
        owner,
        skip_layers: args.skip_layers,
    };

    let analyzed = analyzer.analyze(&image, cache.as_deref())?;

    write_toml_file(&analyzed, &args.analyzed_path).map_err(|source| Error::WriteAnalyzed {
        path: args.analyzed_path.display().to_string(),
        source,
    })
}
