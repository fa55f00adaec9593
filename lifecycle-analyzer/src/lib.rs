//! The buildpack lifecycle analyzer: reconstructs per-buildpack layer metadata from a previously
//! built app image and a build cache so the subsequent restore and build phases can decide which
//! layers to reuse.
#![warn(clippy::pedantic)]
#![warn(unused_crate_dependencies)]
#![warn(clippy::panic_in_result_fn)]
#![warn(clippy::unwrap_used)]
// Most errors here are plumbing from an `Image`/`Cache` implementor; per-variant docs add little.
#![allow(clippy::missing_errors_doc)]
// This lint is too noisy and enforces a style that reduces readability in many cases.
#![allow(clippy::module_name_repetitions)]

pub mod analyzer;
pub mod cache;
pub mod image;
pub mod selector;
pub mod testing;
pub mod writer;

pub use analyzer::{AnalyzeError, Analyzer};
pub use cache::{Cache, CacheError};
pub use image::{Image, ImageError, ImageIdentifier, ImageInspection};
pub use writer::{Owner, WriteLayerError};
