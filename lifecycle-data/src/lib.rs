//! Typed data structures for the on-disk and in-label formats the lifecycle analyzer reads and
//! writes: the active buildpack group, the image-label and cache metadata trees, and the
//! `analyzed.toml` summary produced at the end of the phase.
#![warn(unused_crate_dependencies)]
#![warn(clippy::pedantic)]
#![warn(clippy::panic_in_result_fn)]
#![warn(clippy::unwrap_used)]
// This lint is too noisy and enforces a style that reduces readability in many cases.
#![allow(clippy::module_name_repetitions)]

pub mod analyzed_metadata;
pub mod buildpack_id;
pub mod cache_metadata;
pub mod group;
pub mod layer;
pub mod layers_metadata;
