//! Small, low-level utilities shared between the crates that make up the lifecycle analyzer.
//!
//! Nothing in this crate knows about buildpacks, images, or caches; it only knows about files
//! and TOML.
#![warn(unused_crate_dependencies)]
#![warn(clippy::pedantic)]
#![warn(clippy::panic_in_result_fn)]
#![warn(clippy::unwrap_used)]
// This lint is too noisy and enforces a style that reduces readability in many cases.
#![allow(clippy::module_name_repetitions)]

pub mod fs;
pub mod toml_file;
