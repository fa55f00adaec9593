//! Concrete `Image`/`Cache` back ends for the buildpack lifecycle analyzer: a local OCI-layout
//! image reader and two cache variants, one filesystem-backed and one image-backed.
#![warn(clippy::pedantic)]
#![warn(unused_crate_dependencies)]
#![warn(clippy::panic_in_result_fn)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

mod fs_cache;
mod image_cache;
mod oci_layout;

pub use fs_cache::FileSystemCache;
pub use image_cache::ImageCache;
pub use oci_layout::OciLayoutImage;
