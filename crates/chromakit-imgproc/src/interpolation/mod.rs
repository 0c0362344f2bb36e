//! Pixel interpolation methods for image resampling.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//!
//! The kernels accept any sample type and any number of channels and produce `f32` values
//! that callers convert back with [`chromakit_image::Sample::from_f32`].

mod bilinear;
pub(crate) mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, InterpolationMode};
