#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image module.
pub mod error;

/// pixel buffer representation with a dynamic channel count.
pub mod image;

/// channel level operations on pixel buffers.
pub mod ops;

/// numeric sample types stored in pixel buffers.
pub mod sample;

#[cfg(feature = "bincode")]
mod bincode;

#[cfg(feature = "serde")]
mod serde;

pub use crate::error::ImageError;
pub use crate::image::{ImageSize, PixelBuffer};
pub use crate::sample::{Sample, SampleDepth};
