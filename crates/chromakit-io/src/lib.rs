#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`](error::IoError) variants for file access and encoding/decoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// Images are exchanged in BGR(A) channel order, see [`functional::read_image_unchanged`].
pub mod functional;

/// Raw pixel array files.
///
/// A tagged, lossless dump of a [`chromakit_image::PixelBuffer`] of any sample type.
pub mod raw;

pub use error::IoError;
pub use raw::RawArray;
