use crate::space::ColorSpaceId;
use chromakit_image::ImageError;

/// An error type for the conversion engine.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConversionError {
    /// Error when a color space name is not recognized.
    #[error("Unsupported color space '{name}'. Supported color spaces: {supported}")]
    UnsupportedSpace {
        /// The offending name, as given by the caller.
        name: String,
        /// Comma separated list of the supported names.
        supported: String,
    },

    /// Error when the table has no transform for a routing hop.
    #[error("No conversion path from {src} to {dst}")]
    NoConversionPath {
        /// Requested source space.
        src: ColorSpaceId,
        /// Requested destination space.
        dst: ColorSpaceId,
    },

    /// Error raised by a transform, typically a channel count mismatch.
    #[error(transparent)]
    Image(#[from] ImageError),
}
