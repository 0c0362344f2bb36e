use crate::sample::SampleDepth;

/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when a shape is neither (H, W) nor (H, W, C).
    #[error("Invalid buffer shape {0:?}")]
    InvalidShape(Vec<usize>),

    /// Error when the image sizes do not match.
    #[error("Image size mismatch: {0}x{1} vs {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when an operation receives a buffer with the wrong number of channels.
    #[error("Invalid number of channels: expected {expected}, got {got}")]
    InvalidChannelCount {
        /// Human readable description of the accepted channel counts.
        expected: String,
        /// The number of channels found in the buffer.
        got: usize,
    },

    /// Error when an operation needs a buffer with an explicit channel axis.
    #[error("Buffer of shape {0:?} has no channel axis")]
    MissingChannelAxis(Vec<usize>),

    /// Error when a buffer is created with zero channels.
    #[error("A pixel buffer needs at least one channel")]
    ZeroChannels,

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds (num channels: {1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when an operation is not defined for the sample depth.
    #[error("Operation `{0}` is not supported for {1} samples")]
    UnsupportedSampleDepth(&'static str, SampleDepth),
}
