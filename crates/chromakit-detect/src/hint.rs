use chromakit_color::ColorSpaceId;
use chromakit_image::{PixelBuffer, Sample};

/// What the channel count alone says about a buffer's color space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelHint {
    /// One effective channel, always GRAY.
    Gray,
    /// Four channels, RGBA or BGRA.
    AlphaBearing,
    /// Three channels, only a reconstruction against a reference can tell.
    NeedsReconstruction,
    /// Any other channel count.
    Unknown(usize),
}

impl ChannelHint {
    /// The color spaces compatible with the hint, in hypothesis order.
    pub fn candidates(&self) -> &'static [ColorSpaceId] {
        match self {
            ChannelHint::Gray => &[ColorSpaceId::Gray],
            ChannelHint::AlphaBearing => &[ColorSpaceId::Rgba, ColorSpaceId::Bgra],
            ChannelHint::NeedsReconstruction => &[
                ColorSpaceId::Rgb,
                ColorSpaceId::Bgr,
                ColorSpaceId::Hsv,
                ColorSpaceId::Hls,
                ColorSpaceId::Lab,
                ColorSpaceId::Yuv,
                ColorSpaceId::Xyz,
            ],
            ChannelHint::Unknown(_) => &[],
        }
    }
}

impl std::fmt::Display for ChannelHint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ChannelHint::Gray => write!(f, "1 channel, GRAY"),
            ChannelHint::AlphaBearing => write!(f, "4 channels, RGBA or BGRA"),
            ChannelHint::NeedsReconstruction => {
                write!(f, "3 channels, needs a reference to disambiguate")
            }
            ChannelHint::Unknown(n) => write!(f, "{n} channels, unknown"),
        }
    }
}

/// Report what the channel count of a buffer says about its color space.
///
/// A (H, W) buffer and a (H, W, 1) buffer both count as a single channel.
///
/// # Example
///
/// ```
/// use chromakit_detect::{channel_hint, ChannelHint};
/// use chromakit_image::PixelBuffer;
///
/// let gray = PixelBuffer::<u8>::new_2d([2, 2].into(), vec![0; 4]).unwrap();
/// assert_eq!(channel_hint(&gray), ChannelHint::Gray);
/// ```
pub fn channel_hint<T: Sample>(buffer: &PixelBuffer<T>) -> ChannelHint {
    match buffer.num_channels() {
        1 => ChannelHint::Gray,
        3 => ChannelHint::NeedsReconstruction,
        4 => ChannelHint::AlphaBearing,
        n => ChannelHint::Unknown(n),
    }
}
