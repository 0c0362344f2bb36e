use std::str::FromStr;

use crate::error::ConversionError;

/// Identifier of a pixel color space encoding.
///
/// Names are matched case-insensitively. BGR is the hub every conversion is routed through.
///
/// # Examples
///
/// ```
/// use chromakit_color::ColorSpaceId;
///
/// let space: ColorSpaceId = "hsv".parse().unwrap();
/// assert_eq!(space, ColorSpaceId::Hsv);
/// assert_eq!(space.to_string(), "HSV");
/// assert_eq!(ColorSpaceId::Rgba.color_base(), ColorSpaceId::Rgb);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorSpaceId {
    /// Red, green, blue.
    Rgb,
    /// Blue, green, red. The hub space.
    Bgr,
    /// Hue, saturation, value.
    Hsv,
    /// Hue, lightness, saturation.
    Hls,
    /// CIE L*a*b*.
    Lab,
    /// Luma and two chroma channels (analog YUV).
    Yuv,
    /// CIE XYZ.
    Xyz,
    /// Single channel luma.
    Gray,
    /// RGB with a trailing alpha channel.
    Rgba,
    /// BGR with a trailing alpha channel.
    Bgra,
    /// Luma with Cr, Cb chroma. Reachable by the engine, not part of the supported set.
    YCrCb,
}

impl ColorSpaceId {
    /// The supported color spaces, in the order hypotheses are evaluated.
    pub const SUPPORTED: [ColorSpaceId; 10] = [
        ColorSpaceId::Rgb,
        ColorSpaceId::Bgr,
        ColorSpaceId::Hsv,
        ColorSpaceId::Hls,
        ColorSpaceId::Lab,
        ColorSpaceId::Yuv,
        ColorSpaceId::Xyz,
        ColorSpaceId::Gray,
        ColorSpaceId::Rgba,
        ColorSpaceId::Bgra,
    ];

    /// Every identifier the engine can route.
    pub const ALL: [ColorSpaceId; 11] = [
        ColorSpaceId::Rgb,
        ColorSpaceId::Bgr,
        ColorSpaceId::Hsv,
        ColorSpaceId::Hls,
        ColorSpaceId::Lab,
        ColorSpaceId::Yuv,
        ColorSpaceId::Xyz,
        ColorSpaceId::Gray,
        ColorSpaceId::Rgba,
        ColorSpaceId::Bgra,
        ColorSpaceId::YCrCb,
    ];

    /// The canonical name of the color space.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorSpaceId::Rgb => "RGB",
            ColorSpaceId::Bgr => "BGR",
            ColorSpaceId::Hsv => "HSV",
            ColorSpaceId::Hls => "HLS",
            ColorSpaceId::Lab => "LAB",
            ColorSpaceId::Yuv => "YUV",
            ColorSpaceId::Xyz => "XYZ",
            ColorSpaceId::Gray => "GRAY",
            ColorSpaceId::Rgba => "RGBA",
            ColorSpaceId::Bgra => "BGRA",
            ColorSpaceId::YCrCb => "YCrCb",
        }
    }

    /// Number of channels of a buffer encoded in this space.
    pub fn channels(&self) -> usize {
        match self {
            ColorSpaceId::Gray => 1,
            ColorSpaceId::Rgba | ColorSpaceId::Bgra => 4,
            _ => 3,
        }
    }

    /// Whether the space stores exactly three color channels.
    pub fn is_three_channel(&self) -> bool {
        self.channels() == 3
    }

    /// Whether the space carries a trailing alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self, ColorSpaceId::Rgba | ColorSpaceId::Bgra)
    }

    /// The space of the color channels alone, dropping alpha.
    pub fn color_base(&self) -> ColorSpaceId {
        match self {
            ColorSpaceId::Rgba => ColorSpaceId::Rgb,
            ColorSpaceId::Bgra => ColorSpaceId::Bgr,
            other => *other,
        }
    }

    /// Whether the space belongs to [`ColorSpaceId::SUPPORTED`].
    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    /// Parse a name and require it to be one of the supported spaces.
    ///
    /// Unlike [`FromStr`], this rejects the hub-only `YCrCb` identifier.
    pub fn parse_supported(name: &str) -> Result<Self, ConversionError> {
        match Self::lookup(name) {
            Some(space) if space.is_supported() => Ok(space),
            _ => Err(unsupported(name)),
        }
    }

    fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|space| space.as_str().eq_ignore_ascii_case(name))
    }
}

fn unsupported(name: &str) -> ConversionError {
    ConversionError::UnsupportedSpace {
        name: name.to_string(),
        supported: ColorSpaceId::SUPPORTED
            .iter()
            .map(ColorSpaceId::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

impl std::fmt::Display for ColorSpaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColorSpaceId {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| unsupported(s))
    }
}
