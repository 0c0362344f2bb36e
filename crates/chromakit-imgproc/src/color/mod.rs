//! Per-channel color space formulas.
//!
//! Every function reads from a source buffer and writes into a pre-allocated destination
//! buffer of the same spatial size. The formulas follow the conventions of common vision
//! libraries: BGR is the reference channel order, 8-bit hue is stored as degrees / 2 and
//! signed chroma channels are offset by half of the sample range.

mod gray;
mod hls;
mod hsv;
mod lab;
mod rgb;
mod xyz;
mod yuv;

pub use gray::{bgr_from_gray, gray_from_bgr};
pub use hls::{bgr_from_hls, hls_from_bgr};
pub use hsv::{bgr_from_hsv, hsv_from_bgr};
pub use lab::{bgr_from_lab, lab_from_bgr};
pub use rgb::{bgr_from_bgra, bgr_from_rgb, bgr_from_rgba, bgra_from_bgr, rgba_from_bgr};
pub use xyz::{bgr_from_xyz, xyz_from_bgr};
pub use yuv::{bgr_from_ycrcb, bgr_from_yuv, ycrcb_from_bgr, yuv_from_bgr};

use chromakit_image::{ImageError, PixelBuffer, Sample, SampleDepth};

/// Luma weights shared by the gray, YUV and YCrCb conversions.
pub(crate) const RW: f32 = 0.299;
pub(crate) const GW: f32 = 0.587;
pub(crate) const BW: f32 = 0.114;

/// Linear sRGB (D65) to CIE XYZ, shared by the XYZ and L*a*b* conversions.
pub(crate) const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412453, 0.357580, 0.180423],
    [0.212671, 0.715160, 0.072169],
    [0.019334, 0.119193, 0.950227],
];

/// Inverse of [`RGB_TO_XYZ`].
pub(crate) const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.240479, -1.53715, -0.498535],
    [-0.969256, 1.875991, 0.041556],
    [0.055648, -0.204043, 1.057311],
];

pub(crate) fn check_same_size<T1: Sample, T2: Sample>(
    src: &PixelBuffer<T1>,
    dst: &PixelBuffer<T2>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

pub(crate) fn check_channels<T: Sample>(
    image: &PixelBuffer<T>,
    expected: usize,
) -> Result<(), ImageError> {
    if image.num_channels() != expected {
        return Err(ImageError::InvalidChannelCount {
            expected: expected.to_string(),
            got: image.num_channels(),
        });
    }
    Ok(())
}

/// Sources holding a color triplet may carry trailing channels, only the first three are read.
pub(crate) fn check_color_channels<T: Sample>(image: &PixelBuffer<T>) -> Result<(), ImageError> {
    if image.num_channels() < 3 {
        return Err(ImageError::InvalidChannelCount {
            expected: "at least 3".to_string(),
            got: image.num_channels(),
        });
    }
    Ok(())
}

/// Scale applied to hue degrees when storing them in a sample of type `T`.
///
/// 8-bit samples hold degrees / 2 so that the full circle fits in [0, 180].
pub(crate) fn hue_scale<T: Sample>(op: &'static str) -> Result<f32, ImageError> {
    match T::DEPTH {
        SampleDepth::U8 => Ok(0.5),
        SampleDepth::F32 => Ok(1.0),
        depth @ SampleDepth::U16 => Err(ImageError::UnsupportedSampleDepth(op, depth)),
    }
}

/// Hue in degrees [0, 360) of a normalized rgb triplet.
pub(crate) fn hue_degrees(r: f32, g: f32, b: f32, max: f32, delta: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }

    let h = if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };

    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// Read the first three samples of a BGR pixel as normalized r, g, b values.
#[inline]
pub(crate) fn normalized_rgb<T: Sample>(bgr: &[T]) -> (f32, f32, f32) {
    let scale = T::DEPTH.max_value();
    (
        bgr[2].to_f32() / scale,
        bgr[1].to_f32() / scale,
        bgr[0].to_f32() / scale,
    )
}

/// Write normalized r, g, b values into a BGR pixel.
#[inline]
pub(crate) fn write_normalized_bgr<T: Sample>(r: f32, g: f32, b: f32, bgr: &mut [T]) {
    let scale = T::DEPTH.max_value();
    bgr[0] = T::from_f32(b * scale);
    bgr[1] = T::from_f32(g * scale);
    bgr[2] = T::from_f32(r * scale);
}
