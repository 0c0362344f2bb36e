use super::{check_channels, check_color_channels, check_same_size};
use crate::parallel;
use chromakit_image::{ImageError, PixelBuffer, Sample};

/// Swap the first and third channels of a color image.
///
/// The swap is its own inverse, so the same function converts RGB to BGR and BGR to RGB.
/// Trailing channels of the source, if any, are ignored.
///
/// # Arguments
///
/// * `src` - The input image with at least 3 channels.
/// * `dst` - The output image with 3 channels.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use chromakit_image::{PixelBuffer, ImageSize};
/// use chromakit_imgproc::color::bgr_from_rgb;
///
/// let rgb = PixelBuffer::<u8>::new(
///     ImageSize { width: 1, height: 1 },
///     3,
///     vec![255, 128, 0],
/// )
/// .unwrap();
///
/// let mut bgr = PixelBuffer::from_size_val(rgb.size(), 3, 0u8).unwrap();
/// bgr_from_rgb(&rgb, &mut bgr).unwrap();
/// assert_eq!(bgr.as_slice(), &[0, 128, 255]);
/// ```
pub fn bgr_from_rgb<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = src_pixel[2];
        dst_pixel[1] = src_pixel[1];
        dst_pixel[2] = src_pixel[0];
    });

    Ok(())
}

/// Convert an RGBA image to BGR, dropping the alpha channel.
///
/// A 3 channel input is accepted as well, which allows callers to strip alpha beforehand.
pub fn bgr_from_rgba<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    bgr_from_rgb(src, dst)
}

/// Convert a BGRA image to BGR, dropping the alpha channel.
pub fn bgr_from_bgra<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.copy_from_slice(&src_pixel[..3]);
    });

    Ok(())
}

/// Convert a BGR image to RGBA with a fully opaque alpha channel.
///
/// # Arguments
///
/// * `src` - The input BGR image.
/// * `dst` - The output RGBA image with 4 channels.
pub fn rgba_from_bgr<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 4)?;

    let opaque = T::from_f32(T::DEPTH.max_value());

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = src_pixel[2];
        dst_pixel[1] = src_pixel[1];
        dst_pixel[2] = src_pixel[0];
        dst_pixel[3] = opaque;
    });

    Ok(())
}

/// Convert a BGR image to BGRA with a fully opaque alpha channel.
pub fn bgra_from_bgr<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 4)?;

    let opaque = T::from_f32(T::DEPTH.max_value());

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[..3].copy_from_slice(&src_pixel[..3]);
        dst_pixel[3] = opaque;
    });

    Ok(())
}
