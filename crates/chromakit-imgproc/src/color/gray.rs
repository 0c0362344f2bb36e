use super::{check_channels, check_color_channels, check_same_size, BW, GW, RW};
use crate::parallel;
use chromakit_image::{ImageError, PixelBuffer, Sample};

/// Convert a BGR image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The weights are applied to the raw sample values, so the output keeps the input range.
///
/// # Arguments
///
/// * `src` - The input BGR image.
/// * `dst` - The output grayscale image with 1 channel.
///
/// Precondition: the input image must have at least 3 channels.
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use chromakit_image::{PixelBuffer, ImageSize};
/// use chromakit_imgproc::color::gray_from_bgr;
///
/// let bgr = PixelBuffer::<u8>::new(
///     ImageSize { width: 1, height: 1 },
///     3,
///     vec![0, 0, 255],
/// )
/// .unwrap();
///
/// let mut gray = PixelBuffer::new_2d(bgr.size(), vec![0u8]).unwrap();
/// gray_from_bgr(&bgr, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[76]);
/// ```
pub fn gray_from_bgr<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 1)?;

    // parallelize the grayscale conversion by rows
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let b = src_pixel[0].to_f32();
        let g = src_pixel[1].to_f32();
        let r = src_pixel[2].to_f32();
        dst_pixel[0] = T::from_f32(RW * r + GW * g + BW * b);
    });

    Ok(())
}

/// Convert a grayscale image to BGR by replicating the gray value across all three channels.
///
/// # Arguments
///
/// * `src` - The input grayscale image, either (H, W) or (H, W, 1).
/// * `dst` - The output BGR image.
pub fn bgr_from_gray<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_channels(src, 1)?;
    check_channels(dst, 3)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.fill(src_pixel[0]);
    });

    Ok(())
}
