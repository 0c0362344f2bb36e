use super::{
    check_channels, check_color_channels, check_same_size, hue_degrees, hue_scale,
    normalized_rgb, write_normalized_bgr,
};
use crate::parallel;
use chromakit_image::{ImageError, PixelBuffer, Sample};

/// Convert a BGR image to an HSV image.
///
/// The input image is assumed to have its first 3 channels in the order B, G, R.
///
/// # Arguments
///
/// * `src` - The input BGR image.
/// * `dst` - The output HSV image.
///
/// # Returns
///
/// The HSV image with the following channels:
///
/// * H: The hue channel, in [0, 180] for `u8` samples (degrees / 2) and [0, 360) for `f32`.
/// * S: The saturation channel, in [0, 255] for `u8` samples and [0, 1] for `f32`.
/// * V: The value channel, in [0, 255] for `u8` samples and [0, 1] for `f32`.
///
/// Precondition: the output image must have 3 channels.
/// Precondition: the input and output images must have the same size.
///
/// # Errors
///
/// `u16` samples are rejected with [`ImageError::UnsupportedSampleDepth`].
///
/// # Example
///
/// ```
/// use chromakit_image::{PixelBuffer, ImageSize};
/// use chromakit_imgproc::color::hsv_from_bgr;
///
/// let image = PixelBuffer::<f32>::new(
///     ImageSize {
///        width: 4,
///        height: 5,
///     },
///     3,
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut hsv = PixelBuffer::<f32>::from_size_val(image.size(), 3, 0.0).unwrap();
///
/// hsv_from_bgr(&image, &mut hsv).unwrap();
///
/// assert_eq!(hsv.num_channels(), 3);
/// assert_eq!(hsv.size().width, 4);
/// assert_eq!(hsv.size().height, 5);
/// ```
pub fn hsv_from_bgr<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    let h_scale = hue_scale::<T>("hsv_from_bgr")?;
    let scale = T::DEPTH.max_value();

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let (r, g, b) = normalized_rgb(src_pixel);

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = hue_degrees(r, g, b, max, delta);
        let s = if max == 0.0 { 0.0 } else { delta / max };

        dst_pixel[0] = T::from_f32(h * h_scale);
        dst_pixel[1] = T::from_f32(s * scale);
        dst_pixel[2] = T::from_f32(max * scale);
    });

    Ok(())
}

/// Convert an HSV image back to BGR.
///
/// The channel ranges follow [`hsv_from_bgr`]. A hue at the top of its range wraps to zero.
///
/// # Arguments
///
/// * `src` - The input HSV image.
/// * `dst` - The output BGR image.
pub fn bgr_from_hsv<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    let h_scale = hue_scale::<T>("bgr_from_hsv")?;
    let scale = T::DEPTH.max_value();

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let h = src_pixel[0].to_f32() / h_scale;
        let s = src_pixel[1].to_f32() / scale;
        let v = src_pixel[2].to_f32() / scale;

        if s == 0.0 {
            write_normalized_bgr(v, v, v, dst_pixel);
            return;
        }

        let hh = (h / 60.0).rem_euclid(6.0);
        let sector = hh.floor();
        let f = hh - sector;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        write_normalized_bgr(r, g, b, dst_pixel);
    });

    Ok(())
}
