use super::{
    check_channels, check_color_channels, check_same_size, hue_degrees, hue_scale,
    normalized_rgb, write_normalized_bgr,
};
use crate::parallel;
use chromakit_image::{ImageError, PixelBuffer, Sample};

/// Convert a BGR image to an HLS image.
///
/// # Returns
///
/// The HLS image with the following channels:
///
/// * H: The hue channel, in [0, 180] for `u8` samples (degrees / 2) and [0, 360) for `f32`.
/// * L: The lightness channel, in [0, 255] for `u8` samples and [0, 1] for `f32`.
/// * S: The saturation channel, in [0, 255] for `u8` samples and [0, 1] for `f32`.
///
/// Precondition: the input and output images must have the same size.
///
/// # Errors
///
/// `u16` samples are rejected with [`ImageError::UnsupportedSampleDepth`].
pub fn hls_from_bgr<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    let h_scale = hue_scale::<T>("hls_from_bgr")?;
    let scale = T::DEPTH.max_value();

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let (r, g, b) = normalized_rgb(src_pixel);

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = hue_degrees(r, g, b, max, delta);
        let l = (max + min) * 0.5;
        let s = if delta == 0.0 {
            0.0
        } else if l < 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        dst_pixel[0] = T::from_f32(h * h_scale);
        dst_pixel[1] = T::from_f32(l * scale);
        dst_pixel[2] = T::from_f32(s * scale);
    });

    Ok(())
}

/// Convert an HLS image back to BGR.
///
/// The channel ranges follow [`hls_from_bgr`].
pub fn bgr_from_hls<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    let h_scale = hue_scale::<T>("bgr_from_hls")?;
    let scale = T::DEPTH.max_value();

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let h = (src_pixel[0].to_f32() / h_scale).rem_euclid(360.0) / 360.0;
        let l = src_pixel[1].to_f32() / scale;
        let s = src_pixel[2].to_f32() / scale;

        if s == 0.0 {
            write_normalized_bgr(l, l, l, dst_pixel);
            return;
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        let r = hue_to_channel(p, q, h + 1.0 / 3.0);
        let g = hue_to_channel(p, q, h);
        let b = hue_to_channel(p, q, h - 1.0 / 3.0);

        write_normalized_bgr(r, g, b, dst_pixel);
    });

    Ok(())
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
