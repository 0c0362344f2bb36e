use super::{check_channels, check_color_channels, check_same_size, BW, GW, RW};
use crate::parallel;
use chromakit_image::{ImageError, PixelBuffer, Sample};

/// Convert a BGR image to an YUV image.
///
/// # Arguments
///
/// * `src` - The input BGR image.
/// * `dst` - The output YUV image.
///
/// # Returns
///
/// The YUV image with the following channels:
///
/// * Y: The luminance channel, same range as the input.
/// * U: The chrominance-blue channel, offset by half of the sample range.
/// * V: The chrominance-red channel, offset by half of the sample range.
///
/// Precondition: the output image must have 3 channels.
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use chromakit_image::{PixelBuffer, ImageSize};
/// use chromakit_imgproc::color::yuv_from_bgr;
///
/// let image = PixelBuffer::<u8>::new(
///     ImageSize {
///        width: 4,
///        height: 5,
///     },
///     3,
///     vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut yuv = PixelBuffer::from_size_val(image.size(), 3, 0u8).unwrap();
///
/// yuv_from_bgr(&image, &mut yuv).unwrap();
///
/// assert_eq!(yuv.get([0, 0, 1]), Some(&128));
/// ```
pub fn yuv_from_bgr<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    let delta = T::DEPTH.chroma_offset();

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let b = src_pixel[0].to_f32();
        let g = src_pixel[1].to_f32();
        let r = src_pixel[2].to_f32();

        let y = RW * r + GW * g + BW * b;
        let u = 0.492 * (b - y) + delta;
        let v = 0.877 * (r - y) + delta;

        dst_pixel[0] = T::from_f32(y);
        dst_pixel[1] = T::from_f32(u);
        dst_pixel[2] = T::from_f32(v);
    });

    Ok(())
}

/// Convert an YUV image back to BGR.
///
/// # Arguments
///
/// * `src` - The input YUV image laid out as in [`yuv_from_bgr`].
/// * `dst` - The output BGR image.
pub fn bgr_from_yuv<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    let delta = T::DEPTH.chroma_offset();

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let y = src_pixel[0].to_f32();
        let u = src_pixel[1].to_f32() - delta;
        let v = src_pixel[2].to_f32() - delta;

        let r = y + 1.140 * v;
        let g = y - 0.395 * u - 0.581 * v;
        let b = y + 2.032 * u;

        dst_pixel[0] = T::from_f32(b);
        dst_pixel[1] = T::from_f32(g);
        dst_pixel[2] = T::from_f32(r);
    });

    Ok(())
}

/// Convert a BGR image to YCrCb.
///
/// The output channels are ordered Y, Cr, Cb with both chroma channels offset by half of the
/// sample range.
pub fn ycrcb_from_bgr<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    let delta = T::DEPTH.chroma_offset();

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let b = src_pixel[0].to_f32();
        let g = src_pixel[1].to_f32();
        let r = src_pixel[2].to_f32();

        let y = RW * r + GW * g + BW * b;
        let cr = 0.713 * (r - y) + delta;
        let cb = 0.564 * (b - y) + delta;

        dst_pixel[0] = T::from_f32(y);
        dst_pixel[1] = T::from_f32(cr);
        dst_pixel[2] = T::from_f32(cb);
    });

    Ok(())
}

/// Convert a YCrCb image back to BGR.
pub fn bgr_from_ycrcb<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    let delta = T::DEPTH.chroma_offset();

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let y = src_pixel[0].to_f32();
        let cr = src_pixel[1].to_f32() - delta;
        let cb = src_pixel[2].to_f32() - delta;

        let r = y + 1.403 * cr;
        let g = y - 0.714 * cr - 0.344 * cb;
        let b = y + 1.773 * cb;

        dst_pixel[0] = T::from_f32(b);
        dst_pixel[1] = T::from_f32(g);
        dst_pixel[2] = T::from_f32(r);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use chromakit_image::{ImageError, ImageSize, PixelBuffer};

    #[test]
    fn yuv_from_bgr() -> Result<(), ImageError> {
        // red, white
        let image = PixelBuffer::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            3,
            vec![0u8, 0, 255, 255, 255, 255],
        )?;

        let mut yuv = PixelBuffer::from_size_val(image.size(), 3, 0u8)?;
        super::yuv_from_bgr(&image, &mut yuv)?;

        // U = 0.492 * (0 - 76.245) + 128, V = 0.877 * (255 - 76.245) + 128 saturates
        assert_eq!(yuv.as_slice(), &[76, 90, 255, 255, 128, 128]);

        Ok(())
    }

    #[test]
    fn yuv_inverse_relation() -> Result<(), ImageError> {
        let image = PixelBuffer::new(
            [3, 1].into(),
            3,
            vec![0.2f32, 0.4, 0.6, 0.9, 0.1, 0.5, 0.3, 0.3, 0.3],
        )?;

        let mut yuv = image.clone();
        super::yuv_from_bgr(&image, &mut yuv)?;

        let mut bgr = image.clone();
        super::bgr_from_yuv(&yuv, &mut bgr)?;

        for (a, b) in image.as_slice().iter().zip(bgr.as_slice()) {
            assert!((a - b).abs() < 1e-2, "{a} vs {b}");
        }

        Ok(())
    }

    #[test]
    fn ycrcb_inverse_relation() -> Result<(), ImageError> {
        let image = PixelBuffer::new(
            [3, 1].into(),
            3,
            vec![30u8, 120, 200, 250, 5, 90, 77, 77, 77],
        )?;

        let mut ycrcb = image.clone();
        super::ycrcb_from_bgr(&image, &mut ycrcb)?;
        assert_eq!(ycrcb.get([0, 2, 1]), Some(&128));
        assert_eq!(ycrcb.get([0, 2, 2]), Some(&128));

        let mut bgr = image.clone();
        super::bgr_from_ycrcb(&ycrcb, &mut bgr)?;

        for (a, b) in image.as_slice().iter().zip(bgr.as_slice()) {
            assert!((*a as i32 - *b as i32).abs() <= 2, "{a} vs {b}");
        }

        Ok(())
    }
}
