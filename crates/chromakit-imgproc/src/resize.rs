use crate::interpolation::{interpolate_pixel, InterpolationMode};
use chromakit_image::{ImageError, ImageSize, PixelBuffer, Sample};
use rayon::prelude::*;

/// Resize an image to the size of the destination buffer.
///
/// Output pixel centers are mapped onto the input with half-pixel alignment,
/// `x_src = (x_dst + 0.5) * (w_src / w_dst) - 0.5`, and clamped to the input bounds.
/// It supports any number of channels and sample types.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container.
/// * `interpolation` - The interpolation mode to use.
///
/// Precondition: the input and output images must have the same number of channels.
///
/// # Example
///
/// ```
/// use chromakit_image::{PixelBuffer, ImageSize};
/// use chromakit_imgproc::resize::resize_native;
/// use chromakit_imgproc::interpolation::InterpolationMode;
///
/// let image = PixelBuffer::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     3,
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = PixelBuffer::from_size_val(new_size, 3, 0.0).unwrap();
///
/// resize_native(
///     &image,
///     &mut image_resized,
///     InterpolationMode::Nearest,
/// )
/// .unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize_native<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.num_channels() != dst.num_channels() {
        return Err(ImageError::InvalidChannelCount {
            expected: src.num_channels().to_string(),
            got: dst.num_channels(),
        });
    }

    if dst.size().area() == 0 {
        return Ok(());
    }

    if src.size().area() == 0 {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let c = src.num_channels();
    let (dst_cols, dst_rows) = (dst.cols(), dst.rows());
    let scale_x = src.cols() as f32 / dst_cols as f32;
    let scale_y = src.rows() as f32 / dst_rows as f32;
    let max_u = (src.cols() - 1) as f32;
    let max_v = (src.rows() - 1) as f32;

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * c)
        .enumerate()
        .for_each(|(y, row)| {
            let v = ((y as f32 + 0.5) * scale_y - 0.5).clamp(0.0, max_v);
            let mut values = vec![0.0f32; c];
            for (x, pixel) in row.chunks_exact_mut(c).enumerate() {
                let u = ((x as f32 + 0.5) * scale_x - 0.5).clamp(0.0, max_u);
                interpolate_pixel(src, u, v, &mut values, interpolation);
                for (d, s) in pixel.iter_mut().zip(&values) {
                    *d = T::from_f32(*s);
                }
            }
        });

    Ok(())
}

/// Resize an image into a newly allocated buffer of the given size.
///
/// The output keeps the channel count and the channel axis layout of the input, so a
/// (H, W) gray buffer is resized into a (H', W') buffer.
pub fn resize_to<T: Sample>(
    src: &PixelBuffer<T>,
    new_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<PixelBuffer<T>, ImageError> {
    if src.size() == new_size {
        return Ok(src.clone());
    }

    let mut dst = PixelBuffer::from_size_val(new_size, src.num_channels(), T::default())?;
    resize_native(src, &mut dst, interpolation)?;

    if src.has_channel_axis() {
        Ok(dst)
    } else {
        dst.without_channel_axis()
    }
}

#[cfg(test)]
mod tests {
    use super::InterpolationMode;
    use chromakit_image::{ImageError, ImageSize, PixelBuffer};

    #[test]
    fn resize_smoke_ch3() -> Result<(), ImageError> {
        let image = PixelBuffer::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            3,
            vec![0f32; 4 * 5 * 3],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 3,
        };

        let mut image_resized = PixelBuffer::from_size_val(new_size, 3, 0.0)?;

        super::resize_native(&image, &mut image_resized, InterpolationMode::Bilinear)?;

        assert_eq!(image_resized.num_channels(), 3);
        assert_eq!(image_resized.size().width, 2);
        assert_eq!(image_resized.size().height, 3);
        Ok(())
    }

    #[test]
    fn resize_downscale_half_pixel() -> Result<(), ImageError> {
        let image = PixelBuffer::new_2d([4, 1].into(), vec![0u8, 10, 20, 30])?;

        let resized = super::resize_to(&image, [2, 1].into(), InterpolationMode::Bilinear)?;
        assert_eq!(resized.shape(), vec![1, 2]);
        // centers map to 0.5 and 2.5
        assert_eq!(resized.as_slice(), &[5, 25]);

        Ok(())
    }

    #[test]
    fn resize_upscale_nearest() -> Result<(), ImageError> {
        let image = PixelBuffer::new([2, 1].into(), 2, vec![1u16, 2, 3, 4])?;

        let resized = super::resize_to(&image, [4, 2].into(), InterpolationMode::Nearest)?;
        assert_eq!(resized.shape(), vec![2, 4, 2]);
        assert_eq!(
            resized.as_slice(),
            &[1, 2, 1, 2, 3, 4, 3, 4, 1, 2, 1, 2, 3, 4, 3, 4]
        );

        Ok(())
    }

    #[test]
    fn resize_same_size_is_copy() -> Result<(), ImageError> {
        let image = PixelBuffer::from_size_val([3, 3].into(), 3, 9u8)?;
        let resized = super::resize_to(&image, image.size(), InterpolationMode::Bilinear)?;
        assert_eq!(resized, image);

        Ok(())
    }

    #[test]
    fn resize_channel_mismatch() -> Result<(), ImageError> {
        let image = PixelBuffer::from_size_val([3, 3].into(), 3, 0u8)?;
        let mut dst = PixelBuffer::from_size_val([2, 2].into(), 4, 0u8)?;
        assert!(super::resize_native(&image, &mut dst, InterpolationMode::Nearest).is_err());

        Ok(())
    }
}
