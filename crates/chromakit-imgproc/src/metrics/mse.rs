use chromakit_image::{ImageError, PixelBuffer, Sample};

fn check_same_shape<T1: Sample, T2: Sample>(
    image1: &PixelBuffer<T1>,
    image2: &PixelBuffer<T2>,
) -> Result<(), ImageError> {
    if image1.size() != image2.size() {
        return Err(ImageError::InvalidImageSize(
            image1.cols(),
            image1.rows(),
            image2.cols(),
            image2.rows(),
        ));
    }
    if image1.num_channels() != image2.num_channels() {
        return Err(ImageError::InvalidChannelCount {
            expected: image1.num_channels().to_string(),
            got: image2.num_channels(),
        });
    }
    Ok(())
}

/// Compute the mean squared error (MSE) between two images.
///
/// The MSE is defined as:
///
/// $ MSE = \frac{1}{n} \sum_{i=1}^{n} (I_1 - I_2)^2 $
///
/// where `I_1` and `I_2` are the two images and `n` is the number of samples.
///
/// Samples are compared by their raw values, so the two images may use different sample
/// types. The sum is accumulated in `f64`.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
///
/// # Returns
///
/// The mean squared error between the two images, `0.0` for empty images.
///
/// # Example
///
/// ```
/// use chromakit_image::{PixelBuffer, ImageSize};
/// use chromakit_imgproc::metrics::mse;
///
/// let image1 = PixelBuffer::new_2d(
///    ImageSize {
///      width: 2,
///      height: 3,
///    },
///    vec![0u8, 1, 2, 3, 4, 5],
/// )
/// .unwrap();
///
/// let image2 = PixelBuffer::new_2d(
///    ImageSize {
///      width: 2,
///      height: 3,
///    },
///    vec![0f32, 1f32, 2f32, 3f32, 4f32, 5f32],
/// )
/// .unwrap();
///
/// let mse = mse(&image1, &image2).unwrap();
/// assert_eq!(mse, 0.0);
/// ```
///
/// # Errors
///
/// Returns an error if the two images have different shapes.
pub fn mse<T1: Sample, T2: Sample>(
    image1: &PixelBuffer<T1>,
    image2: &PixelBuffer<T2>,
) -> Result<f64, ImageError> {
    check_same_shape(image1, image2)?;

    if image1.numel() == 0 {
        return Ok(0.0);
    }

    let sum = image1
        .as_slice()
        .iter()
        .zip(image2.as_slice().iter())
        .map(|(a, b)| {
            let d = a.to_f32() as f64 - b.to_f32() as f64;
            d * d
        })
        .sum::<f64>();

    Ok(sum / image1.numel() as f64)
}

/// Compute the peak signal-to-noise ratio (PSNR) between two images.
///
/// The PSNR is defined as:
///
/// $ PSNR = 10 \log_{10} \left( \frac{MAX^2}{MSE} \right) $
///
/// where `MAX` is the maximum possible pixel value and `MSE` is the mean squared error.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
/// * `max_value` - The maximum possible pixel value.
///
/// # Returns
///
/// The peak signal-to-noise ratio in dB, infinite for identical images.
pub fn psnr<T1: Sample, T2: Sample>(
    image1: &PixelBuffer<T1>,
    image2: &PixelBuffer<T2>,
    max_value: f64,
) -> Result<f64, ImageError> {
    let mse = mse(image1, image2)?;

    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }

    Ok(10.0 * (max_value * max_value / mse).log10())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chromakit_image::{ImageError, ImageSize, PixelBuffer};

    #[test]
    fn test_equal() -> Result<(), ImageError> {
        let image1 = PixelBuffer::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            1,
            vec![0f32, 1f32, 2f32, 3f32, 4f32, 5f32],
        )?;
        let image2 = image1.clone();
        let mse = crate::metrics::mse(&image1, &image2)?;
        assert_eq!(mse, 0.0);

        Ok(())
    }

    #[test]
    fn test_not_equal() -> Result<(), ImageError> {
        let image1 = PixelBuffer::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            1,
            vec![0u8, 1, 2, 3],
        )?;
        let image2 = PixelBuffer::new(image1.size(), 1, vec![0u8, 3, 2, 3])?;
        let mse = crate::metrics::mse(&image1, &image2)?;
        assert_eq!(mse, 1.0);

        // no wrap-around on unsigned samples
        let image3 = PixelBuffer::new(image1.size(), 1, vec![255u8, 1, 2, 3])?;
        let mse = crate::metrics::mse(&image1, &image3)?;
        assert_eq!(mse, 255.0 * 255.0 / 4.0);

        Ok(())
    }

    #[test]
    fn test_shape_mismatch() -> Result<(), ImageError> {
        let image1 = PixelBuffer::from_size_val([2, 2].into(), 3, 0u8)?;
        let image2 = PixelBuffer::from_size_val([2, 2].into(), 1, 0u8)?;
        assert!(crate::metrics::mse(&image1, &image2).is_err());

        let image3 = PixelBuffer::from_size_val([2, 3].into(), 3, 0u8)?;
        assert_eq!(
            crate::metrics::mse(&image1, &image3),
            Err(ImageError::InvalidImageSize(2, 2, 2, 3))
        );

        Ok(())
    }

    #[test]
    fn test_psnr() -> Result<(), ImageError> {
        let image1 = PixelBuffer::new([1, 2].into(), 3, vec![0u8, 1, 2, 3, 4, 5])?;
        let image2 = PixelBuffer::new([1, 2].into(), 3, vec![1u8, 3, 2, 4, 5, 6])?;
        // mse = (1 + 4 + 0 + 1 + 1 + 1) / 6
        let psnr = crate::metrics::psnr(&image1, &image2, 255.0)?;
        assert_relative_eq!(psnr, 10.0 * (255.0f64 * 255.0 / (8.0 / 6.0)).log10());

        assert_eq!(
            crate::metrics::psnr(&image1, &image1, 255.0)?,
            f64::INFINITY
        );

        Ok(())
    }
}
