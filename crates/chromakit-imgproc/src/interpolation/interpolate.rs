use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use chromakit_image::{PixelBuffer, Sample};

/// Interpolation mode for the resize operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `out` - Receives one interpolated value per channel.
/// * `interpolation` - The interpolation mode to use.
///
/// Precondition: the image must not be empty and `out` must hold `image.num_channels()` values.
pub fn interpolate_pixel<T: Sample>(
    image: &PixelBuffer<T>,
    u: f32,
    v: f32,
    out: &mut [f32],
    interpolation: InterpolationMode,
) {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v, out),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v, out),
    }
}

#[cfg(test)]
mod tests {
    use super::{interpolate_pixel, InterpolationMode};
    use chromakit_image::{ImageError, PixelBuffer};

    #[test]
    fn interpolate_modes() -> Result<(), ImageError> {
        let image = PixelBuffer::new([2, 1].into(), 2, vec![0u8, 100, 200, 50])?;

        let mut out = [0.0f32; 2];
        interpolate_pixel(&image, 0.5, 0.0, &mut out, InterpolationMode::Bilinear);
        assert_eq!(out, [100.0, 75.0]);

        interpolate_pixel(&image, 0.75, 0.0, &mut out, InterpolationMode::Nearest);
        assert_eq!(out, [200.0, 50.0]);

        Ok(())
    }
}
