use super::{check_channels, check_color_channels, check_same_size, RGB_TO_XYZ, XYZ_TO_RGB};
use crate::parallel;
use chromakit_image::{ImageError, PixelBuffer, Sample};

#[inline]
fn project(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

/// Convert a BGR image to CIE XYZ (D65).
///
/// The matrix is applied to the raw sample values without gamma correction. Integer outputs
/// saturate, so a bright blue component may clip the Z channel.
///
/// # Arguments
///
/// * `src` - The input BGR image.
/// * `dst` - The output XYZ image, channels in the order X, Y, Z.
pub fn xyz_from_bgr<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let rgb = [
            src_pixel[2].to_f32(),
            src_pixel[1].to_f32(),
            src_pixel[0].to_f32(),
        ];
        let xyz = project(&RGB_TO_XYZ, rgb);
        dst_pixel[0] = T::from_f32(xyz[0]);
        dst_pixel[1] = T::from_f32(xyz[1]);
        dst_pixel[2] = T::from_f32(xyz[2]);
    });

    Ok(())
}

/// Convert a CIE XYZ image back to BGR.
pub fn bgr_from_xyz<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let xyz = [
            src_pixel[0].to_f32(),
            src_pixel[1].to_f32(),
            src_pixel[2].to_f32(),
        ];
        let rgb = project(&XYZ_TO_RGB, xyz);
        dst_pixel[0] = T::from_f32(rgb[2]);
        dst_pixel[1] = T::from_f32(rgb[1]);
        dst_pixel[2] = T::from_f32(rgb[0]);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use chromakit_image::{ImageError, PixelBuffer};

    #[test]
    fn xyz_from_bgr_u8() -> Result<(), ImageError> {
        // white saturates Z, black stays black
        let image = PixelBuffer::new([2, 1].into(), 3, vec![255u8, 255, 255, 0, 0, 0])?;
        let mut xyz = image.clone();
        super::xyz_from_bgr(&image, &mut xyz)?;

        assert_eq!(xyz.as_slice(), &[242, 255, 255, 0, 0, 0]);

        Ok(())
    }

    #[test]
    fn xyz_roundtrip_f32() -> Result<(), ImageError> {
        let image = PixelBuffer::new([1, 1].into(), 3, vec![0.25f32, 0.5, 0.75])?;
        let mut xyz = image.clone();
        super::xyz_from_bgr(&image, &mut xyz)?;

        let mut bgr = image.clone();
        super::bgr_from_xyz(&xyz, &mut bgr)?;

        for (a, b) in image.as_slice().iter().zip(bgr.as_slice()) {
            assert!((a - b).abs() < 1e-3, "{a} vs {b}");
        }

        Ok(())
    }
}
