use super::{
    check_channels, check_color_channels, check_same_size, normalized_rgb, write_normalized_bgr,
    RGB_TO_XYZ, XYZ_TO_RGB,
};
use crate::parallel;
use chromakit_image::{ImageError, PixelBuffer, Sample, SampleDepth};

// D65 white point
const XN: f32 = 0.950456;
const ZN: f32 = 1.088754;

const EPSILON: f32 = 0.008856;
const KAPPA: f32 = 903.3;

/// Storage layout of the L, a, b channels for a given sample depth.
///
/// `u8` stores L * 255 / 100 and offsets a, b by 128. `f32` keeps the natural ranges,
/// L in [0, 100] and signed a, b.
fn lab_layout<T: Sample>(op: &'static str) -> Result<(f32, f32), ImageError> {
    match T::DEPTH {
        SampleDepth::U8 => Ok((255.0 / 100.0, 128.0)),
        SampleDepth::F32 => Ok((1.0, 0.0)),
        depth @ SampleDepth::U16 => Err(ImageError::UnsupportedSampleDepth(op, depth)),
    }
}

#[inline]
fn linearize(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn gamma(c: f32) -> f32 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn f_lab(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

#[inline]
fn f_lab_inv(f: f32) -> f32 {
    let t = f * f * f;
    if t > EPSILON {
        t
    } else {
        (f - 16.0 / 116.0) / 7.787
    }
}

/// Convert a BGR image to CIE L*a*b* under the D65 illuminant.
///
/// The input is treated as sRGB: it is linearized before the XYZ projection.
///
/// # Arguments
///
/// * `src` - The input BGR image.
/// * `dst` - The output Lab image.
///
/// # Errors
///
/// `u16` samples are rejected with [`ImageError::UnsupportedSampleDepth`].
///
/// # Example
///
/// ```
/// use chromakit_image::PixelBuffer;
/// use chromakit_imgproc::color::lab_from_bgr;
///
/// let white = PixelBuffer::<u8>::from_size_val([1, 1].into(), 3, 255).unwrap();
/// let mut lab = white.clone();
///
/// lab_from_bgr(&white, &mut lab).unwrap();
/// assert_eq!(lab.as_slice(), &[255, 128, 128]);
/// ```
pub fn lab_from_bgr<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    let (l_scale, ab_offset) = lab_layout::<T>("lab_from_bgr")?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let (r, g, b) = normalized_rgb(src_pixel);
        let (r, g, b) = (linearize(r), linearize(g), linearize(b));

        let [m0, m1, m2] = RGB_TO_XYZ;
        let x = (m0[0] * r + m0[1] * g + m0[2] * b) / XN;
        let y = m1[0] * r + m1[1] * g + m1[2] * b;
        let z = (m2[0] * r + m2[1] * g + m2[2] * b) / ZN;

        let (fx, fy, fz) = (f_lab(x), f_lab(y), f_lab(z));

        let l = if y > EPSILON {
            116.0 * fy - 16.0
        } else {
            KAPPA * y
        };
        let a = 500.0 * (fx - fy);
        let bb = 200.0 * (fy - fz);

        dst_pixel[0] = T::from_f32(l * l_scale);
        dst_pixel[1] = T::from_f32(a + ab_offset);
        dst_pixel[2] = T::from_f32(bb + ab_offset);
    });

    Ok(())
}

/// Convert a CIE L*a*b* image back to BGR.
///
/// The channel layout follows [`lab_from_bgr`]. Out of gamut values are clipped to the
/// sample range.
pub fn bgr_from_lab<T: Sample>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBuffer<T>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_color_channels(src)?;
    check_channels(dst, 3)?;

    let (l_scale, ab_offset) = lab_layout::<T>("bgr_from_lab")?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let l = src_pixel[0].to_f32() / l_scale;
        let a = src_pixel[1].to_f32() - ab_offset;
        let bb = src_pixel[2].to_f32() - ab_offset;

        let fy = (l + 16.0) / 116.0;
        let fx = fy + a / 500.0;
        let fz = fy - bb / 200.0;

        let y = if l > KAPPA * EPSILON {
            fy * fy * fy
        } else {
            l / KAPPA
        };
        let x = f_lab_inv(fx) * XN;
        let z = f_lab_inv(fz) * ZN;

        let [m0, m1, m2] = XYZ_TO_RGB;
        let r = gamma(m0[0] * x + m0[1] * y + m0[2] * z);
        let g = gamma(m1[0] * x + m1[1] * y + m1[2] * z);
        let b = gamma(m2[0] * x + m2[1] * y + m2[2] * z);

        write_normalized_bgr(
            r.clamp(0.0, 1.0),
            g.clamp(0.0, 1.0),
            b.clamp(0.0, 1.0),
            dst_pixel,
        );
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chromakit_image::{ImageError, ImageSize, PixelBuffer};

    #[test]
    fn lab_from_bgr_u8() -> Result<(), ImageError> {
        // white, black
        let image = PixelBuffer::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            3,
            vec![255u8, 255, 255, 0, 0, 0],
        )?;

        let mut lab = PixelBuffer::from_size_val(image.size(), 3, 0u8)?;
        super::lab_from_bgr(&image, &mut lab)?;

        assert_eq!(lab.as_slice(), &[255, 128, 128, 0, 128, 128]);

        Ok(())
    }

    #[test]
    fn lab_from_bgr_f32_red() -> Result<(), ImageError> {
        let image = PixelBuffer::new([1, 1].into(), 3, vec![0.0f32, 0.0, 1.0])?;
        let mut lab = image.clone();
        super::lab_from_bgr(&image, &mut lab)?;

        let lab = lab.as_slice();
        assert_abs_diff_eq!(lab[0], 53.24, epsilon = 0.1);
        assert_abs_diff_eq!(lab[1], 80.09, epsilon = 0.2);
        assert_abs_diff_eq!(lab[2], 67.20, epsilon = 0.2);

        Ok(())
    }

    #[test]
    fn lab_roundtrip_u8() -> Result<(), ImageError> {
        let image = PixelBuffer::new(
            [3, 1].into(),
            3,
            vec![20u8, 180, 60, 250, 10, 120, 90, 90, 90],
        )?;

        let mut lab = PixelBuffer::from_size_val(image.size(), 3, 0u8)?;
        super::lab_from_bgr(&image, &mut lab)?;

        let mut bgr = PixelBuffer::from_size_val(image.size(), 3, 0u8)?;
        super::bgr_from_lab(&lab, &mut bgr)?;

        for (a, b) in image.as_slice().iter().zip(bgr.as_slice()) {
            assert!((*a as i32 - *b as i32).abs() <= 4, "{a} vs {b}");
        }

        Ok(())
    }
}
