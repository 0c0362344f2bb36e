use chromakit_image::{PixelBuffer, Sample};

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `out` - The interpolated values, one per channel.
pub(crate) fn bilinear_interpolation<T: Sample>(
    image: &PixelBuffer<T>,
    u: f32,
    v: f32,
    out: &mut [f32],
) {
    let (rows, cols, c) = (image.rows(), image.cols(), image.num_channels());

    let u = u.max(0.0);
    let v = v.max(0.0);

    let iu0 = (u.trunc() as usize).min(cols - 1);
    let iv0 = (v.trunc() as usize).min(rows - 1);

    let frac_u = u.fract();
    let frac_v = v.fract();

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let base00 = (iv0 * cols + iu0) * c;
    let base01 = (iv0 * cols + iu1) * c;
    let base10 = (iv1 * cols + iu0) * c;
    let base11 = (iv1 * cols + iu1) * c;

    let data = image.as_slice();

    let p00 = &data[base00..base00 + c];
    let p01 = &data[base01..base01 + c];
    let p10 = &data[base10..base10 + c];
    let p11 = &data[base11..base11 + c];

    for (k, o) in out.iter_mut().enumerate().take(c) {
        *o = p00[k].to_f32() * w00
            + p01[k].to_f32() * w01
            + p10[k].to_f32() * w10
            + p11[k].to_f32() * w11;
    }
}
