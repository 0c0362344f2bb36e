use chromakit_image::{PixelBuffer, Sample};

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `out` - The sampled values, one per channel.
pub(crate) fn nearest_neighbor_interpolation<T: Sample>(
    image: &PixelBuffer<T>,
    u: f32,
    v: f32,
    out: &mut [f32],
) {
    let (rows, cols, c) = (image.rows(), image.cols(), image.num_channels());

    let iu = (u.max(0.0).round() as usize).min(cols - 1);
    let iv = (v.max(0.0).round() as usize).min(rows - 1);

    let base = (iv * cols + iu) * c;

    for (o, s) in out.iter_mut().zip(&image.as_slice()[base..base + c]) {
        *o = s.to_f32();
    }
}
